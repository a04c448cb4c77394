use crate::Error;
use crate::math::cutoff;
use crate::neighbors::Triplet;

use super::radial::check_cutoff;

/// Angular symmetry functions, depending on the distances from the central
/// atom `i` to two neighbors `j` and `k`, and on the angle `θ_jik`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum AngularFunction {
    /// `2^(1-ζ) (1 + λ cos θ)^ζ exp(-η (R_ij² + R_ik² + R_jk²)) f_c(R_ij) f_c(R_ik) f_c(R_jk)`
    G4 {
        /// Width η of the radial decay
        width: f64,
        /// Cutoff radius
        cutoff: f64,
        /// Angular resolution ζ
        zeta: f64,
        /// Shift λ of the cosine maximum, either +1 or -1
        lambda: f64,
    },
    /// `2^(1-ζ) (1 + λ cos θ)^ζ exp(-η (R_ij² + R_ik²)) f_c(R_ij) f_c(R_ik)`
    G5 {
        /// Width η of the radial decay
        width: f64,
        /// Cutoff radius
        cutoff: f64,
        /// Angular resolution ζ
        zeta: f64,
        /// Shift λ of the cosine maximum, either +1 or -1
        lambda: f64,
    },
}

/// Angular part shared by G4 and G5: `2^(1-ζ) (1 + λ cos θ)^ζ`.
///
/// This is bounded between 0 and 2 for `cos θ` in [-1, 1].
#[inline]
pub fn angular_part(cos_theta: f64, zeta: f64, lambda: f64) -> f64 {
    let base = 1.0 + lambda * cos_theta;
    // rounding in cos θ = ∓1 could make the base slightly negative
    let base = f64::max(base, 0.0);
    f64::powf(2.0, 1.0 - zeta) * f64::powf(base, zeta)
}

impl AngularFunction {
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<(), Error> {
        let (width, cutoff, zeta, lambda) = self.parameters();
        check_cutoff(cutoff)?;

        if width < 0.0 || !width.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected a non-negative width for {} function, got {}", self.name(), width
            )));
        }

        if zeta <= 0.0 || !zeta.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected a positive zeta for {} function, got {}", self.name(), zeta
            )));
        }

        if lambda != 1.0 && lambda != -1.0 {
            return Err(Error::InvalidParameter(format!(
                "expected lambda to be 1 or -1 for {} function, got {}", self.name(), lambda
            )));
        }

        return Ok(());
    }

    /// Get the name of this function, "G4" or "G5"
    pub fn name(&self) -> &'static str {
        match self {
            AngularFunction::G4 { .. } => "G4",
            AngularFunction::G5 { .. } => "G5",
        }
    }

    /// Get the `(width, cutoff, zeta, lambda)` parameters of this function
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        match *self {
            AngularFunction::G4 { width, cutoff, zeta, lambda } |
            AngularFunction::G5 { width, cutoff, zeta, lambda } => (width, cutoff, zeta, lambda),
        }
    }

    /// Get the cutoff radius of this function
    pub fn cutoff(&self) -> f64 {
        self.parameters().1
    }

    /// Evaluate the contribution of a single triplet, given the two bond
    /// lengths, the distance between the neighbors and the cosine of the angle
    /// between the bonds.
    #[inline]
    pub fn compute(&self, rij: f64, rik: f64, rjk: f64, cos_theta: f64) -> f64 {
        match *self {
            AngularFunction::G4 { width, cutoff: rc, zeta, lambda } => {
                let radial = f64::exp(-width * (rij * rij + rik * rik + rjk * rjk));
                let cutoffs = cutoff(rij, rc) * cutoff(rik, rc) * cutoff(rjk, rc);
                angular_part(cos_theta, zeta, lambda) * radial * cutoffs
            }
            AngularFunction::G5 { width, cutoff: rc, zeta, lambda } => {
                let radial = f64::exp(-width * (rij * rij + rik * rik));
                let cutoffs = cutoff(rij, rc) * cutoff(rik, rc);
                angular_part(cos_theta, zeta, lambda) * radial * cutoffs
            }
        }
    }

    /// Sum the contributions of all triplets `j < k` around the central atom
    pub fn feature(&self, triplets: &[Triplet]) -> f64 {
        let rc = self.cutoff();
        triplets.iter()
            // both bonds must be inside the cutoff for the triplet to contribute
            .filter(|t| t.rij < rc && t.rik < rc)
            .map(|t| self.compute(t.rij, t.rik, t.rjk, t.cos_theta))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn angular_part_values() {
        // maximum at θ = 0 for λ = 1 and θ = π for λ = -1
        assert_eq!(angular_part(1.0, 1.0, 1.0), 2.0);
        assert_eq!(angular_part(1.0, 4.0, 1.0), 2.0);
        assert_eq!(angular_part(-1.0, 4.0, -1.0), 2.0);
        assert_eq!(angular_part(-1.0, 2.0, 1.0), 0.0);
        assert_eq!(angular_part(0.0, 1.0, 1.0), 1.0);
        assert_relative_eq!(angular_part(0.5, 2.0, 1.0), 1.125, max_relative = 1e-15);

        for i in 0..=100 {
            let cos_theta = -1.0 + 0.02 * i as f64;
            for &zeta in &[1.0, 2.0, 4.0, 16.0] {
                for &lambda in &[1.0, -1.0] {
                    let value = angular_part(cos_theta, zeta, lambda);
                    assert!((0.0..=2.0).contains(&value));
                }
            }
        }
    }

    #[test]
    fn g4() {
        let function = AngularFunction::G4 { width: 0.01, cutoff: 5.0, zeta: 1.0, lambda: 1.0 };
        let (rij, rik) = (2.0, 3.0);
        let cos_theta = 0.5;
        let rjk = f64::sqrt(rij * rij + rik * rik - 2.0 * rij * rik * cos_theta);

        let expected = 1.5 * f64::exp(-0.01 * (4.0 + 9.0 + 7.0))
            * cutoff(2.0, 5.0) * cutoff(3.0, 5.0) * cutoff(rjk, 5.0);
        assert_relative_eq!(function.compute(rij, rik, rjk, cos_theta), expected, max_relative = 1e-12);

        // third side outside of the cutoff
        assert_eq!(function.compute(rij, rik, 5.5, cos_theta), 0.0);
    }

    #[test]
    fn g5_ignores_third_side() {
        let function = AngularFunction::G5 { width: 0.01, cutoff: 5.0, zeta: 2.0, lambda: -1.0 };
        let value = function.compute(2.0, 3.0, 1.0, -0.3);
        assert_eq!(function.compute(2.0, 3.0, 4.9, -0.3), value);
        assert_eq!(function.compute(2.0, 3.0, 100.0, -0.3), value);

        let expected = 0.5 * 1.3 * 1.3 * f64::exp(-0.01 * 13.0) * cutoff(2.0, 5.0) * cutoff(3.0, 5.0);
        assert_relative_eq!(value, expected, max_relative = 1e-12);
    }

    #[test]
    fn g4_degenerates_to_g5() {
        // with a tiny R_jk, f_c(R_jk) -> 1 and exp(-η R_jk²) -> 1
        let (width, rc, zeta, lambda) = (0.05, 6.0, 2.0, 1.0);
        let g4 = AngularFunction::G4 { width, cutoff: rc, zeta, lambda };
        let g5 = AngularFunction::G5 { width, cutoff: rc, zeta, lambda };

        for &(rij, rik, cos_theta) in &[(1.0, 1.5, 0.9), (2.5, 2.5, 0.99), (4.0, 3.0, 0.2)] {
            let rjk = 1e-6;
            assert_relative_eq!(
                g4.compute(rij, rik, rjk, cos_theta),
                g5.compute(rij, rik, rjk, cos_theta),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn features() {
        let function = AngularFunction::G5 { width: 0.0, cutoff: 4.0, zeta: 1.0, lambda: 1.0 };
        let triplets = [
            Triplet { rij: 1.0, rik: 1.0, rjk: 0.0, cos_theta: 1.0 },
            Triplet { rij: 1.0, rik: 3.0, rjk: 2.0, cos_theta: 1.0 },
            // bond outside of the cutoff
            Triplet { rij: 1.0, rik: 4.5, rjk: 3.5, cos_theta: 1.0 },
        ];

        let expected = 2.0 * cutoff(1.0, 4.0) * cutoff(1.0, 4.0)
                     + 2.0 * cutoff(1.0, 4.0) * cutoff(3.0, 4.0);
        assert_relative_eq!(function.feature(&triplets), expected, max_relative = 1e-12);
        assert_eq!(function.feature(&[]), 0.0);
    }

    #[test]
    fn validation() {
        let function = AngularFunction::G4 { width: 0.1, cutoff: 5.0, zeta: 1.0, lambda: -1.0 };
        assert!(function.validate().is_ok());

        let error = AngularFunction::G4 { width: 0.1, cutoff: 5.0, zeta: 1.0, lambda: 0.5 }.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected lambda to be 1 or -1 for G4 function, got 0.5");

        let error = AngularFunction::G5 { width: 0.1, cutoff: 5.0, zeta: 0.0, lambda: 1.0 }.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected a positive zeta for G5 function, got 0");

        let error = AngularFunction::G5 { width: 0.1, cutoff: -2.0, zeta: 1.0, lambda: 1.0 }.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected a positive cutoff radius, got -2");

        let error = AngularFunction::G5 { width: -0.1, cutoff: 2.0, zeta: 1.0, lambda: 1.0 }.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected a non-negative width for G5 function, got -0.1");
    }
}
