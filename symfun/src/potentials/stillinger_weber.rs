use crate::{Error, NeighborGeometry, Vector3D};
use super::{check_finite, check_overlap, offsets, Potential};

/// Stillinger-Weber potential, with a two-body and a three-body term.
///
/// The energy of a central atom `i` is `1/2 Σ_j φ2(r_ij) + Σ_{j<k} φ3(r_ij,
/// r_ik, θ_jik)` where
///
/// - `φ2(r) = A ε (B (σ/r)^p - (σ/r)^q) exp(σ / (r - aσ))`
/// - `φ3 = λ ε (cos θ - cos θ0)² exp(γσ / (r_ij - aσ)) exp(γσ / (r_ik - aσ))`
///
/// and both terms vanish beyond `aσ`. Missing fields default to the original
/// parameters for silicon, in eV and Å.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct StillingerWeber {
    pub epsilon: f64,
    pub sigma: f64,
    /// cutoff, in units of sigma
    pub a: f64,
    /// strength of the three-body term
    pub lambda: f64,
    pub gamma: f64,
    /// cosine of the preferred angle
    pub cos_theta0: f64,
    #[serde(rename = "A")]
    pub big_a: f64,
    #[serde(rename = "B")]
    pub big_b: f64,
    pub p: f64,
    pub q: f64,
}

impl Default for StillingerWeber {
    fn default() -> StillingerWeber {
        StillingerWeber::silicon()
    }
}

impl StillingerWeber {
    /// Parameters for silicon from Stillinger and Weber, Phys. Rev. B 31, 5262
    /// (1985)
    pub fn silicon() -> StillingerWeber {
        StillingerWeber {
            epsilon: 2.1683,
            sigma: 2.0951,
            a: 1.80,
            lambda: 21.0,
            gamma: 1.20,
            cos_theta0: -1.0 / 3.0,
            big_a: 7.049556277,
            big_b: 0.6022245584,
            p: 4.0,
            q: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let values = [
            ("epsilon", self.epsilon), ("sigma", self.sigma), ("a", self.a),
            ("lambda", self.lambda), ("gamma", self.gamma), ("cos_theta0", self.cos_theta0),
            ("A", self.big_a), ("B", self.big_b), ("p", self.p), ("q", self.q),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "Stillinger-Weber parameter {} must be finite, got {}", name, value
                )));
            }
        }

        if self.sigma <= 0.0 || self.a <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "Stillinger-Weber sigma and a must be positive, got sigma={} and a={}",
                self.sigma, self.a
            )));
        }

        if !(-1.0..=1.0).contains(&self.cos_theta0) {
            return Err(Error::InvalidParameter(format!(
                "Stillinger-Weber cos_theta0 must be between -1 and 1, got {}", self.cos_theta0
            )));
        }

        Ok(())
    }

    /// Two-body term for a pair at distance `r`
    pub fn two_body(&self, r: f64) -> f64 {
        let rc = self.cutoff();
        if r >= rc {
            return 0.0;
        }

        let s = self.sigma / r;
        let repulsion = self.big_b * s.powf(self.p) - s.powf(self.q);
        return self.big_a * self.epsilon * repulsion * f64::exp(self.sigma / (r - rc));
    }

    /// Three-body term for bonds of length `rij` and `rik`, with an angle of
    /// cosine `cos_theta` between them
    pub fn three_body(&self, rij: f64, rik: f64, cos_theta: f64) -> f64 {
        let rc = self.cutoff();
        if rij >= rc || rik >= rc {
            return 0.0;
        }

        let gs = self.gamma * self.sigma;
        let angle = cos_theta - self.cos_theta0;
        return self.lambda * self.epsilon * angle * angle
            * f64::exp(gs / (rij - rc))
            * f64::exp(gs / (rik - rc));
    }

    /// Derivative of the two-body term with respect to `r`
    pub fn two_body_gradient(&self, r: f64) -> f64 {
        let rc = self.cutoff();
        if r >= rc {
            return 0.0;
        }

        let s = self.sigma / r;
        let s_p = self.big_b * s.powf(self.p);
        let s_q = s.powf(self.q);
        let repulsion = s_p - s_q;
        let repulsion_gradient = (self.q * s_q - self.p * s_p) / r;
        let exp_gradient = -self.sigma / ((r - rc) * (r - rc));

        let exp = f64::exp(self.sigma / (r - rc));
        return self.big_a * self.epsilon * exp * (repulsion_gradient + repulsion * exp_gradient);
    }

    /// Derivatives of the three-body term with respect to `rij`, `rik` and
    /// `cos_theta`
    pub fn three_body_gradient(&self, rij: f64, rik: f64, cos_theta: f64) -> [f64; 3] {
        let rc = self.cutoff();
        if rij >= rc || rik >= rc {
            return [0.0; 3];
        }

        let gs = self.gamma * self.sigma;
        let angle = cos_theta - self.cos_theta0;
        let exp = f64::exp(gs / (rij - rc)) * f64::exp(gs / (rik - rc));
        let energy = self.lambda * self.epsilon * angle * angle * exp;

        return [
            -energy * gs / ((rij - rc) * (rij - rc)),
            -energy * gs / ((rik - rc) * (rik - rc)),
            2.0 * self.lambda * self.epsilon * angle * exp,
        ];
    }
}

impl Potential for StillingerWeber {
    fn name(&self) -> &'static str {
        "stillinger_weber"
    }

    fn cutoff(&self) -> f64 {
        self.a * self.sigma
    }

    #[time_graph::instrument(name = "StillingerWeber::energy")]
    fn energy(&self, geometry: &NeighborGeometry) -> Result<f64, Error> {
        geometry.validate()?;

        let distances = geometry.distances();
        check_overlap(&distances, "Stillinger-Weber")?;

        let two_body = distances.iter()
            .map(|&r| self.two_body(r))
            .sum::<f64>();

        let three_body = geometry.triplets()?.iter()
            .map(|t| self.three_body(t.rij, t.rik, t.cos_theta))
            .sum::<f64>();

        return check_finite(0.5 * two_body + three_body, "Stillinger-Weber", "energy");
    }

    #[time_graph::instrument(name = "StillingerWeber::force")]
    fn force(&self, geometry: &NeighborGeometry) -> Result<Vector3D, Error> {
        geometry.validate()?;
        let (offsets, distances) = offsets(geometry, "Stillinger-Weber")?;

        // the force on the central atom is the sum of the energy gradients
        // with respect to all offsets
        let mut force = Vector3D::zero();
        for (&offset, &r) in offsets.iter().zip(&distances) {
            force += offset * (0.5 * self.two_body_gradient(r) / r);
        }

        let rc = self.cutoff();
        for j in 0..offsets.len() {
            let (vj, rj) = (offsets[j], distances[j]);
            if rj >= rc {
                continue;
            }

            for k in (j + 1)..offsets.len() {
                let (vk, rk) = (offsets[k], distances[k]);
                if rk >= rc {
                    continue;
                }

                let cos_theta = f64::clamp(vj * vk / (rj * rk), -1.0, 1.0);
                let [d_rij, d_rik, d_cos] = self.three_body_gradient(rj, rk, cos_theta);

                let d_cos_j = vk / (rj * rk) - vj * (cos_theta / (rj * rj));
                let d_cos_k = vj / (rj * rk) - vk * (cos_theta / (rk * rk));

                force += vj * (d_rij / rj) + d_cos_j * d_cos;
                force += vk * (d_rik / rk) + d_cos_k * d_cos;
            }
        }

        for k in 0..3 {
            check_finite(force[k], "Stillinger-Weber", "force")?;
        }
        return Ok(force);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::Vector3D;
    use super::*;

    #[test]
    fn two_body() {
        let sw = StillingerWeber::silicon();
        assert_relative_eq!(sw.cutoff(), 3.77118, max_relative = 1e-12);
        assert_eq!(sw.two_body(3.8), 0.0);
        assert_eq!(sw.two_body(sw.cutoff()), 0.0);

        // the pair energy at the diamond bond length is -ε
        let bond = f64::sqrt(3.0) / 4.0 * 5.431;
        assert_relative_eq!(sw.two_body(bond), -2.1682999975198824, max_relative = 1e-9);
    }

    #[test]
    fn three_body() {
        let sw = StillingerWeber::silicon();
        assert_eq!(sw.three_body(2.3, 2.4, -1.0 / 3.0), 0.0);
        assert_eq!(sw.three_body(2.3, 3.9, 0.0), 0.0);
        assert_relative_eq!(sw.three_body(2.3, 2.4, 0.0), 0.1464285837587943, max_relative = 1e-9);
    }

    #[test]
    fn energy() {
        let sw = StillingerWeber::silicon();

        // two neighbors at right angle, at 2.3 and 2.4
        let geometry = NeighborGeometry::Cartesian(vec![
            Vector3D::new(2.3, 0.0, 0.0),
            Vector3D::new(0.0, 2.4, 0.0),
        ]);
        assert_relative_eq!(sw.energy(&geometry).unwrap(), -2.0088937097276034, max_relative = 1e-9);

        let error = sw.energy(&NeighborGeometry::Distances(vec![2.3, 2.4])).unwrap_err();
        assert!(matches!(error, Error::Shape(_)));
    }

    #[test]
    fn overlapping_neighbors() {
        let sw = StillingerWeber::silicon();
        let geometry = NeighborGeometry::Cartesian(vec![
            Vector3D::zero(),
            Vector3D::new(2.3, 0.0, 0.0),
        ]);

        let error = sw.energy(&geometry).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid neighbor geometry: neighbor 0 is on top of the central atom, \
            Stillinger-Weber is not defined at zero distance"
        );
        assert!(matches!(sw.force(&geometry), Err(Error::Shape(_))));
    }

    #[test]
    fn gradients() {
        let sw = StillingerWeber::silicon();
        let delta = 1e-6;

        for r in [2.1, 2.35, 3.0, 3.7] {
            let expected = (sw.two_body(r + delta) - sw.two_body(r - delta)) / (2.0 * delta);
            assert_relative_eq!(sw.two_body_gradient(r), expected, max_relative = 1e-6, epsilon = 1e-8);
        }
        assert_eq!(sw.two_body_gradient(3.8), 0.0);

        let [d_rij, d_rik, d_cos] = sw.three_body_gradient(2.3, 2.6, 0.2);
        let expected = [
            (sw.three_body(2.3 + delta, 2.6, 0.2) - sw.three_body(2.3 - delta, 2.6, 0.2)) / (2.0 * delta),
            (sw.three_body(2.3, 2.6 + delta, 0.2) - sw.three_body(2.3, 2.6 - delta, 0.2)) / (2.0 * delta),
            (sw.three_body(2.3, 2.6, 0.2 + delta) - sw.three_body(2.3, 2.6, 0.2 - delta)) / (2.0 * delta),
        ];
        assert_relative_eq!(d_rij, expected[0], max_relative = 1e-6);
        assert_relative_eq!(d_rik, expected[1], max_relative = 1e-6);
        assert_relative_eq!(d_cos, expected[2], max_relative = 1e-6);
    }

    #[test]
    fn force() {
        let sw = StillingerWeber::silicon();
        let offsets = vec![
            Vector3D::new(2.3, 0.1, 0.0),
            Vector3D::new(-0.4, 2.2, 0.5),
            Vector3D::new(0.3, -0.8, 2.1),
            // outside of the cutoff
            Vector3D::new(0.0, 0.0, -4.0),
        ];

        let force = sw.force(&NeighborGeometry::Cartesian(offsets.clone())).unwrap();
        let expected = super::super::finite_differences_force(&sw, &offsets);
        for k in 0..3 {
            assert_relative_eq!(force[k], expected[k], max_relative = 1e-6, epsilon = 1e-7);
        }

        let error = sw.force(&NeighborGeometry::Distances(vec![2.3])).unwrap_err();
        assert!(matches!(error, Error::Shape(_)));
    }

    #[test]
    fn json() {
        let sw: StillingerWeber = serde_json::from_str(r#"{"epsilon": 1.0, "A": 5.0}"#).unwrap();
        assert_eq!(sw.epsilon, 1.0);
        assert_eq!(sw.big_a, 5.0);
        assert_eq!(sw.sigma, 2.0951);

        let error = serde_json::from_str::<StillingerWeber>(r#"{"epsilon": 1.0, "c": 5.0}"#);
        assert!(error.is_err());

        let sw = StillingerWeber { cos_theta0: 2.0, ..StillingerWeber::silicon() };
        assert!(sw.validate().is_err());
    }
}
