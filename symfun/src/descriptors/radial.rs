use ndarray::{Array1, ArrayView1};

use crate::Error;
use crate::math::cutoff;

/// Radial symmetry functions, depending only on the distance `R_ij` between
/// the central atom and one of its neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(tag = "type")]
pub enum RadialFunction {
    /// Plain cutoff function, `f_c(R_ij)`
    G1 {
        /// Cutoff radius
        cutoff: f64,
    },
    /// Gaussian centered at `center`, `exp(-width (R_ij - center)^2) f_c(R_ij)`
    G2 {
        /// Width η of the gaussian
        width: f64,
        /// Cutoff radius
        cutoff: f64,
        /// Center of the gaussian
        center: f64,
    },
    /// Damped cosine, `cos(kappa R_ij) f_c(R_ij)`
    G3 {
        /// Cutoff radius
        cutoff: f64,
        /// Wavenumber of the oscillations
        kappa: f64,
    },
}

impl RadialFunction {
    pub fn validate(&self) -> Result<(), Error> {
        check_cutoff(self.cutoff())?;
        match *self {
            RadialFunction::G1 { .. } => {},
            RadialFunction::G2 { width, center, .. } => {
                if width < 0.0 || !width.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected a non-negative width for G2 function, got {}", width
                    )));
                }

                if !center.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected a finite center for G2 function, got {}", center
                    )));
                }
            },
            RadialFunction::G3 { kappa, .. } => {
                if !kappa.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "expected a finite kappa for G3 function, got {}", kappa
                    )));
                }
            },
        }
        return Ok(());
    }

    /// Get the cutoff radius of this function
    pub fn cutoff(&self) -> f64 {
        match *self {
            RadialFunction::G1 { cutoff } |
            RadialFunction::G2 { cutoff, .. } |
            RadialFunction::G3 { cutoff, .. } => cutoff,
        }
    }

    /// Evaluate the contribution of a single neighbor at distance `rij`
    #[inline]
    pub fn compute(&self, rij: f64) -> f64 {
        match *self {
            RadialFunction::G1 { cutoff: rc } => cutoff(rij, rc),
            RadialFunction::G2 { width, cutoff: rc, center } => {
                let delta = rij - center;
                f64::exp(-width * delta * delta) * cutoff(rij, rc)
            },
            RadialFunction::G3 { cutoff: rc, kappa } => {
                f64::cos(kappa * rij) * cutoff(rij, rc)
            },
        }
    }

    /// Evaluate the contribution of every neighbor in `distances`
    pub fn compute_array(&self, distances: ArrayView1<'_, f64>) -> Array1<f64> {
        distances.mapv(|rij| self.compute(rij))
    }

    /// Sum the contributions of all neighbors. Neighbors outside of the cutoff
    /// do not contribute.
    pub fn feature(&self, distances: &[f64]) -> f64 {
        distances.iter().map(|&rij| self.compute(rij)).sum()
    }
}

pub(crate) fn check_cutoff(cutoff: f64) -> Result<(), Error> {
    if cutoff <= 0.0 || !cutoff.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "expected a positive cutoff radius, got {}", cutoff
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn g1() {
        let function = RadialFunction::G1 { cutoff: 5.0 };
        assert_eq!(function.compute(0.0), 1.0);
        assert_relative_eq!(function.compute(2.0), 0.6545084971874737, max_relative = 1e-12);
        assert_eq!(function.compute(5.0), 0.0);
        assert_eq!(function.compute(6.0), 0.0);
    }

    #[test]
    fn g2() {
        let function = RadialFunction::G2 { width: 0.1, cutoff: 5.0, center: 2.0 };
        // exp(-0.1) * f_c(3, 5)
        assert_relative_eq!(function.compute(3.0), 0.31261363935824976, max_relative = 1e-12);
        assert_eq!(function.compute(5.0), 0.0);

        // zero distance is a valid input
        let expected = f64::exp(-0.4);
        assert_relative_eq!(function.compute(0.0), expected, max_relative = 1e-12);
    }

    #[test]
    fn g2_small_width_limit() {
        let g1 = RadialFunction::G1 { cutoff: 4.0 };
        let g2 = RadialFunction::G2 { width: 0.0, cutoff: 4.0, center: 0.0 };
        let tiny = RadialFunction::G2 { width: 1e-9, cutoff: 4.0, center: 0.0 };

        for &r in &[0.0, 0.5, 1.7, 3.2, 3.99, 4.5] {
            assert_eq!(g2.compute(r), g1.compute(r));
            assert_relative_eq!(tiny.compute(r), g1.compute(r), max_relative = 1e-7);
        }
    }

    #[test]
    fn g3() {
        let function = RadialFunction::G3 { cutoff: 5.0, kappa: 1.5 };
        let expected = f64::cos(3.0) * 0.6545084971874737;
        assert_relative_eq!(function.compute(2.0), expected, max_relative = 1e-12);
        assert_eq!(function.compute(7.0), 0.0);
    }

    #[test]
    fn arrays_and_features() {
        let function = RadialFunction::G2 { width: 0.5, cutoff: 4.0, center: 2.0 };
        let distances = array![1.0, 3.0, 4.5];

        let values = function.compute_array(distances.view());
        assert_eq!(values.len(), 3);
        for (value, &r) in values.iter().zip(&distances) {
            assert_eq!(*value, function.compute(r));
        }
        assert_eq!(values[2], 0.0);

        let feature = function.feature(distances.as_slice().unwrap());
        assert_relative_eq!(feature, values.sum(), max_relative = 1e-15);
    }

    #[test]
    fn validation() {
        assert!(RadialFunction::G1 { cutoff: 1.0 }.validate().is_ok());
        assert!(RadialFunction::G2 { width: 0.0, cutoff: 1.0, center: 0.0 }.validate().is_ok());

        let error = RadialFunction::G1 { cutoff: 0.0 }.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected a positive cutoff radius, got 0");

        let error = RadialFunction::G2 { width: -1.0, cutoff: 1.0, center: 0.0 }.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected a non-negative width for G2 function, got -1");

        assert!(RadialFunction::G2 { width: 1.0, cutoff: f64::NAN, center: 0.0 }.validate().is_err());
        assert!(RadialFunction::G3 { cutoff: 3.0, kappa: f64::INFINITY }.validate().is_err());
    }

    #[test]
    fn json() {
        let function: RadialFunction = serde_json::from_str(
            r#"{"type": "G2", "width": 0.5, "cutoff": 4.0, "center": 2.0}"#
        ).unwrap();
        assert_eq!(function, RadialFunction::G2 { width: 0.5, cutoff: 4.0, center: 2.0 });

        let json = serde_json::to_string(&RadialFunction::G3 { cutoff: 3.0, kappa: 2.0 }).unwrap();
        assert_eq!(json, r#"{"type":"G3","cutoff":3.0,"kappa":2.0}"#);

        let error = serde_json::from_str::<RadialFunction>(r#"{"type": "G7", "cutoff": 4.0}"#);
        assert!(error.is_err());
    }
}
