use crate::{Error, NeighborGeometry, Vector3D};
use super::{check_finite, check_overlap, offsets, Potential};

/// Lennard-Jones pair potential `4ε((σ/r)^12 - (σ/r)^6)`, summed over all
/// neighbors of the central atom.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LennardJones {
    /// depth of the potential well
    pub epsilon: f64,
    /// distance at which the pair energy is zero
    pub sigma: f64,
    /// neighbors further than this distance are ignored. The potential is not
    /// shifted, and is discontinuous at the cutoff.
    #[serde(default)]
    pub cutoff: Option<f64>,
}

impl LennardJones {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected a non-negative epsilon for Lennard-Jones, got {}", self.epsilon
            )));
        }

        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected a positive sigma for Lennard-Jones, got {}", self.sigma
            )));
        }

        if let Some(cutoff) = self.cutoff {
            if !(cutoff.is_finite() && cutoff > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "expected a positive cutoff for Lennard-Jones, got {}", cutoff
                )));
            }
        }

        Ok(())
    }

    /// Energy of a single pair at distance `r`
    pub fn pair_energy(&self, r: f64) -> f64 {
        if r >= self.cutoff() {
            return 0.0;
        }

        let s6 = (self.sigma / r).powi(6);
        return 4.0 * self.epsilon * (s6 * s6 - s6);
    }

    /// Derivative of the pair energy with respect to `r`
    pub fn pair_gradient(&self, r: f64) -> f64 {
        if r >= self.cutoff() {
            return 0.0;
        }

        let s6 = (self.sigma / r).powi(6);
        return 24.0 * self.epsilon * (s6 - 2.0 * s6 * s6) / r;
    }
}

impl Potential for LennardJones {
    fn name(&self) -> &'static str {
        "lennard_jones"
    }

    fn cutoff(&self) -> f64 {
        self.cutoff.unwrap_or(f64::INFINITY)
    }

    fn energy(&self, geometry: &NeighborGeometry) -> Result<f64, Error> {
        geometry.validate()?;
        let distances = geometry.distances();
        check_overlap(&distances, "Lennard-Jones")?;

        let energy = distances.iter().map(|&r| self.pair_energy(r)).sum();
        return check_finite(energy, "Lennard-Jones", "energy");
    }

    fn force(&self, geometry: &NeighborGeometry) -> Result<Vector3D, Error> {
        geometry.validate()?;
        let (offsets, distances) = offsets(geometry, "Lennard-Jones")?;

        let mut force = Vector3D::zero();
        for (&offset, &r) in offsets.iter().zip(&distances) {
            force += offset * (self.pair_gradient(r) / r);
        }

        for k in 0..3 {
            check_finite(force[k], "Lennard-Jones", "force")?;
        }
        return Ok(force);
    }
}
