//! Sources of neighbor geometries: random configurations, and neighbour lists
//! dumped from molecular dynamics simulations.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, NeighborGeometry, Vector3D};

mod neighbour_file;
pub use self::neighbour_file::{NeighbourData, parse_neighbour_data, read_neighbour_file};

fn default_max_neighbors() -> usize { 10 }

/// Parameters for the generation of random neighbor geometries
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SamplerParameters {
    /// Smallest distance between the central atom and a neighbor
    pub min_distance: f64,
    /// Largest distance between the central atom and a neighbor
    pub max_distance: f64,
    /// Number of neighbors in each configuration
    #[serde(default = "default_max_neighbors")]
    pub max_neighbors: usize,
    /// Should the number of neighbors be drawn uniformly between 1 and
    /// `max_neighbors` for each configuration?
    #[serde(default)]
    pub varying_neighbors: bool,
    /// Seed of the random number generator
    #[serde(default)]
    pub seed: u64,
}

impl SamplerParameters {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected a non-negative min_distance, got {}", self.min_distance
            )));
        }

        if !(self.max_distance.is_finite() && self.max_distance > self.min_distance) {
            return Err(Error::InvalidParameter(format!(
                "max_distance ({}) must be larger than min_distance ({})",
                self.max_distance, self.min_distance
            )));
        }

        if self.max_neighbors == 0 {
            return Err(Error::InvalidParameter(
                "max_neighbors must be at least 1".into()
            ));
        }

        Ok(())
    }
}

/// Generator of random neighbor geometries, with neighbors uniformly
/// distributed in the spherical shell between `min_distance` and
/// `max_distance` around the central atom.
pub struct Sampler {
    parameters: SamplerParameters,
    rng: StdRng,
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler").field("parameters", &self.parameters).finish_non_exhaustive()
    }
}

impl Sampler {
    /// Create a new sampler. Two samplers with the same parameters (including
    /// the seed) produce the same geometries.
    pub fn new(parameters: SamplerParameters) -> Result<Sampler, Error> {
        parameters.validate()?;
        let rng = StdRng::seed_from_u64(parameters.seed);
        return Ok(Sampler {
            parameters: parameters,
            rng: rng,
        });
    }

    pub fn parameters(&self) -> &SamplerParameters {
        &self.parameters
    }

    /// Draw a single random point in the shell
    fn neighbor(&mut self) -> Vector3D {
        let rmin3 = self.parameters.min_distance.powi(3);
        let rmax3 = self.parameters.max_distance.powi(3);

        // uniform in volume, not in radius
        let u: f64 = self.rng.gen();
        let r = f64::cbrt(rmin3 + u * (rmax3 - rmin3));

        let cos_theta: f64 = self.rng.gen_range(-1.0..=1.0);
        let sin_theta = f64::sqrt(1.0 - cos_theta * cos_theta);
        let phi: f64 = self.rng.gen_range(0.0..(2.0 * std::f64::consts::PI));

        return Vector3D::new(
            r * sin_theta * phi.cos(),
            r * sin_theta * phi.sin(),
            r * cos_theta,
        );
    }

    /// Generate the next random geometry
    pub fn sample(&mut self) -> NeighborGeometry {
        let count = if self.parameters.varying_neighbors {
            self.rng.gen_range(1..=self.parameters.max_neighbors)
        } else {
            self.parameters.max_neighbors
        };

        let neighbors = (0..count).map(|_| self.neighbor()).collect();
        return NeighborGeometry::Cartesian(neighbors);
    }

    /// Generate `count` random geometries
    pub fn samples(&mut self, count: usize) -> Vec<NeighborGeometry> {
        (0..count).map(|_| self.sample()).collect()
    }
}
