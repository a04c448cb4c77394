//! Empirical potentials used to attach a reference energy to each sampled
//! neighbor geometry.
use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::{Error, NeighborGeometry, Vector3D};

mod lennard_jones;
pub use self::lennard_jones::LennardJones;

mod stillinger_weber;
pub use self::stillinger_weber::StillingerWeber;

/// An interatomic potential, giving the energy of a central atom from the
/// geometry of its neighbors.
pub trait Potential: Send + Sync + std::fmt::Debug {
    /// Get the name of this potential
    fn name(&self) -> &'static str;

    /// Largest distance at which a neighbor still contributes to the energy
    fn cutoff(&self) -> f64;

    /// Energy of the central atom surrounded by the neighbors in `geometry`
    fn energy(&self, geometry: &NeighborGeometry) -> Result<f64, Error>;

    /// Force acting on the central atom, i.e. minus the gradient of `energy`
    /// with respect to the position of the central atom. This requires the
    /// Cartesian offsets to the neighbors.
    fn force(&self, geometry: &NeighborGeometry) -> Result<Vector3D, Error>;
}

/// Neighbors sitting on top of the central atom make all potentials diverge
#[allow(clippy::float_cmp)]
fn check_overlap(distances: &[f64], name: &str) -> Result<(), Error> {
    if let Some(neighbor) = distances.iter().position(|&r| r == 0.0) {
        return Err(Error::Shape(format!(
            "neighbor {} is on top of the central atom, {} is not defined at zero distance",
            neighbor, name
        )));
    }
    Ok(())
}

fn check_finite(value: f64, name: &str, what: &str) -> Result<f64, Error> {
    if !value.is_finite() {
        return Err(Error::Shape(format!(
            "{} {} is not finite ({}), some neighbors are too close to the central atom",
            name, what, value
        )));
    }
    Ok(value)
}

/// Get the Cartesian offsets in `geometry`, and their norms
fn offsets<'a>(geometry: &'a NeighborGeometry, name: &str) -> Result<(&'a [Vector3D], Vec<f64>), Error> {
    match geometry {
        NeighborGeometry::Cartesian(offsets) => {
            let distances = offsets.iter().map(|v| v.norm()).collect::<Vec<_>>();
            check_overlap(&distances, name)?;
            Ok((offsets.as_slice(), distances))
        }
        _ => Err(Error::Shape(format!(
            "{} forces require the Cartesian offsets to the neighbors", name
        ))),
    }
}

/// Force on the central atom from central finite differences of the energy
#[cfg(test)]
pub(crate) fn finite_differences_force(potential: &dyn Potential, offsets: &[Vector3D]) -> Vector3D {
    let delta = 1e-6;
    let mut force = Vector3D::zero();
    for direction in 0..3 {
        let mut shift = Vector3D::zero();
        shift[direction] = delta;

        // moving the central atom by -δ moves all offsets by +δ
        let plus = offsets.iter().map(|&v| v + shift).collect();
        let minus = offsets.iter().map(|&v| v - shift).collect();
        let e_plus = potential.energy(&NeighborGeometry::Cartesian(plus)).unwrap();
        let e_minus = potential.energy(&NeighborGeometry::Cartesian(minus)).unwrap();
        force[direction] = (e_plus - e_minus) / (2.0 * delta);
    }
    return force;
}

/// Hyper-parameters of the available potentials, used in configuration files
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum PotentialParameters {
    LennardJones(LennardJones),
    StillingerWeber(StillingerWeber),
}

impl Default for PotentialParameters {
    fn default() -> PotentialParameters {
        PotentialParameters::StillingerWeber(StillingerWeber::silicon())
    }
}

impl PotentialParameters {
    /// Validate the parameters and create the corresponding potential
    pub fn build(self) -> Result<Box<dyn Potential>, Error> {
        match self {
            PotentialParameters::LennardJones(potential) => {
                potential.validate()?;
                Ok(Box::new(potential))
            }
            PotentialParameters::StillingerWeber(potential) => {
                potential.validate()?;
                Ok(Box::new(potential))
            }
        }
    }
}

type PotentialCreator = fn(&str) -> Result<Box<dyn Potential>, Error>;

macro_rules! add_potential {
    ($map :expr, $name :literal, $type :ty) => (
        $map.insert($name, (|json| {
            let potential = serde_json::from_str::<$type>(json)?;
            potential.validate()?;
            Ok(Box::new(potential))
        }) as PotentialCreator);
    );
}

static REGISTERED_POTENTIALS: Lazy<BTreeMap<&'static str, PotentialCreator>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    add_potential!(map, "lennard_jones", LennardJones);
    add_potential!(map, "stillinger_weber", StillingerWeber);
    return map;
});

/// Create a new potential with the given `name` and `parameters`, formatted
/// as JSON.
///
/// The available potentials are `"lennard_jones"` and `"stillinger_weber"`.
pub fn create(name: &str, parameters: &str) -> Result<Box<dyn Potential>, Error> {
    let creator = match REGISTERED_POTENTIALS.get(name) {
        Some(creator) => creator,
        None => {
            return Err(Error::InvalidParameter(
                format!("unknown potential with name '{}'", name)
            ));
        }
    };

    return creator(parameters);
}
