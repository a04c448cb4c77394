//! Atom-centered symmetry functions (Behler-Parrinello descriptors).
//!
//! Each symmetry function maps the neighbor list of a central atom to a single
//! number, by summing the contribution of every neighbor (radial functions
//! G1 to G3) or of every pair of neighbors (angular functions G4 and G5).
//! A [`DescriptorSet`] combines multiple functions into a fixed-size feature
//! vector.

mod radial;
pub use self::radial::RadialFunction;

mod angular;
pub use self::angular::{AngularFunction, angular_part};

mod set;
pub use self::set::DescriptorSet;

use crate::Error;

/// A single symmetry function, either radial or angular
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum SymmetryFunction {
    Radial(RadialFunction),
    Angular(AngularFunction),
}

impl SymmetryFunction {
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            SymmetryFunction::Radial(function) => function.validate(),
            SymmetryFunction::Angular(function) => function.validate(),
        }
    }

    /// Get the name of this function, from "G1" to "G5"
    pub fn name(&self) -> &'static str {
        match self {
            SymmetryFunction::Radial(RadialFunction::G1 { .. }) => "G1",
            SymmetryFunction::Radial(RadialFunction::G2 { .. }) => "G2",
            SymmetryFunction::Radial(RadialFunction::G3 { .. }) => "G3",
            SymmetryFunction::Angular(function) => function.name(),
        }
    }

    /// Get the cutoff radius of this function
    pub fn cutoff(&self) -> f64 {
        match self {
            SymmetryFunction::Radial(function) => function.cutoff(),
            SymmetryFunction::Angular(function) => function.cutoff(),
        }
    }

    /// Is this an angular function, requiring angles between neighbors?
    pub fn is_angular(&self) -> bool {
        matches!(self, SymmetryFunction::Angular(_))
    }
}

impl From<RadialFunction> for SymmetryFunction {
    fn from(function: RadialFunction) -> SymmetryFunction {
        SymmetryFunction::Radial(function)
    }
}

impl From<AngularFunction> for SymmetryFunction {
    fn from(function: AngularFunction) -> SymmetryFunction {
        SymmetryFunction::Angular(function)
    }
}

/// Which angular function should be created from angular parameters. Both G4
/// and G5 use the same `(width, cutoff, zeta, lambda)` parameters, so this can
/// not be deduced from the parameters alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum AngularKind {
    #[default]
    G4,
    G5,
}

impl AngularKind {
    /// Create the corresponding angular function with the given parameters
    pub fn create(self, width: f64, cutoff: f64, zeta: f64, lambda: f64) -> AngularFunction {
        match self {
            AngularKind::G4 => AngularFunction::G4 { width, cutoff, zeta, lambda },
            AngularKind::G5 => AngularFunction::G5 { width, cutoff, zeta, lambda },
        }
    }

    /// Get the kind of an existing angular function
    pub fn of(function: &AngularFunction) -> AngularKind {
        match function {
            AngularFunction::G4 { .. } => AngularKind::G4,
            AngularFunction::G5 { .. } => AngularKind::G5,
        }
    }
}

impl std::str::FromStr for AngularKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<AngularKind, Error> {
        match value {
            "G4" | "g4" => Ok(AngularKind::G4),
            "G5" | "g5" => Ok(AngularKind::G5),
            _ => Err(Error::InvalidParameter(format!(
                "unknown angular symmetry function '{}', expected G4 or G5", value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json() {
        let function: SymmetryFunction = serde_json::from_str(
            r#"{"type": "G4", "width": 0.01, "cutoff": 5.0, "zeta": 2.0, "lambda": -1.0}"#
        ).unwrap();
        assert_eq!(function.name(), "G4");
        assert!(function.is_angular());
        assert_eq!(function.cutoff(), 5.0);

        let function: SymmetryFunction = serde_json::from_str(r#"{"type": "G1", "cutoff": 3.0}"#).unwrap();
        assert_eq!(function, SymmetryFunction::Radial(RadialFunction::G1 { cutoff: 3.0 }));
        assert!(!function.is_angular());
    }

    #[test]
    fn angular_kind() {
        assert_eq!("G5".parse::<AngularKind>().unwrap(), AngularKind::G5);
        assert_eq!("g4".parse::<AngularKind>().unwrap(), AngularKind::G4);
        assert!("G2".parse::<AngularKind>().is_err());

        let function = AngularKind::G5.create(0.1, 4.0, 1.0, -1.0);
        assert_eq!(function, AngularFunction::G5 { width: 0.1, cutoff: 4.0, zeta: 1.0, lambda: -1.0 });
        assert_eq!(AngularKind::of(&function), AngularKind::G5);
    }
}
