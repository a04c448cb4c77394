use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::{Error, NeighborGeometry};
use super::SymmetryFunction;

/// An ordered list of symmetry functions, producing one feature per function
/// for each central atom.
///
/// All functions are validated when the set is created, and the set is
/// immutable afterward. Feature `i` of the output always corresponds to
/// function `i` of the set.
#[derive(Debug, Clone, PartialEq, Default)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "Vec<SymmetryFunction>", into = "Vec<SymmetryFunction>")]
pub struct DescriptorSet {
    functions: Vec<SymmetryFunction>,
}

impl TryFrom<Vec<SymmetryFunction>> for DescriptorSet {
    type Error = Error;

    fn try_from(functions: Vec<SymmetryFunction>) -> Result<DescriptorSet, Error> {
        DescriptorSet::new(functions)
    }
}

impl From<DescriptorSet> for Vec<SymmetryFunction> {
    fn from(set: DescriptorSet) -> Vec<SymmetryFunction> {
        set.functions
    }
}

impl DescriptorSet {
    /// Create a new set containing the given `functions`, after checking that
    /// all their parameters are valid.
    pub fn new(functions: Vec<SymmetryFunction>) -> Result<DescriptorSet, Error> {
        for (i, function) in functions.iter().enumerate() {
            function.validate().map_err(|error| match error {
                Error::InvalidParameter(message) => Error::InvalidParameter(format!(
                    "symmetry function {} ({}): {}", i, function.name(), message
                )),
                error => error,
            })?;
        }

        Ok(DescriptorSet { functions })
    }

    /// Create a new set from its JSON representation, a list of functions
    /// like `[{"type": "G2", "width": 0.1, "cutoff": 5.0, "center": 0.0}]`
    pub fn from_json(json: &str) -> Result<DescriptorSet, Error> {
        let functions: Vec<SymmetryFunction> = serde_json::from_str(json)?;
        return DescriptorSet::new(functions);
    }

    /// Get the JSON representation of this set
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.functions).expect("failed to serialize to JSON")
    }

    /// Get the functions in this set
    pub fn functions(&self) -> &[SymmetryFunction] {
        &self.functions
    }

    /// Number of functions, i.e. size of the feature vectors
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Get the largest cutoff radius of all functions in this set, or 0 for
    /// an empty set
    pub fn max_cutoff(&self) -> f64 {
        self.functions.iter().map(|f| f.cutoff()).fold(0.0, f64::max)
    }

    /// Does this set contain angular functions?
    pub fn has_angular(&self) -> bool {
        self.functions.iter().any(|f| f.is_angular())
    }

    /// Compute the feature vector of a single central atom with the given
    /// neighbors.
    pub fn compute(&self, geometry: &NeighborGeometry) -> Result<Array1<f64>, Error> {
        geometry.validate()?;

        let distances = geometry.distances();
        let triplets = if self.has_angular() {
            geometry.triplets()?
        } else {
            Vec::new()
        };

        let features = self.functions.iter().map(|function| match function {
            SymmetryFunction::Radial(function) => function.feature(&distances),
            SymmetryFunction::Angular(function) => function.feature(&triplets),
        });

        return Ok(features.collect());
    }

    /// Compute the features of multiple central atoms, one row per entry in
    /// `geometries`. Rows are computed in parallel.
    #[time_graph::instrument(name = "DescriptorSet::compute_many")]
    pub fn compute_many(&self, geometries: &[NeighborGeometry]) -> Result<Array2<f64>, Error> {
        let rows = geometries.par_iter()
            .map(|geometry| self.compute(geometry))
            .collect::<Result<Vec<_>, Error>>()?;

        let mut features = Array2::zeros((geometries.len(), self.len()));
        for (mut output, row) in features.rows_mut().into_iter().zip(&rows) {
            output.assign(row);
        }

        return Ok(features);
    }
}
