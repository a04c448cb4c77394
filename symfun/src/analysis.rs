//! Tools to inspect training data and symmetry function parameters before
//! training.
use ndarray::{Array1, ArrayView2};

use crate::descriptors::{angular_part, DescriptorSet, SymmetryFunction};
use crate::{Error, NeighborGeometry};

/// Summary of the distribution of symmetry function values
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Serialize)]
pub struct FeatureStatistics {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// fraction of the values that are exactly zero, usually because no
    /// neighbor is inside the cutoff
    pub zero_fraction: f64,
}

impl FeatureStatistics {
    /// Compute statistics over all values in `features`
    #[allow(clippy::float_cmp)]
    pub fn compute(features: ArrayView2<f64>) -> Result<FeatureStatistics, Error> {
        if features.is_empty() {
            return Err(Error::InvalidParameter(
                "can not compute statistics of an empty feature array".into()
            ));
        }

        let count = features.len() as f64;
        let zeros = features.iter().filter(|&&v| v == 0.0).count();

        return Ok(FeatureStatistics {
            mean: features.sum() / count,
            max: features.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min: features.iter().copied().fold(f64::INFINITY, f64::min),
            zero_fraction: zeros as f64 / count,
        });
    }
}

/// Histogram with bins of equal width
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` edges of the bins, in increasing order
    pub edges: Vec<f64>,
    /// number of values in each bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Create a histogram of `values` between their min and max. The last bin
    /// includes its upper edge.
    pub fn new(values: &[f64], bins: usize) -> Result<Histogram, Error> {
        if bins == 0 {
            return Err(Error::InvalidParameter("histogram needs at least one bin".into()));
        }

        if values.is_empty() {
            return Err(Error::InvalidParameter(
                "can not compute the histogram of an empty set of values".into()
            ));
        }

        if let Some(value) = values.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "can not compute the histogram of non-finite values, got {}", value
            )));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= min {
            max = min + 1.0;
        }

        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + i as f64 * width).collect();

        let mut counts = vec![0; bins];
        for &value in values {
            let bin = usize::min(((value - min) / width) as usize, bins - 1);
            counts[bin] += 1;
        }

        return Ok(Histogram { edges, counts });
    }
}

/// Histogram of the distances between central atoms and their neighbors
pub fn distance_histogram(geometries: &[NeighborGeometry], bins: usize) -> Result<Histogram, Error> {
    let mut distances = Vec::new();
    for geometry in geometries {
        geometry.validate()?;
        distances.extend_from_slice(&geometry.distances());
    }

    return Histogram::new(&distances, bins);
}

/// Values of the angular part `2^(1-ζ) (1 + λ cos θ)^ζ` of G4/G5 functions,
/// for `points` angles evenly spaced in `[0, 2π]`.
///
/// Returns the angles and the corresponding values.
pub fn angular_curve(zeta: f64, lambda: f64, points: usize) -> (Array1<f64>, Array1<f64>) {
    let theta = Array1::linspace(0.0, 2.0 * std::f64::consts::PI, points);
    let values = theta.mapv(|t: f64| angular_part(t.cos(), zeta, lambda));
    return (theta, values);
}

/// Angular curves of all G4/G5 functions in `set`, in the same order as the
/// functions
pub fn angular_curves(set: &DescriptorSet, points: usize) -> Vec<(Array1<f64>, Array1<f64>)> {
    set.functions().iter()
        .filter_map(|function| match function {
            SymmetryFunction::Angular(angular) => {
                let (_, _, zeta, lambda) = angular.parameters();
                Some(angular_curve(zeta, lambda, points))
            }
            SymmetryFunction::Radial(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use crate::{AngularFunction, RadialFunction};
    use super::*;

    #[test]
    fn statistics() {
        let features = array![[0.0, 1.0], [3.0, 0.0], [2.0, 0.0]];
        let statistics = FeatureStatistics::compute(features.view()).unwrap();
        assert_eq!(statistics.mean, 1.0);
        assert_eq!(statistics.max, 3.0);
        assert_eq!(statistics.min, 0.0);
        assert_eq!(statistics.zero_fraction, 0.5);

        let empty = ndarray::Array2::<f64>::zeros((0, 3));
        assert!(FeatureStatistics::compute(empty.view()).is_err());
    }

    #[test]
    fn histogram() {
        let histogram = Histogram::new(&[1.0, 1.5, 2.0, 2.9, 3.0], 4).unwrap();
        assert_eq!(histogram.edges, [1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(histogram.counts, [1, 1, 1, 2]);

        let histogram = Histogram::new(&[2.0, 2.0], 2).unwrap();
        assert_eq!(histogram.counts, [2, 0]);

        assert!(Histogram::new(&[], 2).is_err());
        assert!(Histogram::new(&[1.0], 0).is_err());
    }

    #[test]
    fn histogram_non_finite() {
        let error = Histogram::new(&[1.0, f64::NAN, 2.0], 2).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: can not compute the histogram of non-finite values, got NaN"
        );

        let error = Histogram::new(&[1.0, f64::INFINITY], 2).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }

    #[test]
    fn distances() {
        let geometries = [
            NeighborGeometry::Distances(vec![1.0, 2.0]),
            NeighborGeometry::Distances(vec![]),
            NeighborGeometry::Distances(vec![3.0, 2.5]),
        ];
        let histogram = distance_histogram(&geometries, 2).unwrap();
        assert_eq!(histogram.counts, [1, 3]);
        assert_eq!(histogram.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn angular() {
        let (theta, values) = angular_curve(1.0, 1.0, 5);
        assert_eq!(theta.len(), 5);
        assert_relative_eq!(theta[4], 2.0 * std::f64::consts::PI);
        // 1 + cos θ
        assert_relative_eq!(values[0], 2.0);
        assert_relative_eq!(values[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(values[4], 2.0);

        let set = DescriptorSet::new(vec![
            RadialFunction::G1 { cutoff: 5.0 }.into(),
            AngularFunction::G5 { width: 0.01, cutoff: 5.0, zeta: 2.0, lambda: -1.0 }.into(),
        ]).unwrap();
        let curves = angular_curves(&set, 3);
        assert_eq!(curves.len(), 1);
        // 2^(1 - 2) (1 - cos π)^2 = 2
        assert_relative_eq!(curves[0].1[1], 2.0);
    }
}
