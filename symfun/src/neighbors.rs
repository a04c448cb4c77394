//! Geometry of the neighbors around a single central atom.
//!
//! Radial symmetry functions only need the distances between the central atom
//! and its neighbors, while angular functions also need the angle between
//! every pair of neighbors, which can be reconstructed either from the mutual
//! distances between neighbors or from Cartesian offsets.
use std::borrow::Cow;

use ndarray::Array2;

use crate::{Error, Vector3D};

/// Neighbors of a central atom `i`, in a fixed order.
#[derive(Debug, Clone, PartialEq)]
pub enum NeighborGeometry {
    /// Only the distances `R_ij` to every neighbor `j`
    Distances(Vec<f64>),
    /// Distances `R_ij` to every neighbor, and the symmetric matrix of mutual
    /// distances `R_jk` between neighbors. The angle at the central atom is
    /// recovered with the law of cosines.
    Triangles {
        distances: Vec<f64>,
        mutual: Array2<f64>,
    },
    /// Cartesian offsets `r_j - r_i` from the central atom to each neighbor
    Cartesian(Vec<Vector3D>),
}

/// A triplet `(i, j, k)` of the central atom and two of its neighbors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet {
    /// distance between the central atom and the first neighbor
    pub rij: f64,
    /// distance between the central atom and the second neighbor
    pub rik: f64,
    /// distance between the two neighbors
    pub rjk: f64,
    /// cosine of the angle between the two bonds at the central atom
    pub cos_theta: f64,
}

impl NeighborGeometry {
    /// Build a geometry from the Cartesian coordinates of the neighbors and of
    /// the central atom
    pub fn from_positions(center: Vector3D, neighbors: &[Vector3D]) -> NeighborGeometry {
        NeighborGeometry::Cartesian(neighbors.iter().map(|&position| position - center).collect())
    }

    /// Number of neighbors in this geometry
    pub fn len(&self) -> usize {
        match self {
            NeighborGeometry::Distances(distances) |
            NeighborGeometry::Triangles { distances, .. } => distances.len(),
            NeighborGeometry::Cartesian(vectors) => vectors.len(),
        }
    }

    /// Does this geometry contain no neighbors at all?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Can this geometry provide the angles required by angular functions?
    pub fn has_angles(&self) -> bool {
        !matches!(self, NeighborGeometry::Distances(_))
    }

    /// Check that sizes are consistent and that all values are finite and
    /// non-negative
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            NeighborGeometry::Distances(distances) => check_distances(distances),
            NeighborGeometry::Triangles { distances, mutual } => {
                check_distances(distances)?;
                let n = distances.len();
                if mutual.shape() != [n, n] {
                    return Err(Error::Shape(format!(
                        "expected a {}x{} matrix of mutual distances, got {}x{}",
                        n, n, mutual.shape()[0], mutual.shape()[1]
                    )));
                }

                if let Some(value) = mutual.iter().find(|v| !v.is_finite() || **v < 0.0) {
                    return Err(Error::Shape(format!(
                        "mutual distances must be finite and non-negative, got {}", value
                    )));
                }
                Ok(())
            }
            NeighborGeometry::Cartesian(vectors) => {
                if let Some((index, _)) = vectors.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                    return Err(Error::Shape(format!(
                        "offset for neighbor {} is not finite", index
                    )));
                }
                Ok(())
            }
        }
    }

    /// Get the distances between the central atom and all neighbors
    pub fn distances(&self) -> Cow<'_, [f64]> {
        match self {
            NeighborGeometry::Distances(distances) |
            NeighborGeometry::Triangles { distances, .. } => Cow::Borrowed(distances),
            NeighborGeometry::Cartesian(vectors) => {
                Cow::Owned(vectors.iter().map(|v| v.norm()).collect())
            }
        }
    }

    /// Get all the triplets `(i, j, k)` with `j < k` in this geometry.
    ///
    /// This returns a shape error for geometries containing only distances.
    #[allow(clippy::float_cmp)]
    pub fn triplets(&self) -> Result<Vec<Triplet>, Error> {
        let n = self.len();
        let mut triplets = Vec::with_capacity(n * n.saturating_sub(1) / 2);

        match self {
            NeighborGeometry::Distances(_) => {
                return Err(Error::Shape(
                    "angular functions require mutual distances or Cartesian offsets \
                    between neighbors, but only distances were given".into()
                ));
            }
            NeighborGeometry::Triangles { distances, mutual } => {
                for j in 0..n {
                    for k in (j + 1)..n {
                        let rij = distances[j];
                        let rik = distances[k];
                        let rjk = mutual[[j, k]];
                        let cos_theta = law_of_cosines(rij, rik, rjk);
                        triplets.push(Triplet { rij, rik, rjk, cos_theta });
                    }
                }
            }
            NeighborGeometry::Cartesian(vectors) => {
                let norms = vectors.iter().map(|v| v.norm()).collect::<Vec<_>>();
                for j in 0..n {
                    for k in (j + 1)..n {
                        let rij = norms[j];
                        let rik = norms[k];
                        let rjk = (vectors[k] - vectors[j]).norm();

                        let cos_theta = if rij == 0.0 || rik == 0.0 {
                            0.0
                        } else {
                            f64::clamp(vectors[j].dot(&vectors[k]) / (rij * rik), -1.0, 1.0)
                        };
                        triplets.push(Triplet { rij, rik, rjk, cos_theta });
                    }
                }
            }
        }

        return Ok(triplets);
    }
}

fn check_distances(distances: &[f64]) -> Result<(), Error> {
    if let Some((index, value)) = distances.iter().enumerate().find(|(_, v)| !v.is_finite() || **v < 0.0) {
        return Err(Error::Shape(format!(
            "distance to neighbor {} must be finite and non-negative, got {}", index, value
        )));
    }
    Ok(())
}

/// Cosine of the angle opposite to `rjk` in the triangle with sides `rij`,
/// `rik` and `rjk`. The result is clamped to [-1, 1] to remove rounding
/// errors on degenerate triangles.
#[allow(clippy::float_cmp)]
fn law_of_cosines(rij: f64, rik: f64, rjk: f64) -> f64 {
    if rij == 0.0 || rik == 0.0 {
        return 0.0;
    }

    let cos_theta = (rij * rij + rik * rik - rjk * rjk) / (2.0 * rij * rik);
    f64::clamp(cos_theta, -1.0, 1.0)
}
