//! Atomic structures, and extraction of the neighbor geometry around each atom.
use log::warn;
use rayon::prelude::*;

use crate::{Error, NeighborGeometry, Vector3D};

mod cell;
pub use self::cell::Cell;

mod chemfiles;
pub use self::chemfiles::read_from_file;

#[cfg(test)]
pub(crate) mod test_utils;

/// A set of atoms with their types and positions, inside a `Cell`.
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    cell: Cell,
    types: Vec<i32>,
    positions: Vec<Vector3D>,
}

impl Structure {
    /// Create a new empty structure with the given cell
    pub fn new(cell: Cell) -> Structure {
        Structure {
            cell: cell,
            types: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Add an atom with the given atomic type and position to this structure
    pub fn add_atom(&mut self, atomic_type: i32, position: Vector3D) {
        self.types.push(atomic_type);
        self.positions.push(position);
    }

    /// Get the number of atoms in this structure
    pub fn size(&self) -> usize {
        self.types.len()
    }

    /// Get the atomic types of all atoms
    pub fn types(&self) -> &[i32] {
        &self.types
    }

    /// Get the positions of all atoms
    pub fn positions(&self) -> &[Vector3D] {
        &self.positions
    }

    /// Get the cell of this structure
    pub fn cell(&self) -> Cell {
        self.cell
    }

    fn check_cutoff(&self, cutoff: f64) -> Result<(), Error> {
        if cutoff <= 0.0 || !cutoff.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected a positive cutoff radius, got {}", cutoff
            )));
        }

        if cutoff > self.cell.max_minimum_image_cutoff() {
            warn!(
                "cutoff ({}) is larger than half of the cell size, some periodic \
                images will be missing from the neighbors",
                cutoff
            );
        }
        Ok(())
    }

    fn neighbors_unchecked(&self, center: usize, cutoff: f64) -> NeighborGeometry {
        let cutoff2 = cutoff * cutoff;
        let position = self.positions[center];

        let mut offsets = Vec::new();
        for (other, &neighbor) in self.positions.iter().enumerate() {
            if other == center {
                continue;
            }

            let vector = self.cell.minimum_image(neighbor - position);
            let distance2 = vector.norm2();
            if distance2 < cutoff2 {
                if distance2 < 1e-6 {
                    warn!(
                        "atoms {} and {} are very close to one another ({} A)",
                        center, other, distance2.sqrt()
                    );
                }
                offsets.push(vector);
            }
        }

        NeighborGeometry::Cartesian(offsets)
    }

    /// Get the Cartesian offsets from the atom at index `center` to all other
    /// atoms closer than `cutoff`, using the minimum image convention.
    pub fn neighbors(&self, center: usize, cutoff: f64) -> Result<NeighborGeometry, Error> {
        if center >= self.size() {
            return Err(Error::InvalidParameter(format!(
                "atom index {} is out of bounds for a structure with {} atoms",
                center, self.size()
            )));
        }
        self.check_cutoff(cutoff)?;

        Ok(self.neighbors_unchecked(center, cutoff))
    }

    /// Get the neighbor geometry around every atom of the given `atomic_type`,
    /// or around all atoms if `atomic_type` is `None`.
    pub fn all_neighbors(&self, cutoff: f64, atomic_type: Option<i32>) -> Result<Vec<NeighborGeometry>, Error> {
        self.check_cutoff(cutoff)?;

        let centers = (0..self.size())
            .filter(|&i| atomic_type.map_or(true, |t| self.types[i] == t))
            .collect::<Vec<_>>();

        return Ok(centers.into_par_iter()
            .map(|center| self.neighbors_unchecked(center, cutoff))
            .collect()
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use super::test_utils::test_structure;

    #[test]
    fn add_atoms() {
        let mut structure = Structure::new(Cell::cubic(10.0).unwrap());
        structure.add_atom(3, Vector3D::new(2.0, 3.0, 4.0));
        structure.add_atom(1, Vector3D::new(1.0, 3.0, 4.0));
        structure.add_atom(3, Vector3D::new(5.0, 3.0, 4.0));

        assert_eq!(structure.size(), 3);
        assert_eq!(structure.types(), &[3, 1, 3]);
        assert_eq!(structure.positions(), &[
            Vector3D::new(2.0, 3.0, 4.0),
            Vector3D::new(1.0, 3.0, 4.0),
            Vector3D::new(5.0, 3.0, 4.0),
        ]);
    }

    #[test]
    fn periodic_neighbors() {
        let mut structure = Structure::new(Cell::cubic(10.0).unwrap());
        structure.add_atom(14, Vector3D::new(0.5, 5.0, 5.0));
        structure.add_atom(14, Vector3D::new(9.5, 5.0, 5.0));
        structure.add_atom(14, Vector3D::new(5.0, 5.0, 5.0));

        let geometry = structure.neighbors(0, 2.0).unwrap();
        assert_eq!(geometry, NeighborGeometry::Cartesian(vec![Vector3D::new(-1.0, 0.0, 0.0)]));

        let geometry = structure.neighbors(2, 2.0).unwrap();
        assert!(geometry.is_empty());

        let geometry = structure.neighbors(2, 4.6).unwrap();
        let distances = geometry.distances();
        assert_eq!(distances.len(), 2);
        assert_relative_eq!(distances[0], 4.5);
        assert_relative_eq!(distances[1], 4.5);

        assert!(structure.neighbors(3, 2.0).is_err());
        assert!(structure.neighbors(0, -2.0).is_err());
    }

    #[test]
    fn silicon_neighbors() {
        let structure = test_structure("silicon");
        assert_eq!(structure.size(), 8);

        // every atom in the diamond structure has four nearest neighbors at
        // sqrt(3) / 4 * a
        let all = structure.all_neighbors(2.6, None).unwrap();
        assert_eq!(all.len(), 8);
        for geometry in &all {
            assert_eq!(geometry.len(), 4);
            for distance in geometry.distances().iter() {
                assert_relative_eq!(*distance, f64::sqrt(3.0) / 4.0 * 5.431, max_relative = 1e-12);
            }

            // tetrahedral angles
            for triplet in geometry.triplets().unwrap() {
                assert_relative_eq!(triplet.cos_theta, -1.0 / 3.0, max_relative = 1e-12);
            }
        }

        let typed = structure.all_neighbors(2.6, Some(6)).unwrap();
        assert!(typed.is_empty());
    }

    #[test]
    fn molecule() {
        let structure = test_structure("water");
        assert!(structure.cell().is_infinite());

        let oxygen = structure.all_neighbors(1.0, Some(-42)).unwrap();
        assert_eq!(oxygen.len(), 1);
        assert_eq!(oxygen[0].len(), 2);

        let triplets = oxygen[0].triplets().unwrap();
        assert_relative_eq!(triplets[0].rjk, 1.5109, max_relative = 1e-12);

        // hydrogen atoms only see the oxygen with this cutoff
        let hydrogens = structure.all_neighbors(1.0, Some(1)).unwrap();
        assert_eq!(hydrogens.len(), 2);
        assert!(hydrogens.iter().all(|geometry| geometry.len() == 1));
    }
}
