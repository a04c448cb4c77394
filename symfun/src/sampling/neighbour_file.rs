//! Reader for neighbour lists dumped from LAMMPS simulations.
//!
//! Each line contains one central atom: for every neighbor the offset `x y z`
//! from the central atom and the squared distance `r2`, followed by the energy
//! of the central atom as the last value. Files with multiple atomic types add
//! the neighbor type after `r2`:
//!
//! ```text
//! x1 y1 z1 r2_1 [type1] x2 y2 z2 r2_2 [type2] ... energy
//! ```
use std::path::Path;

use log::{debug, warn};

use crate::{Error, NeighborGeometry, Vector3D};

/// Content of a neighbour file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NeighbourData {
    /// Cartesian offsets to the neighbors of each central atom
    pub geometries: Vec<NeighborGeometry>,
    /// Type of each neighbor, only for multi-type files
    pub types: Option<Vec<Vec<i32>>>,
    /// Reference energy of each central atom
    pub energies: Vec<f64>,
}

impl NeighbourData {
    /// Number of central atoms in this data
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Keep only the first `count` central atoms
    pub fn truncate(&mut self, count: usize) {
        self.geometries.truncate(count);
        self.energies.truncate(count);
        if let Some(types) = &mut self.types {
            types.truncate(count);
        }
    }
}

/// Parse the content of a neighbour file. Set `multi_type` if every neighbor
/// carries its atomic type.
pub fn parse_neighbour_data(content: &str, multi_type: bool) -> Result<NeighbourData, Error> {
    let stride = if multi_type { 5 } else { 4 };

    let mut data = NeighbourData {
        types: if multi_type { Some(Vec::new()) } else { None },
        ..Default::default()
    };

    for (i, line) in content.lines().enumerate() {
        let line_number = i + 1;
        let values = line.split_whitespace()
            .map(|field| field.parse::<f64>().map_err(|_| Error::Parse {
                line: line_number,
                message: format!("invalid number '{}'", field),
            }))
            .collect::<Result<Vec<_>, _>>()?;

        let (energy, neighbors) = match values.split_last() {
            Some((&energy, neighbors)) => (energy, neighbors),
            None => continue,
        };

        if neighbors.len() % stride != 0 {
            return Err(Error::Parse {
                line: line_number,
                message: format!(
                    "expected {} values per neighbor and a final energy, got {} values",
                    stride, values.len()
                ),
            });
        }

        let mut vectors = Vec::with_capacity(neighbors.len() / stride);
        let mut types = Vec::new();
        for neighbor in neighbors.chunks_exact(stride) {
            let vector = Vector3D::new(neighbor[0], neighbor[1], neighbor[2]);
            let r2 = neighbor[3];
            if (vector.norm2() - r2).abs() > 1e-6 * f64::max(1.0, r2) {
                warn!(
                    "inconsistent squared distance at line {}: got {}, but x² + y² + z² = {}",
                    line_number, r2, vector.norm2()
                );
            }

            if multi_type {
                let atomic_type = neighbor[4];
                if atomic_type.fract() != 0.0 {
                    return Err(Error::Parse {
                        line: line_number,
                        message: format!("expected an integer atomic type, got {}", atomic_type),
                    });
                }
                types.push(atomic_type as i32);
            }

            vectors.push(vector);
        }

        data.geometries.push(NeighborGeometry::Cartesian(vectors));
        data.energies.push(energy);
        if let Some(all_types) = &mut data.types {
            all_types.push(types);
        }
    }

    debug!("read {} central atoms from neighbour file", data.len());
    return Ok(data);
}

/// Read the neighbour file at the given `path`
pub fn read_neighbour_file(path: impl AsRef<Path>, multi_type: bool) -> Result<NeighbourData, Error> {
    let content = std::fs::read_to_string(path)?;
    return parse_neighbour_data(&content, multi_type);
}
