//! The `Cell` type represents the enclosing box of a structure, with or
//! without periodic boundary conditions.
use crate::{Error, Vector3D};

/// Simulation box of a structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Infinite cell, with no periodic boundaries
    Infinite,
    /// Orthorhombic cell with side lengths `a, b, c`, and periodic boundary
    /// conditions in all directions
    Orthorhombic {
        lengths: [f64; 3],
    },
}

impl Cell {
    /// Create an infinite cell
    pub fn infinite() -> Cell {
        Cell::Infinite
    }

    /// Create an orthorhombic cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Cell, Error> {
        for length in [a, b, c] {
            if length <= 0.0 || !length.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "cell lengths must be positive, got [{}, {}, {}]", a, b, c
                )));
            }
        }
        Ok(Cell::Orthorhombic { lengths: [a, b, c] })
    }

    /// Create a cubic cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<Cell, Error> {
        Cell::orthorhombic(length, length, length)
    }

    /// Check if this cell is infinite, *i.e.* if it does not have periodic
    /// boundary conditions.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Cell::Infinite)
    }

    /// Get the volume of the cell, 0 for infinite cells
    pub fn volume(&self) -> f64 {
        match self {
            Cell::Infinite => 0.0,
            Cell::Orthorhombic { lengths } => lengths[0] * lengths[1] * lengths[2],
        }
    }

    /// Get the largest cutoff for which the minimum image convention finds
    /// all neighbors, i.e. half of the smallest cell length.
    pub fn max_minimum_image_cutoff(&self) -> f64 {
        match self {
            Cell::Infinite => f64::INFINITY,
            Cell::Orthorhombic { lengths } => 0.5 * lengths.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }

    /// Apply the minimum image convention to the vector `vector`, giving the
    /// shortest vector between the periodic images of two points.
    pub fn minimum_image(&self, vector: Vector3D) -> Vector3D {
        match self {
            Cell::Infinite => vector,
            Cell::Orthorhombic { lengths } => {
                let mut vector = vector;
                for xyz in 0..3 {
                    vector[xyz] -= f64::round(vector[xyz] / lengths[xyz]) * lengths[xyz];
                }
                vector
            }
        }
    }

    /// Wrap a position inside the cell, giving components in `[0, L)`.
    pub fn wrap(&self, position: Vector3D) -> Vector3D {
        match self {
            Cell::Infinite => position,
            Cell::Orthorhombic { lengths } => {
                let mut position = position;
                for xyz in 0..3 {
                    position[xyz] -= f64::floor(position[xyz] / lengths[xyz]) * lengths[xyz];
                }
                position
            }
        }
    }
}
