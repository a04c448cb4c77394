use std::path::Path;

use super::Structure;
use crate::Error;

#[cfg(feature = "chemfiles")]
impl From<chemfiles::Error> for Error {
    fn from(error: chemfiles::Error) -> Error {
        Error::Chemfiles(error.message)
    }
}

/// Read all structures in the file at the given `path` using
/// [chemfiles](https://chemfiles.org/), and convert them to `Structure`s.
///
/// Only infinite and orthorhombic cells are supported. Atoms without an
/// atomic number get a type starting at 120, one per distinct atom name.
#[cfg(feature = "chemfiles")]
#[allow(clippy::needless_range_loop)]
pub fn read_from_file(path: impl AsRef<Path>) -> Result<Vec<Structure>, Error> {
    use std::collections::HashMap;
    use super::Cell;

    let mut structures = Vec::new();

    let mut trajectory = chemfiles::Trajectory::open(path, 'r')?;
    let mut frame = chemfiles::Frame::new();

    let mut assigned_types = HashMap::new();
    let mut get_type = |atom: chemfiles::AtomRef| {
        let atomic_number = atom.atomic_number();
        if atomic_number == 0 {
            // larger than the number of elements in the periodic table
            let new_type = 120 + assigned_types.len() as i32;
            *assigned_types.entry(atom.atomic_type()).or_insert(new_type)
        } else {
            atomic_number as i32
        }
    };

    for step in 0..trajectory.nsteps() {
        trajectory.read(&mut frame)?;

        let cell = frame.cell();
        let cell = match cell.shape() {
            chemfiles::CellShape::Infinite => Cell::infinite(),
            chemfiles::CellShape::Orthorhombic => {
                let [a, b, c] = cell.lengths();
                Cell::orthorhombic(a, b, c)?
            }
            chemfiles::CellShape::Triclinic => {
                return Err(Error::Chemfiles(format!(
                    "step {} uses a triclinic cell, only orthorhombic cells are supported", step
                )));
            }
        };

        let positions = frame.positions();
        let mut structure = Structure::new(cell);
        for i in 0..frame.size() {
            let atom = frame.atom(i);
            structure.add_atom(get_type(atom), positions[i].into());
        }

        structures.push(structure);
    }

    return Ok(structures);
}

/// Read all structures in the file at the given `path` using
/// [chemfiles](https://chemfiles.org/), and convert them to `Structure`s.
#[cfg(not(feature = "chemfiles"))]
pub fn read_from_file(_: impl AsRef<Path>) -> Result<Vec<Structure>, Error> {
    Err(Error::Chemfiles(
        "read_from_file is only available with the chemfiles feature enabled".into()
    ))
}

#[cfg(all(test, not(feature = "chemfiles")))]
mod tests {
    use super::*;

    #[test]
    fn disabled() {
        let error = read_from_file("structures.xyz").unwrap_err();
        assert!(matches!(error, Error::Chemfiles(_)));
    }
}
