use crate::Vector3D;
use super::{Cell, Structure};

pub fn test_structure(name: &str) -> Structure {
    match name {
        "silicon" => get_silicon(),
        "water" => get_water(),
        _ => panic!("unknown test structure {}", name)
    }
}

/// Conventional cubic cell of diamond silicon, with 8 atoms
fn get_silicon() -> Structure {
    let a = 5.431;
    let mut structure = Structure::new(Cell::cubic(a).expect("valid cell"));
    let fractional = [
        [0.0, 0.0, 0.0], [0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0],
        [0.25, 0.25, 0.25], [0.25, 0.75, 0.75], [0.75, 0.25, 0.75], [0.75, 0.75, 0.25],
    ];
    for [x, y, z] in fractional {
        structure.add_atom(14, Vector3D::new(a * x, a * y, a * z));
    }
    return structure;
}

fn get_water() -> Structure {
    let mut structure = Structure::new(Cell::infinite());
    // types do not have to be atomic number
    structure.add_atom(-42, Vector3D::new(0.0, 0.0, 0.0));
    structure.add_atom(1, Vector3D::new(0.0, 0.75545, -0.58895));
    structure.add_atom(1, Vector3D::new(0.0, -0.75545, -0.58895));
    return structure;
}
