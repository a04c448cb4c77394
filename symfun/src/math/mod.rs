//! Mathematical building blocks shared by the symmetry functions.

mod cutoff;
pub use self::cutoff::{cutoff, cutoff_array};
