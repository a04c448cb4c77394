#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names, clippy::similar_names)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_sign_loss)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Atom-centered symmetry functions, turning the variable-size neighbor list
//! of an atom into a fixed-size feature vector for machine-learning
//! interatomic potentials.

pub mod types;
pub use types::Vector3D;

pub mod math;

mod errors;
pub use self::errors::Error;

pub mod neighbors;
pub use self::neighbors::NeighborGeometry;

pub mod descriptors;
pub use self::descriptors::{AngularFunction, RadialFunction, SymmetryFunction};
pub use self::descriptors::{AngularKind, DescriptorSet};

pub mod parameters;

pub mod systems;
pub use self::systems::{Structure, Cell};

pub mod potentials;
pub use self::potentials::Potential;

pub mod sampling;

pub mod training;
pub use self::training::{TrainingData, TrainingOptions};

pub mod analysis;
