//! Core types for the kfield spectral field solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the rest of the workspace:
//! real and complex 3-vectors, coordinate axes, physical constants,
//! and the error types for configuration, mapping and solving.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod constants;
pub mod error;
pub mod vector;

pub use axis::Axis;
pub use error::{ConfigError, FieldKind, MappingError, SolverError};
pub use vector::{complexify, CVec3, Complex64, Int3, Vec3};
