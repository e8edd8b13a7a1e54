//! Field grids and frequency transforms for kfield.
//!
//! The solvers treat the grid and the transform as collaborators with a
//! fixed contract. This crate provides the reference implementations:
//!
//! - [`SpectralGrid`]: collocated real-space E, B, J plus time step,
//!   global time and the physical frame (origin and cell steps).
//! - [`ComplexGrid`]: the frequency-space working copy, cell-major with
//!   one [`CVec3`](kfield_core::CVec3) per field per cell.
//! - [`FourierTransform`]: the real↔complex contract, implemented by
//!   [`RustFftTransform`] with a half spectrum along z.
//! - [`Area`]: half-open integer boxes used for update regions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod area;
pub mod complex;
pub mod config;
pub mod field;
pub mod grid;
pub mod transform;

pub use area::Area;
pub use complex::{complex_size, ComplexGrid};
pub use config::GridConfig;
pub use field::ScalarField;
pub use grid::SpectralGrid;
pub use transform::{FourierTransform, RustFftTransform};
