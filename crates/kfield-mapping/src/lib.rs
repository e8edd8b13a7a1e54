//! Coordinate mappings for evaluating kfield grids in transformed frames.
//!
//! A [`Mapping`] converts a coordinate between a lab frame and a grid's
//! native frame in both directions and reports whether the coordinate
//! lies inside the domain the mapping is defined over. Mappings compose
//! into a [`MappingChain`]: forward conversion walks the chain front to
//! back, inverse conversion back to front, and validity is the AND of
//! every stage.
//!
//! # Variants
//!
//! - [`Segment`]: bounds gate on a half-open box
//! - [`Periodic`]: wrap one axis into `[c_min, c_max)`
//! - [`Rotation`]: right-handed rotation about an axis
//! - [`Shift`] / [`Scale`]: translation and single-axis scaling
//! - [`TightFocusingMapping`]: sliding periodic window filtered by a
//!   light-cone admissibility test
//!
//! [`MappedGrid`] ties a chain to a [`SpectralGrid`](kfield_grid::SpectralGrid)
//! so field values can be looked up at lab-frame coordinates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod grid;
pub mod mapped;
pub mod mapping;
pub mod simple;
pub mod tight_focusing;

pub use chain::MappingChain;
pub use grid::{set_em_field, MappedGrid};
pub use mapped::Mapped;
pub use mapping::Mapping;
pub use simple::{Periodic, Rotation, Scale, Segment, Shift};
pub use tight_focusing::TightFocusingMapping;
