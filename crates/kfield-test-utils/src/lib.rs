//! Test utilities and mock types for kfield development.
//!
//! Provides a [`RecordingPml`] that logs every hook call, grid and field
//! fixtures, and tolerance helpers for the floating-point checks the
//! solver tests need.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod recording;

pub use fixtures::{
    assert_vec_close, cubic_grid, max_abs_diff, plane_wave, random_fields, PlaneWave,
};
pub use recording::{HookLog, RecordingPml, RecordingPmlBuilder};
