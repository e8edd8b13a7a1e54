//! Spectral (PSATD) Maxwell field solvers for kfield.
//!
//! Both solvers transform the real grid to frequency space, advance
//! every mode with the exact vacuum solution of Maxwell's equations for
//! a current held constant over the step, and transform back:
//!
//! - [`Psatd`]: non-staggered; E and B rotated together, twice over
//!   `dt/2`.
//! - [`PsatdTimeStaggered`]: half-B, E, half-B with the previous step's
//!   current kept in frequency space.
//!
//! Absorbing boundaries plug in through the [`Pml`] hooks; the
//! [`DampingPml`] is the reference implementation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod base;
mod mode;
pub mod pml;
pub mod psatd;
pub mod solver;
pub mod staggered;
pub mod wave;

pub use base::SpectralSolverBase;
pub use pml::{validate_thickness, DampingPml, DampingPmlBuilder, Pml, PmlBuilder, PmlConfig};
pub use psatd::{rotate_mode, Psatd};
pub use solver::FieldSolver;
pub use staggered::{e_mode, half_b_mode, PsatdTimeStaggered};
pub use wave::WaveVectors;
