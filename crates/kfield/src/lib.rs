//! kfield: spectral Maxwell field solvers with coordinate mappings.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all kfield sub-crates. For most users, adding `kfield` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kfield::prelude::*;
//!
//! // A 16×4×4 periodic box of unit cells, c·dt = half a cell.
//! let config = GridConfig {
//!     cells: [16, 4, 4],
//!     dt: 0.5 / kfield::constants::C,
//!     ..Default::default()
//! };
//! let mut grid = SpectralGrid::new(&config).unwrap();
//! let k = 2.0 * std::f64::consts::PI / 16.0;
//! grid.fill_with(FieldKind::E, |r| Vec3::new(0.0, (k * r.x).cos(), 0.0));
//! grid.fill_with(FieldKind::B, |r| Vec3::new(0.0, 0.0, (k * r.x).cos()));
//!
//! let mut solver = Psatd::new(&grid);
//! for _ in 0..8 {
//!     solver.advance(&mut grid).unwrap();
//! }
//!
//! // The wave has moved 4 cells along +x. Looking through a shift that
//! // follows it shows the initial profile again.
//! let mut chain = MappingChain::new();
//! chain.push(Shift::new(Vec3::new(-4.0, 0.0, 0.0)));
//! let view = MappedGrid::new(&grid, &chain);
//! let e = view.e(Vec3::new(6.0, 1.0, 1.0));
//! assert!((e.y - (k * 6.0).cos()).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kfield-core` | Vectors, axes, errors |
//! | [`constants`] | `kfield-core` | Physical constants (CGS) |
//! | [`grid`] | `kfield-grid` | Real and complex grids, Fourier transforms |
//! | [`mapping`] | `kfield-mapping` | Coordinate mappings and mapped views |
//! | [`solver`] | `kfield-solver` | PSATD solvers and PML hooks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`kfield-core`).
///
/// Real and complex 3-vectors, [`types::Axis`], and the error types
/// [`types::ConfigError`], [`types::MappingError`] and
/// [`types::SolverError`].
pub use kfield_core as types;

/// Physical constants in CGS units.
pub use kfield_core::constants;

/// Grids and transforms (`kfield-grid`).
///
/// [`grid::SpectralGrid`] holds the real-space fields;
/// [`grid::FourierTransform`] is the contract solvers use to reach
/// frequency space.
pub use kfield_grid as grid;

/// Coordinate mappings (`kfield-mapping`).
///
/// Compose [`mapping::Mapping`]s into a [`mapping::MappingChain`] and
/// look fields up through a [`mapping::MappedGrid`].
pub use kfield_mapping as mapping;

/// Spectral field solvers (`kfield-solver`).
///
/// [`solver::Psatd`] and [`solver::PsatdTimeStaggered`] implement
/// [`solver::FieldSolver`]; absorbing layers plug in through
/// [`solver::Pml`].
pub use kfield_solver as solver;

/// Common imports for typical kfield usage.
///
/// ```rust
/// use kfield::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use kfield_core::{Axis, CVec3, Complex64, FieldKind, Int3, Vec3};

    // Errors
    pub use kfield_core::{ConfigError, MappingError, SolverError};

    // Grids
    pub use kfield_grid::{GridConfig, SpectralGrid};

    // Mappings
    pub use kfield_mapping::{
        set_em_field, MappedGrid, Mapping, MappingChain, Periodic, Rotation, Scale, Segment,
        Shift, TightFocusingMapping,
    };

    // Solvers
    pub use kfield_solver::{FieldSolver, Pml, PmlBuilder, Psatd, PsatdTimeStaggered};
}
