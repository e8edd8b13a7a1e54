//! The [`FieldSolver`] trait.

use kfield_core::{ConfigError, Int3, SolverError};
use kfield_grid::SpectralGrid;

/// A field solver that advances a [`SpectralGrid`] one time step at a time.
///
/// # Contract
///
/// - `advance()` reads E, B and J from the grid, writes new E and B and
///   moves the grid's global time forward by exactly `dt`. J is never
///   written.
/// - A solver is bound to the grid extents it was built for; any other
///   grid is rejected with [`ConfigError::SizeMismatch`].
/// - `set_time_step()` with an unchanged value is a no-op.
///
/// # Object safety
///
/// This trait is object-safe; drivers may hold solvers as
/// `Box<dyn FieldSolver>`.
///
/// # Examples
///
/// ```
/// use kfield_grid::{GridConfig, SpectralGrid};
/// use kfield_solver::{FieldSolver, Psatd, PsatdTimeStaggered};
///
/// let mut grid = SpectralGrid::new(&GridConfig { cells: [4, 4, 4], ..Default::default() }).unwrap();
/// let mut solvers: Vec<Box<dyn FieldSolver>> = vec![
///     Box::new(Psatd::new(&grid)),
///     Box::new(PsatdTimeStaggered::new(&grid)),
/// ];
/// for solver in &mut solvers {
///     solver.advance(&mut grid).unwrap();
/// }
/// assert!((grid.global_time() - 2.0 * grid.dt()).abs() < 1e-24);
/// ```
pub trait FieldSolver: Send {
    /// Human-readable name for logs and error reporting.
    fn name(&self) -> &str;

    /// Advance the grid by one time step.
    fn advance(&mut self, grid: &mut SpectralGrid) -> Result<(), SolverError>;

    /// Install a fresh PML of `thickness` cells per side.
    ///
    /// Fails with [`ConfigError::PmlTooThick`] if `2·thickness` exceeds
    /// the cell count along some axis.
    fn configure_pml(&mut self, grid: &SpectralGrid, thickness: Int3) -> Result<(), ConfigError>;

    /// Change the time step on the grid, rebuilding the PML if needed.
    ///
    /// Returns whether the value changed.
    fn set_time_step(&mut self, grid: &mut SpectralGrid, dt: f64) -> Result<bool, ConfigError>;

    /// Time step the solver's PML state was built for.
    fn dt(&self) -> f64;
}
