//! Grid configuration and validation.

use kfield_core::{Axis, ConfigError, Int3, Vec3};

/// Input for constructing a [`SpectralGrid`](crate::SpectralGrid).
///
/// [`validate()`](GridConfig::validate) checks the structural invariants;
/// the grid constructor calls it, so an invalid config never yields a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Number of cells along x, y, z.
    pub cells: Int3,
    /// Physical coordinate of cell `(0, 0, 0)`.
    pub min_coords: Vec3,
    /// Physical cell size along each axis.
    pub steps: Vec3,
    /// Time step (s).
    pub dt: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cells: [16, 16, 16],
            min_coords: Vec3::zeros(),
            steps: Vec3::new(1.0, 1.0, 1.0),
            dt: 1.0e-12,
        }
    }
}

impl GridConfig {
    /// Config covering the physical box `[min, max)` with `cells` cells.
    ///
    /// Steps are derived as `(max - min) / cells`; a degenerate box is
    /// caught later by [`validate()`](Self::validate).
    pub fn from_bounds(cells: Int3, min: Vec3, max: Vec3, dt: f64) -> Self {
        let steps = Vec3::from_fn(|a, _| (max[a] - min[a]) / cells[a].max(1) as f64);
        Self {
            cells,
            min_coords: min,
            steps,
            dt,
        }
    }

    /// Check all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells.iter().any(|&n| n == 0) {
            return Err(ConfigError::EmptyGrid { cells: self.cells });
        }
        for axis in Axis::ALL {
            let value = self.steps[axis.index()];
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidStep { axis, value });
            }
        }
        validate_dt(self.dt)
    }
}

/// Reject NaN, infinite, zero and negative time steps.
pub fn validate_dt(dt: f64) -> Result<(), ConfigError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ConfigError::InvalidTimeStep { value: dt });
    }
    Ok(())
}
