//! Real-space field grid.

use crate::config::{validate_dt, GridConfig};
use crate::field::ScalarField;
use kfield_core::{ConfigError, FieldKind, Int3, Vec3};

/// Collocated real-space grid holding E, B and J.
///
/// All nine components share the same cell-centred layout; value
/// `(i, j, k)` lives at [`cell_coords`](Self::cell_coords)`(i, j, k)`.
/// The grid also owns the simulation time step and the global time that
/// time-dependent mappings are evaluated at.
///
/// # Examples
///
/// ```
/// use kfield_grid::{GridConfig, SpectralGrid};
/// use kfield_core::{FieldKind, Vec3};
///
/// let mut grid = SpectralGrid::new(&GridConfig::default()).unwrap();
/// grid.set_value(FieldKind::E, [1, 2, 3], Vec3::new(0.0, 1.0, 0.0));
/// assert_eq!(grid.value(FieldKind::E, [1, 2, 3]).y, 1.0);
///
/// // Unchanged dt is reported as "no change".
/// let dt = grid.dt();
/// assert!(!grid.set_time_step(dt).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct SpectralGrid {
    num_cells: Int3,
    min_coords: Vec3,
    steps: Vec3,
    dt: f64,
    global_time: f64,
    e: [ScalarField; 3],
    b: [ScalarField; 3],
    j: [ScalarField; 3],
}

fn triple(size: Int3) -> [ScalarField; 3] {
    [
        ScalarField::zeros(size),
        ScalarField::zeros(size),
        ScalarField::zeros(size),
    ]
}

impl SpectralGrid {
    /// Build a zero-filled grid from a validated config.
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            num_cells: config.cells,
            min_coords: config.min_coords,
            steps: config.steps,
            dt: config.dt,
            global_time: 0.0,
            e: triple(config.cells),
            b: triple(config.cells),
            j: triple(config.cells),
        })
    }

    /// Number of cells along each axis.
    pub fn num_cells(&self) -> Int3 {
        self.num_cells
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.num_cells.iter().product()
    }

    /// Physical coordinate of cell `(0, 0, 0)`.
    pub fn min_coords(&self) -> Vec3 {
        self.min_coords
    }

    /// Physical coordinate one period past the last cell.
    pub fn max_coords(&self) -> Vec3 {
        self.min_coords + self.steps.component_mul(&self.extent_cells())
    }

    /// Cell size along each axis.
    pub fn steps(&self) -> Vec3 {
        self.steps
    }

    /// Volume of one cell.
    pub fn cell_volume(&self) -> f64 {
        self.steps.x * self.steps.y * self.steps.z
    }

    /// Current time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Replace the time step.
    ///
    /// Returns `Ok(true)` when the value changed and `Ok(false)` when it
    /// was already `dt`, so callers can skip rebuilding dt-derived state.
    pub fn set_time_step(&mut self, dt: f64) -> Result<bool, ConfigError> {
        validate_dt(dt)?;
        if dt == self.dt {
            return Ok(false);
        }
        self.dt = dt;
        Ok(true)
    }

    /// Elapsed simulation time.
    pub fn global_time(&self) -> f64 {
        self.global_time
    }

    /// Overwrite the elapsed simulation time.
    pub fn set_global_time(&mut self, time: f64) {
        self.global_time = time;
    }

    /// Physical coordinate of cell `idx`.
    pub fn cell_coords(&self, idx: Int3) -> Vec3 {
        Vec3::from_fn(|a, _| self.min_coords[a] + idx[a] as f64 * self.steps[a])
    }

    /// The three components of a field.
    pub fn field(&self, kind: FieldKind) -> &[ScalarField; 3] {
        match kind {
            FieldKind::E => &self.e,
            FieldKind::B => &self.b,
            FieldKind::J => &self.j,
        }
    }

    /// Mutable access to the three components of a field.
    pub fn field_mut(&mut self, kind: FieldKind) -> &mut [ScalarField; 3] {
        match kind {
            FieldKind::E => &mut self.e,
            FieldKind::B => &mut self.b,
            FieldKind::J => &mut self.j,
        }
    }

    /// Field vector stored at cell `idx`.
    pub fn value(&self, kind: FieldKind, idx: Int3) -> Vec3 {
        let f = self.field(kind);
        Vec3::new(f[0].get(idx), f[1].get(idx), f[2].get(idx))
    }

    /// Overwrite the field vector at cell `idx`.
    pub fn set_value(&mut self, kind: FieldKind, idx: Int3, v: Vec3) {
        let f = self.field_mut(kind);
        for (c, comp) in f.iter_mut().enumerate() {
            comp.set(idx, v[c]);
        }
    }

    /// Fill a field by evaluating `f` at every cell coordinate.
    pub fn fill_with<F>(&mut self, kind: FieldKind, f: F)
    where
        F: Fn(Vec3) -> Vec3,
    {
        let [nx, ny, nz] = self.num_cells;
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let v = f(self.cell_coords([i, j, k]));
                    self.set_value(kind, [i, j, k], v);
                }
            }
        }
    }

    /// Electric field at a physical coordinate (trilinear, periodic).
    pub fn e_at(&self, coords: &Vec3) -> Vec3 {
        self.interpolate(FieldKind::E, coords)
    }

    /// Magnetic field at a physical coordinate (trilinear, periodic).
    pub fn b_at(&self, coords: &Vec3) -> Vec3 {
        self.interpolate(FieldKind::B, coords)
    }

    /// Current density at a physical coordinate (trilinear, periodic).
    pub fn j_at(&self, coords: &Vec3) -> Vec3 {
        self.interpolate(FieldKind::J, coords)
    }

    /// Trilinear interpolation between cell values, wrapping indices
    /// periodically since the spectral grid is periodic by construction.
    pub fn interpolate(&self, kind: FieldKind, coords: &Vec3) -> Vec3 {
        let mut base = [0usize; 3];
        let mut next = [0usize; 3];
        let mut frac = [0.0f64; 3];
        for a in 0..3 {
            let s = (coords[a] - self.min_coords[a]) / self.steps[a];
            let fl = s.floor();
            frac[a] = s - fl;
            let n = self.num_cells[a] as i64;
            let i0 = (fl as i64).rem_euclid(n);
            base[a] = i0 as usize;
            next[a] = ((i0 + 1) % n) as usize;
        }

        let mut out = Vec3::zeros();
        for corner in 0..8 {
            let mut idx = [0usize; 3];
            let mut w = 1.0;
            for a in 0..3 {
                if (corner >> a) & 1 == 1 {
                    idx[a] = next[a];
                    w *= frac[a];
                } else {
                    idx[a] = base[a];
                    w *= 1.0 - frac[a];
                }
            }
            if w != 0.0 {
                out += self.value(kind, idx) * w;
            }
        }
        out
    }

    /// Field energy diagnostic `Σ (|E|² + |B|²) · cellVolume`.
    pub fn energy(&self) -> f64 {
        let sum: f64 = self
            .e
            .iter()
            .chain(self.b.iter())
            .map(|f| f.as_slice().iter().map(|v| v * v).sum::<f64>())
            .sum();
        sum * self.cell_volume()
    }

    /// First non-finite value in E or B, if any.
    pub fn first_non_finite(&self) -> Option<(FieldKind, usize)> {
        for kind in [FieldKind::E, FieldKind::B] {
            for comp in self.field(kind) {
                if let Some(index) = comp.as_slice().iter().position(|v| !v.is_finite()) {
                    return Some((kind, index));
                }
            }
        }
        None
    }

    fn extent_cells(&self) -> Vec3 {
        Vec3::new(
            self.num_cells[0] as f64,
            self.num_cells[1] as f64,
            self.num_cells[2] as f64,
        )
    }
}
