//! Absorbing-boundary (PML) hooks and the reference damping absorber.
//!
//! A solver drives its PML through four ordered hook points per step:
//! split-B pre-step, split-E pre-step, split-B post-step (all on the
//! complex grid) and the second, damping step on the real grid after
//! the inverse transform. PML coefficients depend on `dt`, so a time
//! step change replaces the whole PML via its [`PmlBuilder`].

use kfield_core::constants::C;
use kfield_core::{Axis, ConfigError, FieldKind, Int3};
use kfield_grid::{ComplexGrid, SpectralGrid};
use rayon::prelude::*;

/// Split-field absorbing layer driven by a spectral solver.
///
/// # Contract
///
/// - Hooks are called in the order documented on each solver; a PML
///   may keep state between them within one step.
/// - Hooks never change grid extents.
/// - Object-safe: solvers store the active PML as `Box<dyn Pml>`.
pub trait Pml: Send {
    /// Layer thickness in cells on each side, per axis.
    fn thickness(&self) -> Int3;

    /// Split-B pre-step, before a B update.
    fn update_b_split(&mut self, complex: &mut ComplexGrid);

    /// Split-E pre-step, before the E update.
    fn update_e_split(&mut self, complex: &mut ComplexGrid);

    /// Split-B post-step, after the E update.
    ///
    /// Default: same as [`update_b_split`](Self::update_b_split).
    fn update_b_split_post(&mut self, complex: &mut ComplexGrid) {
        self.update_b_split(complex);
    }

    /// Second step on the real grid, after the inverse transform.
    fn do_second_step(&mut self, grid: &mut SpectralGrid);
}

/// Builds a fresh [`Pml`] for a thickness and the grid's current `dt`.
pub trait PmlBuilder: Send {
    /// Build a PML with `thickness` cells per side.
    ///
    /// Callers validate `thickness` against the grid first; builders may
    /// add checks of their own.
    fn build(&self, thickness: Int3, grid: &SpectralGrid) -> Result<Box<dyn Pml>, ConfigError>;
}

/// Reject layers that do not fit twice (one per side) into the grid.
pub fn validate_thickness(thickness: Int3, cells: Int3) -> Result<(), ConfigError> {
    for axis in Axis::ALL {
        let a = axis.index();
        if 2 * thickness[a] > cells[a] {
            return Err(ConfigError::PmlTooThick {
                axis,
                thickness: thickness[a],
                cells: cells[a],
            });
        }
    }
    Ok(())
}

/// Parameters of a [`DampingPml`].
#[derive(Clone, Debug, PartialEq)]
pub struct PmlConfig {
    /// Layer thickness in cells on each side, per axis.
    pub thickness: Int3,
    /// Peak conductivity (1/length). `0.0` derives it from the cell size.
    pub sigma_max: f64,
    /// Polynomial grading order of the conductivity profile.
    pub order: f64,
}

impl Default for PmlConfig {
    fn default() -> Self {
        Self {
            thickness: [0; 3],
            sigma_max: 0.0,
            order: 3.0,
        }
    }
}

impl PmlConfig {
    /// Target normal-incidence reflection used for the automatic peak.
    pub const TARGET_REFLECTION: f64 = 1e-8;

    /// Check the config against a grid with `cells` cells.
    pub fn validate(&self, cells: Int3) -> Result<(), ConfigError> {
        validate_thickness(self.thickness, cells)?;
        if !self.sigma_max.is_finite() || self.sigma_max < 0.0 {
            return Err(ConfigError::InvalidPml {
                reason: format!("pml sigma_max must be finite and non-negative, got {}", self.sigma_max),
            });
        }
        if !self.order.is_finite() || self.order <= 0.0 {
            return Err(ConfigError::InvalidPml {
                reason: format!("pml grading order must be positive, got {}", self.order),
            });
        }
        Ok(())
    }

    /// Peak conductivity along `axis` for cell size `step`.
    ///
    /// `σ_max = −(order + 1)·ln(R) / (2·thickness·step)` when not set
    /// explicitly.
    pub fn sigma_peak(&self, axis: Axis, step: f64) -> f64 {
        if self.sigma_max > 0.0 {
            return self.sigma_max;
        }
        let t = self.thickness[axis.index()];
        if t == 0 {
            return 0.0;
        }
        -(self.order + 1.0) * Self::TARGET_REFLECTION.ln() / (2.0 * t as f64 * step)
    }
}

/// Graded-conductivity absorber acting on the real grid.
///
/// Inside the layer, E and B are multiplied every step by
/// `exp(−σ·c·dt)` with `σ = Σ_axes σ_max·(depth/thickness)^order`.
/// The split hooks leave the spectrum untouched.
#[derive(Clone, Debug)]
pub struct DampingPml {
    thickness: Int3,
    /// Per-cell damping factor, cell-major like the real grid.
    factor: Vec<f64>,
}

impl DampingPml {
    /// Precompute damping factors for `grid` at its current `dt`.
    pub fn new(config: &PmlConfig, grid: &SpectralGrid) -> Result<Self, ConfigError> {
        let cells = grid.num_cells();
        config.validate(cells)?;

        let steps = grid.steps();
        let profiles: Vec<Vec<f64>> = Axis::ALL
            .iter()
            .map(|&axis| {
                let a = axis.index();
                let peak = config.sigma_peak(axis, steps[a]);
                (0..cells[a])
                    .map(|i| peak * depth_fraction(i, cells[a], config.thickness[a]).powf(config.order))
                    .collect()
            })
            .collect();

        let scale = C * grid.dt();
        let [nx, ny, nz] = cells;
        let mut factor = Vec::with_capacity(nx * ny * nz);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let sigma = profiles[0][i] + profiles[1][j] + profiles[2][k];
                    factor.push((-sigma * scale).exp());
                }
            }
        }
        tracing::debug!(thickness = ?config.thickness, dt = grid.dt(), "damping pml built");
        Ok(Self {
            thickness: config.thickness,
            factor,
        })
    }
}

/// Relative depth into the layer: 1 at the outer face, 0 in the interior.
fn depth_fraction(i: usize, n: usize, thickness: usize) -> f64 {
    if thickness == 0 {
        return 0.0;
    }
    let depth = if i < thickness {
        thickness - i
    } else if i >= n - thickness {
        i + 1 - (n - thickness)
    } else {
        0
    };
    depth as f64 / thickness as f64
}

impl Pml for DampingPml {
    fn thickness(&self) -> Int3 {
        self.thickness
    }

    fn update_b_split(&mut self, _complex: &mut ComplexGrid) {}

    fn update_e_split(&mut self, _complex: &mut ComplexGrid) {}

    fn do_second_step(&mut self, grid: &mut SpectralGrid) {
        for kind in [FieldKind::E, FieldKind::B] {
            for comp in grid.field_mut(kind).iter_mut() {
                comp.as_mut_slice()
                    .par_iter_mut()
                    .zip(self.factor.par_iter())
                    .for_each(|(v, f)| *v *= f);
            }
        }
    }
}

/// Builds [`DampingPml`]s with fixed profile parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct DampingPmlBuilder {
    /// Peak conductivity; `0.0` derives it from the cell size.
    pub sigma_max: f64,
    /// Polynomial grading order.
    pub order: f64,
}

impl Default for DampingPmlBuilder {
    fn default() -> Self {
        let cfg = PmlConfig::default();
        Self {
            sigma_max: cfg.sigma_max,
            order: cfg.order,
        }
    }
}

impl PmlBuilder for DampingPmlBuilder {
    fn build(&self, thickness: Int3, grid: &SpectralGrid) -> Result<Box<dyn Pml>, ConfigError> {
        let config = PmlConfig {
            thickness,
            sigma_max: self.sigma_max,
            order: self.order,
        };
        Ok(Box::new(DampingPml::new(&config, grid)?))
    }
}
