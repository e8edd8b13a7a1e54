//! Time-staggered PSATD: half-B, E, half-B per step.

use crate::base::SpectralSolverBase;
use crate::mode::{direction, longitudinal, re, I};
use crate::pml::PmlBuilder;
use crate::solver::FieldSolver;
use kfield_core::{CVec3, Complex64, ConfigError, FieldKind, Int3, SolverError, Vec3};
use kfield_grid::{FourierTransform, SpectralGrid};
use std::time::Instant;

/// Advance B of one mode by `dt` (a half step of the full scheme).
///
/// With `S = sin(|k|c·dt/2)`, `C = cos(|k|c·dt/2)`:
///
/// `B += −2i·S·(k̂×E) + i·(1−C)/(|k|c)·(k̂×(J − J_prev))`
///
/// The zero mode is left untouched.
#[inline]
pub fn half_b_mode(k: Vec3, dt: f64, e: &CVec3, b: &mut CVec3, j: &CVec3, j_prev: &CVec3) {
    let Some((khat, kc)) = direction(&k) else {
        return;
    };
    let (s, c) = (kc * dt * 0.5).sin_cos();
    let coeff1 = I * (2.0 * s);
    let coeff2 = I * ((1.0 - c) / kc);
    let dj = *j - *j_prev;
    *b += khat.cross(e) * (-coeff1) + khat.cross(&dj) * coeff2;
}

/// Advance E of one mode by the full step `dt`.
///
/// With `S = sin(|k|c·dt/2)` and `J_l = k̂(k̂·J)`:
///
/// `E += 2i·S·(k̂×B) − 2S/(|k|c)·J + (2S/(|k|c) − dt)·J_l`
///
/// The zero mode integrates the current locally: `E += dt·J`.
#[inline]
pub fn e_mode(k: Vec3, dt: f64, e: &mut CVec3, b: &CVec3, j: &CVec3) {
    let Some((khat, kc)) = direction(&k) else {
        *e += *j * re(dt);
        return;
    };
    let s = (kc * dt * 0.5).sin();
    let coeff1: Complex64 = I * (2.0 * s);
    let coeff2 = 2.0 * s / kc;
    let coeff3 = coeff2 - dt;
    *e += khat.cross(b) * coeff1 - *j * re(coeff2) + longitudinal(&khat, j) * re(coeff3);
}

/// Time-staggered spectral solver.
///
/// One [`advance`](FieldSolver::advance) runs, in order:
///
/// 1. forward transform
/// 2. PML split-B pre-step, half-B update
/// 3. PML split-E pre-step, E update
/// 4. PML split-B post-step, half-B update
/// 5. save J as `J_prev` (still in frequency space)
/// 6. inverse transform, PML second step
///
/// Both half-B updates read the same `J` and the same `J_prev`, which
/// is only overwritten in step 5. Current is held fixed across a step.
///
/// # Examples
///
/// ```
/// use kfield_core::{FieldKind, Vec3};
/// use kfield_grid::{GridConfig, SpectralGrid};
/// use kfield_solver::{FieldSolver, PsatdTimeStaggered};
///
/// let mut grid = SpectralGrid::new(&GridConfig { cells: [8, 8, 8], ..Default::default() }).unwrap();
/// grid.fill_with(FieldKind::J, |_| Vec3::new(0.0, 0.0, 1.0));
/// let mut solver = PsatdTimeStaggered::new(&grid);
/// solver.advance(&mut grid).unwrap();
///
/// // A uniform current only drives the zero mode: E += dt·J.
/// let ez = grid.value(FieldKind::E, [3, 3, 3]).z;
/// assert!((ez - grid.dt()).abs() < 1e-9 * grid.dt());
/// ```
#[derive(Debug)]
pub struct PsatdTimeStaggered {
    base: SpectralSolverBase,
    j_prev: Vec<CVec3>,
}

impl PsatdTimeStaggered {
    /// Solver sized for `grid`.
    pub fn new(grid: &SpectralGrid) -> Self {
        let base = SpectralSolverBase::new(grid);
        let j_prev = vec![CVec3::repeat(Complex64::new(0.0, 0.0)); base.complex().len()];
        tracing::debug!(cells = ?grid.num_cells(), "time-staggered psatd solver ready");
        Self { base, j_prev }
    }

    /// Use `transform` instead of the default `rustfft` transform.
    pub fn with_transform(mut self, transform: Box<dyn FourierTransform>) -> Self {
        self.base.set_transform(transform);
        self
    }

    /// Build PMLs with `builder` instead of the damping absorber.
    pub fn with_pml_builder(mut self, builder: Box<dyn PmlBuilder>) -> Self {
        self.base.set_pml_builder(builder);
        self
    }

    /// Scan for NaN/Inf after every advance.
    pub fn with_check_finite(mut self, on: bool) -> Self {
        self.base.set_check_finite(on);
        self
    }

    /// Shared spectral state.
    pub fn base(&self) -> &SpectralSolverBase {
        &self.base
    }

    /// Mutable shared spectral state.
    pub fn base_mut(&mut self) -> &mut SpectralSolverBase {
        &mut self.base
    }

    /// Frequency-space current saved at the end of the last step.
    pub fn j_prev(&self) -> &[CVec3] {
        &self.j_prev
    }

    /// Half-B pass over the B area.
    pub fn update_half_b(&mut self, dt: f64) {
        let j_prev = &self.j_prev;
        self.base.update_modes(FieldKind::B, |flat, k, e, b, j| {
            half_b_mode(k, dt, e, b, j, &j_prev[flat]);
        });
    }

    /// E pass over the E area.
    pub fn update_e(&mut self, dt: f64) {
        self.base.update_modes(FieldKind::E, |_, k, e, b, j| {
            e_mode(k, dt, e, b, j);
        });
    }

    fn save_j(&mut self) {
        self.j_prev
            .copy_from_slice(self.base.complex().field(FieldKind::J));
    }
}

impl FieldSolver for PsatdTimeStaggered {
    fn name(&self) -> &str {
        "psatd-time-staggered"
    }

    fn advance(&mut self, grid: &mut SpectralGrid) -> Result<(), SolverError> {
        let start = Instant::now();
        self.base.prepare(grid)?;
        let dt = grid.dt();

        self.base.forward(grid)?;

        self.base.pml_b_split();
        self.update_half_b(dt * 0.5);

        self.base.pml_e_split();
        self.update_e(dt);

        self.base.pml_b_split_post();
        self.update_half_b(dt * 0.5);

        self.save_j();
        self.base.inverse(grid)?;
        self.base.pml_second_step(grid);

        self.base.finish(grid)?;
        tracing::trace!(
            solver = self.name(),
            elapsed_us = start.elapsed().as_micros() as u64,
            time = grid.global_time(),
            "advanced"
        );
        Ok(())
    }

    fn configure_pml(&mut self, grid: &SpectralGrid, thickness: Int3) -> Result<(), ConfigError> {
        self.base.configure_pml(grid, thickness)
    }

    fn set_time_step(&mut self, grid: &mut SpectralGrid, dt: f64) -> Result<bool, ConfigError> {
        self.base.set_time_step(grid, dt)
    }

    fn dt(&self) -> f64 {
        self.base.dt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfield_core::constants::C;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn cv(x: Complex64, y: Complex64, z: Complex64) -> CVec3 {
        CVec3::new(x, y, z)
    }

    fn zero() -> CVec3 {
        CVec3::repeat(c(0.0, 0.0))
    }

    #[test]
    fn zero_mode_b_is_untouched() {
        let e = cv(c(1.0, 2.0), c(3.0, 0.0), c(0.0, 1.0));
        let j = cv(c(5.0, 0.0), c(0.0, 0.0), c(1.0, 1.0));
        let mut b = cv(c(0.5, 0.0), c(0.0, 0.5), c(0.25, 0.25));
        let before = b;
        half_b_mode(Vec3::zeros(), 0.3, &e, &mut b, &j, &zero());
        assert_eq!(b, before);
    }

    #[test]
    fn zero_mode_e_integrates_current() {
        let j = cv(c(5.0, 0.0), c(0.0, -2.0), c(1.0, 1.0));
        let mut e = cv(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0));
        let b = cv(c(9.0, 9.0), c(9.0, 9.0), c(9.0, 9.0));
        e_mode(Vec3::zeros(), 0.5, &mut e, &b, &j);
        assert_eq!(e, cv(c(3.5, 0.0), c(0.0, -1.0), c(0.5, 0.5)));
    }

    #[test]
    fn half_b_current_term_needs_a_change_in_j() {
        let k = Vec3::new(1.0, 0.0, 0.0);
        let j = cv(c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0));
        let mut b = zero();
        half_b_mode(k, 1.0 / C, &zero(), &mut b, &j, &j);
        assert_eq!(b, zero());

        half_b_mode(k, 1.0 / C, &zero(), &mut b, &j, &zero());
        // (1 − cos ½)/c along k̂ × ŷ = ẑ, times i.
        let expected = (1.0 - 0.5f64.cos()) / C;
        assert!(b.x.norm() < 1e-30 && b.y.norm() < 1e-30);
        assert!((b.z - c(0.0, expected)).norm() < 1e-20);
    }

    #[test]
    fn e_update_is_transverse_for_longitudinal_current() {
        // J ∥ k: the transverse terms cancel and E += −dt·J exactly.
        let k = Vec3::new(0.0, 2.0, 0.0);
        let j = cv(c(0.0, 0.0), c(3.0, 0.0), c(0.0, 0.0));
        let mut e = zero();
        let dt = 0.7 / C;
        e_mode(k, dt, &mut e, &zero(), &j);
        assert!((e.y - c(-dt * 3.0, 0.0)).norm() < 1e-20);
        assert!(e.x.norm() < 1e-30 && e.z.norm() < 1e-30);
    }

    #[test]
    fn constant_current_fixed_point() {
        // k̂ = x̂, J = ŷ j: E = 0, B = ẑ·i·j/(|k|c) is stationary.
        let k = Vec3::new(3.0, 0.0, 0.0);
        let kc = 3.0 * C;
        let j = cv(c(0.0, 0.0), c(2.0, 0.0), c(0.0, 0.0));
        let mut e = zero();
        let mut b = cv(c(0.0, 0.0), c(0.0, 0.0), c(0.0, 2.0 / kc));
        let dt = 0.4 / C;
        for _ in 0..50 {
            half_b_mode(k, dt / 2.0, &e, &mut b, &j, &j);
            e_mode(k, dt, &mut e, &b, &j);
            half_b_mode(k, dt / 2.0, &e, &mut b, &j, &j);
        }
        assert!(e.norm() < 1e-12, "{e:?}");
        assert!((b.z - c(0.0, 2.0 / kc)).norm() < 1e-20);
    }
}
