//! State and bookkeeping shared by the spectral solvers.

use crate::pml::{validate_thickness, DampingPmlBuilder, Pml, PmlBuilder};
use crate::wave::WaveVectors;
use kfield_core::{CVec3, ConfigError, FieldKind, Int3, SolverError, Vec3};
use kfield_grid::{Area, ComplexGrid, FourierTransform, RustFftTransform, SpectralGrid};
use rayon::prelude::*;

/// Frequency-space working state of a spectral solver.
///
/// Owns the complex grid, the transform, the wavevector tables, the
/// update areas and the optional PML. The real-space grid is passed in
/// to every call; the base remembers its extents and rejects any other.
///
/// # PML lifecycle
///
/// The PML is rebuilt from scratch through the [`PmlBuilder`] whenever
/// its thickness is reconfigured or the time step changes, never
/// patched in place.
pub struct SpectralSolverBase {
    real_cells: Int3,
    dt: f64,
    complex: ComplexGrid,
    waves: WaveVectors,
    transform: Box<dyn FourierTransform>,
    e_area: Area,
    b_area: Area,
    internal_area: Area,
    pml: Option<Box<dyn Pml>>,
    pml_builder: Box<dyn PmlBuilder>,
    check_finite: bool,
}

impl SpectralSolverBase {
    /// Base sized for `grid`, with a [`RustFftTransform`] and a
    /// [`DampingPmlBuilder`].
    pub fn new(grid: &SpectralGrid) -> Self {
        let real_cells = grid.num_cells();
        let complex = ComplexGrid::for_real_size(real_cells);
        let full = Area::full(complex.size());
        Self {
            real_cells,
            dt: grid.dt(),
            waves: WaveVectors::new(real_cells, grid.steps()),
            complex,
            transform: Box::new(RustFftTransform::new(real_cells)),
            e_area: full,
            b_area: full,
            internal_area: Area::full(real_cells),
            pml: None,
            pml_builder: Box::new(DampingPmlBuilder::default()),
            check_finite: false,
        }
    }

    /// Replace the frequency transform.
    pub fn set_transform(&mut self, transform: Box<dyn FourierTransform>) {
        self.transform = transform;
    }

    /// Replace the PML builder. Takes effect on the next rebuild.
    pub fn set_pml_builder(&mut self, builder: Box<dyn PmlBuilder>) {
        self.pml_builder = builder;
    }

    /// Scan the real grid for NaN/Inf after every advance.
    pub fn set_check_finite(&mut self, on: bool) {
        self.check_finite = on;
    }

    /// Real-space extents this solver was built for.
    pub fn real_cells(&self) -> Int3 {
        self.real_cells
    }

    /// Time step the current PML was built for.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Wavevector of complex index `idx`.
    pub fn wave_vector(&self, idx: Int3) -> Vec3 {
        self.waves.at(idx)
    }

    /// Wavevector tables.
    pub fn waves(&self) -> &WaveVectors {
        &self.waves
    }

    /// Frequency-space working grid.
    pub fn complex(&self) -> &ComplexGrid {
        &self.complex
    }

    /// Mutable frequency-space working grid.
    pub fn complex_mut(&mut self) -> &mut ComplexGrid {
        &mut self.complex
    }

    /// Complex-grid region the E update runs over.
    pub fn e_area(&self) -> Area {
        self.e_area
    }

    /// Complex-grid region the B updates run over.
    pub fn b_area(&self) -> Area {
        self.b_area
    }

    /// Real-space cells outside the PML layer.
    pub fn internal_area(&self) -> Area {
        self.internal_area
    }

    /// The active PML, if any.
    pub fn pml(&self) -> Option<&dyn Pml> {
        self.pml.as_deref()
    }

    /// Replace the PML with a fresh one of `thickness` cells per side.
    ///
    /// Fails with [`ConfigError::PmlTooThick`] if two layers do not fit
    /// along some axis; the previous PML is kept in that case.
    pub fn configure_pml(
        &mut self,
        grid: &SpectralGrid,
        thickness: Int3,
    ) -> Result<(), ConfigError> {
        self.check_grid(grid)?;
        validate_thickness(thickness, self.real_cells)?;
        let pml = self.pml_builder.build(thickness, grid)?;
        self.pml = Some(pml);
        self.dt = grid.dt();
        self.update_areas();
        tracing::debug!(?thickness, "pml configured");
        Ok(())
    }

    /// Drop the PML.
    pub fn clear_pml(&mut self) {
        if self.pml.take().is_some() {
            tracing::debug!("pml removed");
        }
        self.update_areas();
    }

    /// Set `dt` on the grid and rebuild the PML if the value changed.
    ///
    /// Returns whether the value changed. Unchanged `dt` is a no-op.
    pub fn set_time_step(&mut self, grid: &mut SpectralGrid, dt: f64) -> Result<bool, ConfigError> {
        self.check_grid(grid)?;
        let changed = grid.set_time_step(dt)?;
        if changed || dt != self.dt {
            self.rebuild_pml(grid)?;
            tracing::debug!(dt, "time step changed");
        }
        Ok(changed)
    }

    /// Validate the grid and pick up a `dt` changed directly on it.
    pub fn prepare(&mut self, grid: &SpectralGrid) -> Result<(), ConfigError> {
        self.check_grid(grid)?;
        if grid.dt() != self.dt {
            if self.pml.is_some() {
                tracing::warn!(
                    old = self.dt,
                    new = grid.dt(),
                    "grid dt changed outside the solver, rebuilding pml"
                );
            }
            self.rebuild_pml(grid)?;
        }
        Ok(())
    }

    /// Real → complex transform of E, B and J.
    pub fn forward(&mut self, grid: &SpectralGrid) -> Result<(), SolverError> {
        self.transform.forward(grid, &mut self.complex)
    }

    /// Complex → real transform of E and B.
    pub fn inverse(&mut self, grid: &mut SpectralGrid) -> Result<(), SolverError> {
        self.transform.inverse(&self.complex, grid)
    }

    /// Split-B pre-step of the PML, if present.
    pub fn pml_b_split(&mut self) {
        if let Some(pml) = self.pml.as_mut() {
            pml.update_b_split(&mut self.complex);
        }
    }

    /// Split-E pre-step of the PML, if present.
    pub fn pml_e_split(&mut self) {
        if let Some(pml) = self.pml.as_mut() {
            pml.update_e_split(&mut self.complex);
        }
    }

    /// Split-B post-step of the PML, if present.
    pub fn pml_b_split_post(&mut self) {
        if let Some(pml) = self.pml.as_mut() {
            pml.update_b_split_post(&mut self.complex);
        }
    }

    /// Second (damping) step of the PML on the real grid, if present.
    pub fn pml_second_step(&mut self, grid: &mut SpectralGrid) {
        if let Some(pml) = self.pml.as_mut() {
            pml.do_second_step(grid);
        }
    }

    /// Apply `f` to every mode of the E or B update area in parallel.
    ///
    /// `f` receives the flat mode index, the wavevector, E, B and J.
    /// Each call touches only its own mode.
    pub fn update_modes<F>(&mut self, region: FieldKind, f: F)
    where
        F: Fn(usize, Vec3, &mut CVec3, &mut CVec3, &CVec3) + Sync + Send,
    {
        let area = match region {
            FieldKind::E => self.e_area,
            _ => self.b_area,
        };
        let waves = &self.waves;
        let (e, b, j) = self.complex.split_mut();
        e.par_iter_mut()
            .zip(b.par_iter_mut())
            .zip(j.par_iter())
            .enumerate()
            .for_each(|(flat, ((e, b), j))| {
                let (idx, k) = waves.at_flat(flat);
                if area.contains(idx) {
                    f(flat, k, e, b, j);
                }
            });
    }

    /// End-of-step bookkeeping: optional NaN scan, then advance the
    /// grid's global time by `dt`.
    pub fn finish(&mut self, grid: &mut SpectralGrid) -> Result<(), SolverError> {
        if self.check_finite {
            if let Some((field, index)) = grid.first_non_finite() {
                return Err(SolverError::NonFinite { field, index });
            }
        }
        grid.set_global_time(grid.global_time() + grid.dt());
        Ok(())
    }

    fn check_grid(&self, grid: &SpectralGrid) -> Result<(), ConfigError> {
        if grid.num_cells() != self.real_cells {
            return Err(ConfigError::SizeMismatch {
                expected: self.real_cells,
                actual: grid.num_cells(),
            });
        }
        Ok(())
    }

    fn rebuild_pml(&mut self, grid: &SpectralGrid) -> Result<(), ConfigError> {
        if let Some(old) = &self.pml {
            let thickness = old.thickness();
            self.pml = Some(self.pml_builder.build(thickness, grid)?);
            tracing::debug!(?thickness, dt = grid.dt(), "pml rebuilt");
        }
        self.dt = grid.dt();
        Ok(())
    }

    fn update_areas(&mut self) {
        let full = Area::full(self.complex.size());
        self.e_area = full;
        self.b_area = full;
        let t = self.pml.as_ref().map_or([0; 3], |p| p.thickness());
        let n = self.real_cells;
        self.internal_area = Area::new(t, [n[0] - t[0], n[1] - t[1], n[2] - t[2]]);
    }
}

impl std::fmt::Debug for SpectralSolverBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralSolverBase")
            .field("real_cells", &self.real_cells)
            .field("dt", &self.dt)
            .field("pml_thickness", &self.pml.as_ref().map(|p| p.thickness()))
            .field("check_finite", &self.check_finite)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfield_grid::GridConfig;

    fn grid(cells: Int3) -> SpectralGrid {
        SpectralGrid::new(&GridConfig {
            cells,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn areas_cover_full_spectrum() {
        let g = grid([8, 6, 4]);
        let base = SpectralSolverBase::new(&g);
        assert_eq!(base.e_area(), Area::full([8, 6, 3]));
        assert_eq!(base.b_area(), Area::full([8, 6, 3]));
        assert_eq!(base.internal_area(), Area::full([8, 6, 4]));
    }

    #[test]
    fn pml_shrinks_internal_area() {
        let g = grid([8, 8, 8]);
        let mut base = SpectralSolverBase::new(&g);
        base.configure_pml(&g, [2, 1, 0]).unwrap();
        assert_eq!(base.internal_area(), Area::new([2, 1, 0], [6, 7, 8]));
        assert_eq!(base.b_area(), Area::full([8, 8, 5]));
        base.clear_pml();
        assert!(base.pml().is_none());
        assert_eq!(base.internal_area(), Area::full([8, 8, 8]));
    }

    #[test]
    fn too_thick_pml_keeps_previous() {
        let g = grid([8, 8, 8]);
        let mut base = SpectralSolverBase::new(&g);
        base.configure_pml(&g, [1, 1, 1]).unwrap();
        let err = base.configure_pml(&g, [1, 9, 1]).unwrap_err();
        assert!(matches!(err, ConfigError::PmlTooThick { .. }));
        assert_eq!(base.pml().map(|p| p.thickness()), Some([1, 1, 1]));
    }

    #[test]
    fn mismatched_grid_rejected() {
        let g = grid([8, 8, 8]);
        let other = grid([8, 8, 4]);
        let mut base = SpectralSolverBase::new(&g);
        assert!(matches!(
            base.prepare(&other),
            Err(ConfigError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn finish_advances_global_time() {
        let mut g = grid([2, 2, 2]);
        let mut base = SpectralSolverBase::new(&g);
        base.finish(&mut g).unwrap();
        base.finish(&mut g).unwrap();
        assert!((g.global_time() - 2.0 * g.dt()).abs() < 1e-30);
    }

    #[test]
    fn finish_reports_nan_when_enabled() {
        let mut g = grid([2, 2, 2]);
        let mut base = SpectralSolverBase::new(&g);
        g.field_mut(FieldKind::E)[0].set([1, 1, 1], f64::INFINITY);
        assert!(base.finish(&mut g).is_ok());
        base.set_check_finite(true);
        assert_eq!(
            base.finish(&mut g),
            Err(SolverError::NonFinite {
                field: FieldKind::E,
                index: 7
            })
        );
    }

    #[test]
    fn update_modes_sees_its_own_wavevector() {
        let g = grid([4, 4, 4]);
        let mut base = SpectralSolverBase::new(&g);
        base.update_modes(FieldKind::B, |_, k, e, _, _| {
            e.x = kfield_core::Complex64::new(k.x, k.y);
        });
        let idx = [3, 1, 2];
        let k = base.wave_vector(idx);
        let e = base.complex().get(FieldKind::E, idx);
        assert_eq!(e.x, kfield_core::Complex64::new(k.x, k.y));
    }
}
