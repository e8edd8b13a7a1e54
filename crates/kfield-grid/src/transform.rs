//! Real↔complex frequency transforms.
//!
//! The solvers only depend on the [`FourierTransform`] contract. The
//! reference implementation, [`RustFftTransform`], performs a 3D
//! real-to-complex transform by running 1D `rustfft` plans along z
//! (keeping the half spectrum), then y, then x. Line transforms are
//! independent and run in parallel on the rayon pool.

use crate::complex::{complex_size, ComplexGrid};
use crate::grid::SpectralGrid;
use kfield_core::{ConfigError, Complex64, FieldKind, Int3, SolverError};
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Conversion between a real-space grid and its frequency-space copy.
///
/// # Contract
///
/// - `forward` overwrites every mode of E, B and J in `complex`.
/// - `inverse` overwrites E and B in `real`. J is an input the solvers
///   never modify, so the real-space J is left as supplied.
/// - `inverse(forward(x)) == x` to floating tolerance.
/// - Extents must match the transform's planned size; a mismatch is a
///   [`ConfigError::SizeMismatch`].
pub trait FourierTransform: Send {
    /// Real-to-complex transform of E, B and J.
    fn forward(&mut self, real: &SpectralGrid, complex: &mut ComplexGrid)
        -> Result<(), SolverError>;

    /// Complex-to-real transform of E and B, normalised by `1/N`.
    fn inverse(&mut self, complex: &ComplexGrid, real: &mut SpectralGrid)
        -> Result<(), SolverError>;
}

struct LinePlan {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl LinePlan {
    fn new(planner: &mut FftPlanner<f64>, len: usize) -> Self {
        Self {
            len,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }

    fn get(&self, inverse: bool) -> &Arc<dyn Fft<f64>> {
        if inverse {
            &self.inverse
        } else {
            &self.forward
        }
    }
}

/// 3D real-to-complex transform backed by `rustfft`.
///
/// # Examples
///
/// ```
/// use kfield_grid::{ComplexGrid, FourierTransform, GridConfig, RustFftTransform, SpectralGrid};
/// use kfield_core::{FieldKind, Vec3};
///
/// let cfg = GridConfig { cells: [4, 4, 4], ..Default::default() };
/// let mut grid = SpectralGrid::new(&cfg).unwrap();
/// grid.set_value(FieldKind::E, [1, 2, 3], Vec3::new(1.0, 0.0, 0.0));
///
/// let mut fft = RustFftTransform::new(cfg.cells);
/// let mut spectrum = ComplexGrid::for_real_size(cfg.cells);
/// fft.forward(&grid, &mut spectrum).unwrap();
/// grid.set_value(FieldKind::E, [1, 2, 3], Vec3::zeros());
/// fft.inverse(&spectrum, &mut grid).unwrap();
///
/// assert!((grid.value(FieldKind::E, [1, 2, 3]).x - 1.0).abs() < 1e-12);
/// ```
pub struct RustFftTransform {
    real_size: Int3,
    complex_size: Int3,
    x: LinePlan,
    y: LinePlan,
    z: LinePlan,
    /// One field component, layout `(i, j, kc)`.
    work: Vec<Complex64>,
    /// Same component transposed to `(j, kc, i)` for the x pass.
    transposed: Vec<Complex64>,
}

impl RustFftTransform {
    /// Plan transforms for a real grid with extents `real_size`.
    pub fn new(real_size: Int3) -> Self {
        let mut planner = FftPlanner::new();
        let complex_size = complex_size(real_size);
        let n: usize = complex_size.iter().product();
        tracing::debug!(?real_size, ?complex_size, "planned rustfft transform");
        Self {
            real_size,
            complex_size,
            x: LinePlan::new(&mut planner, real_size[0]),
            y: LinePlan::new(&mut planner, real_size[1]),
            z: LinePlan::new(&mut planner, real_size[2]),
            work: vec![Complex64::default(); n],
            transposed: vec![Complex64::default(); n],
        }
    }

    /// Real extents this transform was planned for.
    pub fn real_size(&self) -> Int3 {
        self.real_size
    }

    fn check(&self, real: Int3, complex: Int3) -> Result<(), SolverError> {
        if real != self.real_size {
            return Err(ConfigError::SizeMismatch {
                expected: self.real_size,
                actual: real,
            }
            .into());
        }
        if complex != self.complex_size {
            return Err(SolverError::Transform {
                reason: format!(
                    "complex grid {complex:?} does not match half spectrum {:?}",
                    self.complex_size
                ),
            });
        }
        Ok(())
    }

    /// Forward x and y passes on `work`, or their inverses.
    fn xy_passes(&mut self, inverse: bool) {
        let [nx, ny, _] = self.real_size;
        let nzc = self.complex_size[2];
        let Self {
            x,
            y,
            work,
            transposed,
            ..
        } = self;

        let order: [bool; 2] = if inverse { [true, false] } else { [false, true] };
        for do_x in order {
            if do_x {
                transpose_to_x_major(work, transposed, nx, ny, nzc);
                fft_lines(transposed, x.len, x.get(inverse));
                transpose_from_x_major(transposed, work, nx, ny, nzc);
            } else {
                fft_y_lines(work, ny, nzc, y.get(inverse));
            }
        }
    }
}

impl FourierTransform for RustFftTransform {
    fn forward(
        &mut self,
        real: &SpectralGrid,
        complex: &mut ComplexGrid,
    ) -> Result<(), SolverError> {
        self.check(real.num_cells(), complex.size())?;
        let nz = self.real_size[2];
        let nzc = self.complex_size[2];

        for kind in [FieldKind::E, FieldKind::B, FieldKind::J] {
            for c in 0..3 {
                let src = real.field(kind)[c].as_slice();
                let fft = &self.z.forward;
                let scratch_len = fft.get_inplace_scratch_len();
                self.work
                    .par_chunks_mut(nzc)
                    .zip(src.par_chunks(nz))
                    .for_each_init(
                        || (vec![Complex64::default(); nz], vec![Complex64::default(); scratch_len]),
                        |(line, scratch), (dst, src)| {
                            for (l, &s) in line.iter_mut().zip(src) {
                                *l = Complex64::new(s, 0.0);
                            }
                            fft.process_with_scratch(line, scratch);
                            dst.copy_from_slice(&line[..nzc]);
                        },
                    );

                self.xy_passes(false);

                complex
                    .field_mut(kind)
                    .par_iter_mut()
                    .zip(self.work.par_iter())
                    .for_each(|(v, w)| v[c] = *w);
            }
        }
        Ok(())
    }

    fn inverse(
        &mut self,
        complex: &ComplexGrid,
        real: &mut SpectralGrid,
    ) -> Result<(), SolverError> {
        self.check(real.num_cells(), complex.size())?;
        let nz = self.real_size[2];
        let nzc = self.complex_size[2];
        let norm = 1.0 / self.real_size.iter().product::<usize>() as f64;

        for kind in [FieldKind::E, FieldKind::B] {
            for c in 0..3 {
                self.work
                    .par_iter_mut()
                    .zip(complex.field(kind).par_iter())
                    .for_each(|(w, v)| *w = v[c]);

                self.xy_passes(true);

                let fft = &self.z.inverse;
                let scratch_len = fft.get_inplace_scratch_len();
                real.field_mut(kind)[c]
                    .as_mut_slice()
                    .par_chunks_mut(nz)
                    .zip(self.work.par_chunks(nzc))
                    .for_each_init(
                        || (vec![Complex64::default(); nz], vec![Complex64::default(); scratch_len]),
                        |(line, scratch), (dst, src)| {
                            line[..nzc].copy_from_slice(src);
                            // Rebuild the upper half from Hermitian symmetry.
                            for k in nzc..nz {
                                line[k] = src[nz - k].conj();
                            }
                            fft.process_with_scratch(line, scratch);
                            for (d, l) in dst.iter_mut().zip(line.iter()) {
                                *d = l.re * norm;
                            }
                        },
                    );
            }
        }
        Ok(())
    }
}

fn fft_lines(data: &mut [Complex64], len: usize, fft: &Arc<dyn Fft<f64>>) {
    let scratch_len = fft.get_inplace_scratch_len();
    data.par_chunks_mut(len).for_each_init(
        || vec![Complex64::default(); scratch_len],
        |scratch, line| fft.process_with_scratch(line, scratch),
    );
}

/// Transform along y inside each x slab of a `(i, j, kc)` array.
fn fft_y_lines(data: &mut [Complex64], ny: usize, nzc: usize, fft: &Arc<dyn Fft<f64>>) {
    let scratch_len = fft.get_inplace_scratch_len();
    data.par_chunks_mut(ny * nzc).for_each_init(
        || (vec![Complex64::default(); ny], vec![Complex64::default(); scratch_len]),
        |(line, scratch), slab| {
            for kc in 0..nzc {
                for j in 0..ny {
                    line[j] = slab[j * nzc + kc];
                }
                fft.process_with_scratch(line, scratch);
                for j in 0..ny {
                    slab[j * nzc + kc] = line[j];
                }
            }
        },
    );
}

/// `(i, j, kc)` → `(j, kc, i)`.
fn transpose_to_x_major(src: &[Complex64], dst: &mut [Complex64], nx: usize, ny: usize, nzc: usize) {
    dst.par_chunks_mut(nx).enumerate().for_each(|(jk, line)| {
        let j = jk / nzc;
        let kc = jk % nzc;
        for (i, v) in line.iter_mut().enumerate() {
            *v = src[(i * ny + j) * nzc + kc];
        }
    });
}

/// `(j, kc, i)` → `(i, j, kc)`.
fn transpose_from_x_major(
    src: &[Complex64],
    dst: &mut [Complex64],
    nx: usize,
    ny: usize,
    nzc: usize,
) {
    dst.par_chunks_mut(ny * nzc)
        .enumerate()
        .for_each(|(i, slab)| {
            for (jk, v) in slab.iter_mut().enumerate() {
                *v = src[jk * nx + i];
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use kfield_core::{CVec3, Vec3};

    fn grid(cells: Int3) -> SpectralGrid {
        SpectralGrid::new(&GridConfig {
            cells,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn dc_component_is_sum() {
        let mut g = grid([4, 3, 5]);
        g.field_mut(FieldKind::J)[2].fill(0.5);
        let mut fft = RustFftTransform::new(g.num_cells());
        let mut spec = ComplexGrid::for_real_size(g.num_cells());
        fft.forward(&g, &mut spec).unwrap();

        let dc = spec.get(FieldKind::J, [0, 0, 0]);
        assert!((dc.z.re - 30.0).abs() < 1e-10);
        assert!(dc.z.im.abs() < 1e-10);
        // No other mode is populated.
        let other = spec.get(FieldKind::J, [1, 2, 1]);
        assert!(other.norm() < 1e-10);
    }

    #[test]
    fn single_mode_lands_on_its_wavenumber() {
        let cells = [8, 8, 8];
        let mut g = grid(cells);
        // cos(2π·2·i/nx) along x only
        g.fill_with(FieldKind::E, |r| {
            Vec3::new(0.0, (2.0 * std::f64::consts::PI * 2.0 * r.x / 8.0).cos(), 0.0)
        });
        let mut fft = RustFftTransform::new(cells);
        let mut spec = ComplexGrid::for_real_size(cells);
        fft.forward(&g, &mut spec).unwrap();

        let n = 512.0;
        assert!((spec.get(FieldKind::E, [2, 0, 0]).y.re - n / 2.0).abs() < 1e-9);
        assert!((spec.get(FieldKind::E, [6, 0, 0]).y.re - n / 2.0).abs() < 1e-9);
        assert!(spec.get(FieldKind::E, [3, 0, 0]).y.norm() < 1e-9);
    }

    #[test]
    fn round_trip_restores_e_and_b() {
        let cells = [6, 4, 5];
        let mut g = grid(cells);
        g.fill_with(FieldKind::E, |r| Vec3::new(r.x * 0.1, (r.y + r.z).sin(), -r.z));
        g.fill_with(FieldKind::B, |r| Vec3::new((r.x * r.y).cos(), 1.0, r.y - r.x));
        let before = g.clone();

        let mut fft = RustFftTransform::new(cells);
        let mut spec = ComplexGrid::for_real_size(cells);
        fft.forward(&g, &mut spec).unwrap();
        g.field_mut(FieldKind::E)[0].fill(99.0);
        g.field_mut(FieldKind::B)[2].fill(-99.0);
        fft.inverse(&spec, &mut g).unwrap();

        for kind in [FieldKind::E, FieldKind::B] {
            for c in 0..3 {
                let a = before.field(kind)[c].as_slice();
                let b = g.field(kind)[c].as_slice();
                for (x, y) in a.iter().zip(b) {
                    assert!((x - y).abs() < 1e-10, "{kind} component {c}: {x} vs {y}");
                }
            }
        }
    }

    #[test]
    fn inverse_leaves_real_j_untouched() {
        let cells = [4, 4, 4];
        let mut g = grid(cells);
        g.field_mut(FieldKind::J)[0].fill(3.0);
        let mut spec = ComplexGrid::for_real_size(cells);
        spec.set(
            FieldKind::J,
            [0, 0, 0],
            CVec3::repeat(Complex64::new(0.0, 0.0)),
        );
        let mut fft = RustFftTransform::new(cells);
        fft.inverse(&spec, &mut g).unwrap();
        assert!(g.field(FieldKind::J)[0].as_slice().iter().all(|&v| v == 3.0));
    }

    #[test]
    fn mismatched_grid_is_rejected() {
        let g = grid([4, 4, 4]);
        let mut spec = ComplexGrid::for_real_size([4, 4, 4]);
        let mut fft = RustFftTransform::new([4, 4, 8]);
        assert!(matches!(
            fft.forward(&g, &mut spec),
            Err(SolverError::Config(ConfigError::SizeMismatch { .. }))
        ));
    }
}
