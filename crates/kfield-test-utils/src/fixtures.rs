//! Grid and field fixtures.
//!
//! - [`cubic_grid`]: unit-step grid with `dt = courant / c`.
//! - [`plane_wave`]: a vacuum plane wave along x with its exact solution.
//! - [`random_fields`]: deterministic seeded E, B, J.

use kfield_core::constants::{C, PI};
use kfield_core::{FieldKind, Int3, Vec3};
use kfield_grid::{GridConfig, SpectralGrid};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Grid of `cells` unit cells with `c·dt = courant`.
pub fn cubic_grid(cells: Int3, courant: f64) -> SpectralGrid {
    SpectralGrid::new(&GridConfig {
        cells,
        min_coords: Vec3::zeros(),
        steps: Vec3::new(1.0, 1.0, 1.0),
        dt: courant / C,
    })
    .unwrap_or_else(|e| panic!("fixture grid {cells:?}: {e}"))
}

/// Linearly polarised vacuum wave travelling along +x:
/// `E_y = cos(kx − ωt)`, `B_z = cos(kx − ωt)`, with `k = 2π·mode / L_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneWave {
    pub k: f64,
    pub amplitude: f64,
}

impl PlaneWave {
    /// Exact E at `r` and time `t`.
    pub fn e(&self, r: Vec3, t: f64) -> Vec3 {
        Vec3::new(0.0, self.phase(r, t).cos() * self.amplitude, 0.0)
    }

    /// Exact B at `r` and time `t`.
    pub fn b(&self, r: Vec3, t: f64) -> Vec3 {
        Vec3::new(0.0, 0.0, self.phase(r, t).cos() * self.amplitude)
    }

    fn phase(&self, r: Vec3, t: f64) -> f64 {
        self.k * (r.x - C * t)
    }
}

/// Fill E and B of `grid` with a travelling wave of `mode` periods
/// along x, and return its description.
pub fn plane_wave(grid: &mut SpectralGrid, mode: usize) -> PlaneWave {
    let lx = grid.num_cells()[0] as f64 * grid.steps().x;
    let wave = PlaneWave {
        k: 2.0 * PI * mode as f64 / lx,
        amplitude: 1.0,
    };
    let t = grid.global_time();
    grid.fill_with(FieldKind::E, |r| wave.e(r, t));
    grid.fill_with(FieldKind::B, |r| wave.b(r, t));
    wave
}

/// Fill E, B and J with uniform values in `[-1, 1)` from a seeded
/// ChaCha8 stream. Same seed, same fields.
pub fn random_fields(grid: &mut SpectralGrid, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for kind in [FieldKind::E, FieldKind::B, FieldKind::J] {
        for comp in grid.field_mut(kind).iter_mut() {
            for v in comp.as_mut_slice() {
                *v = rng.random_range(-1.0..1.0);
            }
        }
    }
}

/// Largest component-wise difference between two fields of equal size.
pub fn max_abs_diff(a: &SpectralGrid, b: &SpectralGrid, kind: FieldKind) -> f64 {
    a.field(kind)
        .iter()
        .zip(b.field(kind).iter())
        .flat_map(|(x, y)| x.as_slice().iter().zip(y.as_slice().iter()))
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Panic unless `|actual − expected| ≤ tol` component-wise.
#[track_caller]
pub fn assert_vec_close(actual: Vec3, expected: Vec3, tol: f64) {
    let diff = (actual - expected).amax();
    assert!(
        diff <= tol,
        "vectors differ by {diff:e} (tol {tol:e}): {actual:?} vs {expected:?}"
    );
}
