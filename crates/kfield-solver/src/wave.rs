//! Wavevector tables for the half-spectrum complex grid.

use kfield_core::constants::PI;
use kfield_core::{Int3, Vec3};
use kfield_grid::complex_size;

/// Per-axis wavenumbers of every complex-grid index.
///
/// Along the fully transformed axes (x, y) index `i` stands for the
/// signed frequency `m = i` for `i ≤ n/2` and `m = i − n` above; along
/// the half-spectrum axis (z) `m = i`. The wavenumber is
/// `2π·m / (n·step)`.
///
/// # Examples
///
/// ```
/// use kfield_core::Vec3;
/// use kfield_solver::WaveVectors;
///
/// let w = WaveVectors::new([4, 4, 4], Vec3::new(1.0, 1.0, 1.0));
/// let pi = std::f64::consts::PI;
/// assert!((w.at([1, 0, 0]).x - pi / 2.0).abs() < 1e-12);
/// assert!((w.at([3, 0, 0]).x + pi / 2.0).abs() < 1e-12);
/// assert!((w.at([0, 0, 2]).z - pi).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaveVectors {
    size: Int3,
    axes: [Vec<f64>; 3],
}

impl WaveVectors {
    /// Tables for a real grid with `real_cells` cells of size `steps`.
    pub fn new(real_cells: Int3, steps: Vec3) -> Self {
        let size = complex_size(real_cells);
        let axis = |a: usize, half: bool| -> Vec<f64> {
            let n = real_cells[a];
            let span = n as f64 * steps[a];
            (0..size[a])
                .map(|i| {
                    let m = if half || i <= n / 2 {
                        i as f64
                    } else {
                        i as f64 - n as f64
                    };
                    2.0 * PI * m / span
                })
                .collect()
        };
        Self {
            size,
            axes: [axis(0, false), axis(1, false), axis(2, true)],
        }
    }

    /// Complex-grid extents the tables cover.
    pub fn size(&self) -> Int3 {
        self.size
    }

    /// Wavevector of complex index `idx`.
    #[inline]
    pub fn at(&self, idx: Int3) -> Vec3 {
        Vec3::new(self.axes[0][idx[0]], self.axes[1][idx[1]], self.axes[2][idx[2]])
    }

    /// Complex index and wavevector of a flat cell-major index.
    #[inline]
    pub fn at_flat(&self, flat: usize) -> (Int3, Vec3) {
        let [_, ny, nz] = self.size;
        let idx = [flat / (ny * nz), (flat / nz) % ny, flat % nz];
        (idx, self.at(idx))
    }
}
