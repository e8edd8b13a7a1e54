//! Helpers shared by the per-mode kernels.

use kfield_core::constants::C;
use kfield_core::{complexify, CVec3, Complex64, Vec3};

/// The imaginary unit.
pub(crate) const I: Complex64 = Complex64::new(0.0, 1.0);

/// Real scalar lifted to a complex one.
#[inline]
pub(crate) fn re(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Unit wavevector as a complex vector together with `|k|·c`, or
/// `None` for the zero mode.
#[inline]
pub(crate) fn direction(k: &Vec3) -> Option<(CVec3, f64)> {
    let norm = k.norm();
    if norm == 0.0 {
        return None;
    }
    Some((complexify(&(*k / norm)), norm * C))
}

/// Longitudinal projection `k̂ (k̂ · v)`.
#[inline]
pub(crate) fn longitudinal(khat: &CVec3, v: &CVec3) -> CVec3 {
    *khat * khat.dot(v)
}
