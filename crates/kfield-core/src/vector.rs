//! Vector aliases used throughout the workspace.
//!
//! Real-space coordinates and wavevectors are [`Vec3`]; per-mode field
//! amplitudes in frequency space are [`CVec3`]. Both are thin aliases
//! over `nalgebra` so cross and dot products come for free. Note that
//! `CVec3::dot` is the bilinear (non-conjugating) product, which is what
//! the longitudinal projection `k̂(k̂·J)` needs.

pub use num_complex::Complex64;

/// Real 3-vector (coordinates, wavevectors, real field samples).
pub type Vec3 = nalgebra::Vector3<f64>;

/// Complex 3-vector (one frequency-space field value).
pub type CVec3 = nalgebra::Vector3<Complex64>;

/// Integer cell triple (cell counts, cell indices, PML thickness).
pub type Int3 = [usize; 3];

/// Promote a real vector to a complex one with zero imaginary part.
pub fn complexify(v: &Vec3) -> CVec3 {
    v.map(|x| Complex64::new(x, 0.0))
}
