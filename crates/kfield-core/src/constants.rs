//! Physical constants in Gaussian (CGS) units.
//!
//! The solvers work in CGS: lengths in centimetres, time in seconds,
//! and the source coupling of the single-step scheme carries the
//! Gaussian `4π` factor.

/// Speed of light in vacuum (cm/s).
pub const C: f64 = 29_979_245_800.0;

/// π, re-exported so kernels read like the formulas they implement.
pub const PI: f64 = std::f64::consts::PI;

/// Gaussian-unit source coupling factor `4π`.
pub const FOUR_PI: f64 = 4.0 * PI;
