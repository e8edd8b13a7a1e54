//! Moving causal domain for a tightly focused pulse in a periodic box.
//!
//! A converging spherical pulse is simulated in a box that is periodic
//! along one axis. As time advances the pulse front travels at `c`, so
//! the window of the box that holds physically meaningful values slides
//! along the axis by `c·t`. Lab-frame coordinates are matched against
//! periodic replicas of that window and filtered by a light-cone test,
//! so replicated copies of the field that could not yet exist are
//! discarded instead of re-entering the box.

use crate::mapped::Mapped;
use crate::simple::Periodic;
use kfield_core::constants::C;
use kfield_core::{Axis, ConfigError, MappingError, Vec3};

/// Tight-focusing mapping with outer radius `r0 + l/2` and period `d`.
///
/// The periodic window at `t = 0` is `[−r0 − d + l/2, −r0 + l/2)` along
/// `axis`; at time `t` it sits at `[c_min + c·t, c_max + c·t)`.
///
/// When cut mode is on (the default) coordinates outside the causal
/// domain are reported invalid. With cut mode off the mapping still
/// shifts coordinates into the matching replica but never rejects them.
///
/// # Examples
///
/// ```
/// use kfield_core::{Axis, Vec3};
/// use kfield_mapping::TightFocusingMapping;
///
/// let tf = TightFocusingMapping::new(1.0, 0.5, 2.0, Axis::X).unwrap();
/// assert_eq!(tf.min_coord(), -2.75);
/// assert_eq!(tf.max_coord(), -0.75);
///
/// // A point on the pulse shell is admissible and maps to itself.
/// let m = tf.inverse(Vec3::new(-1.0, 0.0, 0.0), 0.0);
/// assert!(m.valid);
/// assert!((m.coords.x + 1.0).abs() < 1e-12);
///
/// // The outer radius itself is excluded.
/// assert!(!tf.inverse(Vec3::new(-1.25, 0.0, 0.0), 0.0).valid);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TightFocusingMapping {
    r_max: f64,
    if_cut: bool,
    window: Periodic,
    max_periods: usize,
}

impl TightFocusingMapping {
    /// Default bound on the forward replica search.
    pub const DEFAULT_MAX_PERIODS: usize = 64;

    /// Domain for a pulse of radius `r0` and length `l` in a box of period
    /// `d` along `axis`.
    ///
    /// Requires `r0 > 0`, `l ≥ 0` and `d > 0`, all finite.
    pub fn new(r0: f64, l: f64, d: f64, axis: Axis) -> Result<Self, ConfigError> {
        if !r0.is_finite() || r0 <= 0.0 {
            return Err(ConfigError::InvalidMapping {
                reason: format!("focusing radius must be positive, got {r0}"),
            });
        }
        if !l.is_finite() || l < 0.0 {
            return Err(ConfigError::InvalidMapping {
                reason: format!("pulse length must be non-negative, got {l}"),
            });
        }
        if !d.is_finite() || d <= 0.0 {
            return Err(ConfigError::InvalidMapping {
                reason: format!("period must be positive, got {d}"),
            });
        }
        let window = Periodic::new(axis, -r0 - d + 0.5 * l, -r0 + 0.5 * l)?;
        Ok(Self {
            r_max: r0 + 0.5 * l,
            if_cut: true,
            window,
            max_periods: Self::DEFAULT_MAX_PERIODS,
        })
    }

    /// Replace the replica search bound.
    pub fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// Turn cut mode on or off.
    pub fn set_if_cut(&mut self, if_cut: bool) {
        self.if_cut = if_cut;
    }

    /// Whether cut mode is on.
    pub fn if_cut(&self) -> bool {
        self.if_cut
    }

    /// Outer radius `r0 + l/2` at `t = 0`.
    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Window lower bound at `t = 0`.
    pub fn min_coord(&self) -> f64 {
        self.window.c_min()
    }

    /// Window upper bound at `t = 0`.
    pub fn max_coord(&self) -> f64 {
        self.window.c_max()
    }

    /// Period of the window.
    pub fn period(&self) -> f64 {
        self.window.period()
    }

    /// Axis the window slides along.
    pub fn axis(&self) -> Axis {
        self.window.axis()
    }

    /// Replica search bound.
    pub fn max_periods(&self) -> usize {
        self.max_periods
    }

    /// Light-cone admissibility of `coords` at `time`.
    ///
    /// Three regimes, by where the sliding window sits relative to the
    /// origin:
    ///
    /// - window entirely below zero: keep the converging shell
    ///   `−c_max − ct ≤ r < r_max − ct` on the non-positive side;
    /// - window straddling zero while the front has not passed the
    ///   focus: cut the far tails on either side;
    /// - front past the focus: keep the diverging shell on the positive
    ///   side.
    pub fn if_in_area(&self, coords: &Vec3, time: f64) -> bool {
        let ct = C * time;
        let r = coords.norm();
        let x = coords[self.window.axis().index()];
        let c_max = self.window.c_max();

        if c_max + ct < 0.0 {
            !(r >= self.r_max - ct || r < -c_max - ct || x > 0.0)
        } else if -self.r_max + ct <= 0.0 {
            !((x < 0.0 && r > c_max + self.r_max) || (x >= 0.0 && r > c_max + ct))
        } else {
            !(r <= -self.r_max + ct || r > c_max + ct || x < 0.0)
        }
    }

    /// Map a grid coordinate to the lab frame.
    ///
    /// Coordinates outside the sliding window are returned unchanged.
    /// Inside it, periodic replicas are tried one period at a time until
    /// one passes [`if_in_area`](Self::if_in_area).
    ///
    /// # Errors
    ///
    /// [`MappingError::ReplicaOverflow`] if the window has slid so far
    /// that more than [`max_periods`](Self::max_periods) replicas would
    /// have to be searched.
    pub fn forward(&self, coords: Vec3, time: f64) -> Result<Mapped, MappingError> {
        let ct = C * time;
        let a = self.window.axis().index();
        let lo = self.window.c_min() + ct;
        let hi = self.window.c_max() + ct;
        let d = self.window.period();
        let miss = Mapped::new(coords, !self.if_cut);

        if coords[a] < lo || coords[a] >= hi {
            return Ok(miss);
        }

        let (n_periods, shift) = if hi < 0.0 {
            ((-lo / d) as usize + 1, d)
        } else if lo > 0.0 {
            ((hi / d) as usize + 1, -d)
        } else {
            (1, 0.0)
        };
        if n_periods > self.max_periods {
            return Err(MappingError::ReplicaOverflow {
                required: n_periods,
                limit: self.max_periods,
            });
        }

        let mut shifted = coords;
        for _ in 0..n_periods {
            shifted[a] += shift;
            if self.if_in_area(&shifted, time) {
                return Ok(Mapped::ok(shifted));
            }
        }
        Ok(miss)
    }

    /// Map a lab coordinate back into the window (pure periodic wrap).
    ///
    /// Invalid only in cut mode, when the coordinate fails
    /// [`if_in_area`](Self::if_in_area).
    pub fn inverse(&self, coords: Vec3, time: f64) -> Mapped {
        let valid = !self.if_cut || self.if_in_area(&coords, time);
        Mapped::new(self.window.inverse(coords).coords, valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal() -> TightFocusingMapping {
        TightFocusingMapping::new(1.0, 0.5, 2.0, Axis::X).unwrap()
    }

    #[test]
    fn window_and_radius_from_parameters() {
        let tf = literal();
        assert_eq!(tf.r_max(), 1.25);
        assert_eq!(tf.min_coord(), -2.75);
        assert_eq!(tf.max_coord(), -0.75);
        assert_eq!(tf.period(), 2.0);
        assert!(tf.if_cut());
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(TightFocusingMapping::new(0.0, 0.5, 2.0, Axis::X).is_err());
        assert!(TightFocusingMapping::new(1.0, -0.5, 2.0, Axis::X).is_err());
        assert!(TightFocusingMapping::new(1.0, 0.5, 0.0, Axis::X).is_err());
        assert!(TightFocusingMapping::new(1.0, 0.5, f64::NAN, Axis::X).is_err());
    }

    #[test]
    fn shell_point_is_admissible_at_t0() {
        let tf = literal();
        let m = tf.inverse(Vec3::new(-1.0, 0.0, 0.0), 0.0);
        assert!(m.valid);
        assert!((m.coords - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn outer_radius_is_excluded() {
        let tf = literal();
        assert!(!tf.if_in_area(&Vec3::new(-1.25, 0.0, 0.0), 0.0));
        assert!(!tf.inverse(Vec3::new(0.0, -1.25, 0.0), 0.0).valid);
    }

    #[test]
    fn origin_is_outside_converging_shell() {
        let tf = literal();
        assert!(!tf.inverse(Vec3::zeros(), 0.0).valid);
    }

    #[test]
    fn forward_finds_admissible_replica() {
        let tf = literal();
        let m = tf.forward(Vec3::new(-2.5, 0.9, 0.0), 0.0).unwrap();
        assert!(m.valid);
        assert!((m.coords - Vec3::new(-0.5, 0.9, 0.0)).norm() < 1e-12);

        // And the inverse folds it back into the window.
        let back = tf.inverse(m.coords, 0.0);
        assert!(back.valid);
        assert!((back.coords - Vec3::new(-2.5, 0.9, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn forward_outside_window_depends_on_cut() {
        let mut tf = literal();
        let p = Vec3::new(0.5, 0.0, 0.0);
        let m = tf.forward(p, 0.0).unwrap();
        assert!(!m.valid);
        assert_eq!(m.coords, p);

        tf.set_if_cut(false);
        let m = tf.forward(p, 0.0).unwrap();
        assert!(m.valid);
        assert_eq!(m.coords, p);
    }

    #[test]
    fn forward_without_admissible_replica_fails() {
        let tf = literal();
        // On axis, both replicas land on the wrong side or outside r_max.
        let m = tf.forward(Vec3::new(-1.0, 0.0, 0.0), 0.0).unwrap();
        assert!(!m.valid);
        assert_eq!(m.coords, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn window_slides_with_time() {
        let tf = literal();
        // After the front has travelled 1 unit the window is [-1.75, 0.25).
        let t = 1.0 / C;
        let p = Vec3::new(-1.5, 0.0, 0.0);
        assert!(tf.forward(p, 0.0).is_ok());
        let m = tf.forward(Vec3::new(0.5, 0.0, 0.0), t).unwrap();
        assert!(!m.valid);
        let m = tf.forward(Vec3::new(0.1, 0.0, 0.0), t).unwrap();
        // Straddling regime: x ≥ 0 and r ≤ c_max + ct is admissible.
        assert!(m.valid);
        assert_eq!(m.coords, Vec3::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn diverging_regime_keeps_positive_side() {
        let tf = literal();
        // Front well past the focus: ct = 3, window [0.25, 2.25).
        let t = 3.0 / C;
        assert!(tf.if_in_area(&Vec3::new(2.0, 0.0, 0.0), t));
        assert!(!tf.if_in_area(&Vec3::new(-2.0, 0.0, 0.0), t));
        assert!(!tf.if_in_area(&Vec3::new(1.0, 0.0, 0.0), t));
    }

    #[test]
    fn distant_window_overflows_replica_bound() {
        let tf = literal().with_max_periods(8);
        let t = -1000.0 / C;
        let err = tf.forward(Vec3::new(-1001.0, 0.0, 0.0), t).unwrap_err();
        assert!(matches!(
            err,
            MappingError::ReplicaOverflow { limit: 8, .. }
        ));
    }
}
