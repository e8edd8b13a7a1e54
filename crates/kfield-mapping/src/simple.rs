//! Time-independent mappings: segment gate, periodic wrap, rotation,
//! shift and scale.

use crate::mapped::Mapped;
use kfield_core::{Axis, ConfigError, Vec3};
use nalgebra::Matrix3;

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidMapping {
        reason: reason.into(),
    }
}

// ── Segment ────────────────────────────────────────────────────

/// Identity on the half-open box `[a, b)`.
///
/// Both directions return the coordinate unchanged and report it valid
/// only while every component satisfies `a ≤ x < b`. Used as a bounds
/// gate at the end of a chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    a: Vec3,
    b: Vec3,
}

impl Segment {
    /// Gate on `[a, b)`. Rejects boxes with `a > b` on any axis.
    pub fn new(a: Vec3, b: Vec3) -> Result<Self, ConfigError> {
        if (0..3).any(|i| a[i].is_nan() || b[i].is_nan() || a[i] > b[i]) {
            return Err(invalid(format!(
                "segment lower corner {a:?} exceeds upper corner {b:?}"
            )));
        }
        Ok(Self { a, b })
    }

    /// Lower corner (inclusive).
    pub fn min(&self) -> Vec3 {
        self.a
    }

    /// Upper corner (exclusive).
    pub fn max(&self) -> Vec3 {
        self.b
    }

    /// Whether `coords` lies in `[a, b)`.
    pub fn contains(&self, coords: &Vec3) -> bool {
        (0..3).all(|i| coords[i] >= self.a[i] && coords[i] < self.b[i])
    }

    /// Forward direction.
    pub fn forward(&self, coords: Vec3) -> Mapped {
        Mapped::new(coords, self.contains(&coords))
    }

    /// Inverse direction; identical to [`forward`](Self::forward).
    pub fn inverse(&self, coords: Vec3) -> Mapped {
        self.forward(coords)
    }
}

// ── Periodic ───────────────────────────────────────────────────

/// Periodic wrap of one axis into `[c_min, c_max)`.
///
/// # Examples
///
/// ```
/// use kfield_core::{Axis, Vec3};
/// use kfield_mapping::Periodic;
///
/// let p = Periodic::new(Axis::X, 0.0, 2.0).unwrap();
/// let back = p.inverse(Vec3::new(-0.5, 1.0, 1.0));
/// assert!(back.valid);
/// assert!((back.coords.x - 1.5).abs() < 1e-12);
///
/// // Forward only accepts coordinates already in the window.
/// assert!(!p.forward(Vec3::new(2.0, 0.0, 0.0)).valid);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Periodic {
    axis: Axis,
    c_min: f64,
    c_max: f64,
}

impl Periodic {
    /// Wrap `axis` into `[c_min, c_max)`. The window must be finite and
    /// non-empty.
    pub fn new(axis: Axis, c_min: f64, c_max: f64) -> Result<Self, ConfigError> {
        if !c_min.is_finite() || !c_max.is_finite() || c_max <= c_min {
            return Err(invalid(format!(
                "periodic window [{c_min}, {c_max}) is empty or not finite"
            )));
        }
        Ok(Self { axis, c_min, c_max })
    }

    /// Wrapped axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Window lower bound (inclusive).
    pub fn c_min(&self) -> f64 {
        self.c_min
    }

    /// Window upper bound (exclusive).
    pub fn c_max(&self) -> f64 {
        self.c_max
    }

    /// Period `c_max - c_min`.
    pub fn period(&self) -> f64 {
        self.c_max - self.c_min
    }

    /// Valid only if the axis component is already inside the window.
    /// The coordinate is never changed.
    pub fn forward(&self, coords: Vec3) -> Mapped {
        let x = coords[self.axis.index()];
        Mapped::new(coords, x >= self.c_min && x < self.c_max)
    }

    /// Fold the axis component into the window. Always valid.
    pub fn inverse(&self, coords: Vec3) -> Mapped {
        let mut out = coords;
        out[self.axis.index()] = self.wrap(coords[self.axis.index()]);
        Mapped::ok(out)
    }

    /// Fold `x` into `[c_min, c_max)` with a non-truncating modulo.
    pub fn wrap(&self, x: f64) -> f64 {
        let d = self.period();
        let frac = ((x - self.c_min) / d).fract();
        let frac = if frac >= 0.0 { frac } else { 1.0 + frac };
        let wrapped = self.c_min + frac * d;
        // 1 + tiny negative fraction rounds up to the excluded bound.
        if wrapped >= self.c_max {
            self.c_min
        } else {
            wrapped
        }
    }
}

// ── Rotation ───────────────────────────────────────────────────

/// Right-handed rotation by `angle` radians about `axis`.
///
/// Forward applies the rotation matrix, inverse its transpose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    axis: Axis,
    angle: f64,
    matrix: Matrix3<f64>,
}

impl Rotation {
    /// Rotation about `axis`. Rejects a non-finite angle.
    pub fn new(axis: Axis, angle: f64) -> Result<Self, ConfigError> {
        if !angle.is_finite() {
            return Err(invalid(format!("rotation angle {angle} is not finite")));
        }
        let a = axis.index();
        let a1 = axis.cyclic(1).index();
        let a2 = axis.cyclic(2).index();
        let (sin, cos) = angle.sin_cos();
        let mut matrix = Matrix3::zeros();
        matrix[(a1, a1)] = cos;
        matrix[(a1, a2)] = -sin;
        matrix[(a2, a1)] = sin;
        matrix[(a2, a2)] = cos;
        matrix[(a, a)] = 1.0;
        Ok(Self {
            axis,
            angle,
            matrix,
        })
    }

    /// Rotation axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The inverse-to-direct rotation matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// `M · coords`. Always valid.
    pub fn forward(&self, coords: Vec3) -> Mapped {
        Mapped::ok(self.matrix * coords)
    }

    /// `Mᵀ · coords`. Always valid.
    pub fn inverse(&self, coords: Vec3) -> Mapped {
        Mapped::ok(self.matrix.tr_mul(&coords))
    }
}

// ── Shift / Scale ──────────────────────────────────────────────

/// Translation by a fixed vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shift {
    shift: Vec3,
}

impl Shift {
    /// Translation by `shift`.
    pub fn new(shift: Vec3) -> Self {
        Self { shift }
    }

    /// Translation vector.
    pub fn shift(&self) -> Vec3 {
        self.shift
    }

    /// `coords + shift`.
    pub fn forward(&self, coords: Vec3) -> Mapped {
        Mapped::ok(coords + self.shift)
    }

    /// `coords - shift`.
    pub fn inverse(&self, coords: Vec3) -> Mapped {
        Mapped::ok(coords - self.shift)
    }
}

/// Scaling of a single axis by a fixed factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    axis: Axis,
    coef: f64,
}

impl Scale {
    /// Scale `axis` by `coef`. The factor must be finite and non-zero so
    /// the inverse exists.
    pub fn new(axis: Axis, coef: f64) -> Result<Self, ConfigError> {
        if !coef.is_finite() || coef == 0.0 {
            return Err(invalid(format!("scale factor {coef} has no inverse")));
        }
        Ok(Self { axis, coef })
    }

    /// Scaled axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Scale factor.
    pub fn coef(&self) -> f64 {
        self.coef
    }

    /// Multiply the axis component by the factor.
    pub fn forward(&self, coords: Vec3) -> Mapped {
        let mut out = coords;
        out[self.axis.index()] *= self.coef;
        Mapped::ok(out)
    }

    /// Divide the axis component by the factor.
    pub fn inverse(&self, coords: Vec3) -> Mapped {
        let mut out = coords;
        out[self.axis.index()] /= self.coef;
        Mapped::ok(out)
    }
}
