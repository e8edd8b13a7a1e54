//! The closed set of mapping variants.

use crate::mapped::Mapped;
use crate::simple::{Periodic, Rotation, Scale, Segment, Shift};
use crate::tight_focusing::TightFocusingMapping;
use kfield_core::{MappingError, Vec3};

/// One stage of a coordinate conversion.
///
/// Every variant owns its parameters by value, so cloning a chain never
/// aliases state between copies.
///
/// # Examples
///
/// ```
/// use kfield_core::{Axis, Vec3};
/// use kfield_mapping::{Mapping, Scale, Shift};
///
/// let shift = Mapping::from(Shift::new(Vec3::new(1.0, 0.0, 0.0)));
/// let scale = Mapping::from(Scale::new(Axis::X, 2.0).unwrap());
///
/// let p = Vec3::new(1.0, 0.0, 0.0);
/// let m = scale.forward(shift.forward(p, 0.0).unwrap().coords, 0.0).unwrap();
/// assert_eq!(m.coords.x, 4.0);
/// assert_eq!(scale.inverse(m.coords, 0.0).coords.x, 2.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mapping {
    /// Both directions are the identity and always valid.
    #[default]
    Identity,
    /// Identity gated on a half-open box.
    Segment(Segment),
    /// Periodic wrap of one axis.
    Periodic(Periodic),
    /// Rotation about an axis.
    Rotation(Rotation),
    /// Translation.
    Shift(Shift),
    /// Single-axis scaling.
    Scale(Scale),
    /// Sliding causal window for a tightly focused pulse.
    TightFocusing(TightFocusingMapping),
}

impl Mapping {
    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Segment(_) => "segment",
            Self::Periodic(_) => "periodic",
            Self::Rotation(_) => "rotation",
            Self::Shift(_) => "shift",
            Self::Scale(_) => "scale",
            Self::TightFocusing(_) => "tight-focusing",
        }
    }

    /// Convert a coordinate from the grid frame to the lab frame.
    ///
    /// Only [`Mapping::TightFocusing`] can fail; every other variant
    /// returns `Ok`.
    pub fn forward(&self, coords: Vec3, time: f64) -> Result<Mapped, MappingError> {
        Ok(match self {
            Self::Identity => Mapped::ok(coords),
            Self::Segment(m) => m.forward(coords),
            Self::Periodic(m) => m.forward(coords),
            Self::Rotation(m) => m.forward(coords),
            Self::Shift(m) => m.forward(coords),
            Self::Scale(m) => m.forward(coords),
            Self::TightFocusing(m) => m.forward(coords, time)?,
        })
    }

    /// Convert a coordinate from the lab frame back to the grid frame.
    pub fn inverse(&self, coords: Vec3, time: f64) -> Mapped {
        match self {
            Self::Identity => Mapped::ok(coords),
            Self::Segment(m) => m.inverse(coords),
            Self::Periodic(m) => m.inverse(coords),
            Self::Rotation(m) => m.inverse(coords),
            Self::Shift(m) => m.inverse(coords),
            Self::Scale(m) => m.inverse(coords),
            Self::TightFocusing(m) => m.inverse(coords, time),
        }
    }
}

impl From<Segment> for Mapping {
    fn from(m: Segment) -> Self {
        Self::Segment(m)
    }
}

impl From<Periodic> for Mapping {
    fn from(m: Periodic) -> Self {
        Self::Periodic(m)
    }
}

impl From<Rotation> for Mapping {
    fn from(m: Rotation) -> Self {
        Self::Rotation(m)
    }
}

impl From<Shift> for Mapping {
    fn from(m: Shift) -> Self {
        Self::Shift(m)
    }
}

impl From<Scale> for Mapping {
    fn from(m: Scale) -> Self {
        Self::Scale(m)
    }
}

impl From<TightFocusingMapping> for Mapping {
    fn from(m: TightFocusingMapping) -> Self {
        Self::TightFocusing(m)
    }
}
