//! Result of a single coordinate conversion.

use kfield_core::Vec3;

/// A converted coordinate together with its domain-validity flag.
///
/// An invalid result is an ordinary outcome: the coordinate lies outside
/// the domain the mapping is defined over, and the caller decides what
/// that means (usually "the field is zero there").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapped {
    /// Converted coordinate. Meaningful even when `valid` is false.
    pub coords: Vec3,
    /// Whether the coordinate lies inside the mapping's domain.
    pub valid: bool,
}

impl Mapped {
    /// Result with an explicit flag.
    pub fn new(coords: Vec3, valid: bool) -> Self {
        Self { coords, valid }
    }

    /// Valid result.
    pub fn ok(coords: Vec3) -> Self {
        Self::new(coords, true)
    }

    /// The coordinate if valid, `None` otherwise.
    pub fn into_option(self) -> Option<Vec3> {
        self.valid.then_some(self.coords)
    }
}
