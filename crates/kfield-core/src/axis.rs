//! Cartesian coordinate axes.

use crate::error::ConfigError;
use std::fmt;

/// One of the three Cartesian axes.
///
/// Used to name the wrapped axis of a periodic mapping, the rotation
/// axis of a rotation mapping, and the scaled axis of a scale mapping.
///
/// # Examples
///
/// ```
/// use kfield_core::Axis;
///
/// assert_eq!(Axis::X.index(), 0);
/// assert_eq!(Axis::Z.cyclic(1), Axis::X);
/// assert_eq!(Axis::try_from(1).unwrap(), Axis::Y);
/// assert!(Axis::try_from(3).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis (component 0).
    X,
    /// The y axis (component 1).
    Y,
    /// The z axis (component 2).
    Z,
}

impl Axis {
    /// All three axes in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (x = 0, y = 1, z = 2).
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The axis `offset` steps further along the cycle x → y → z → x.
    pub fn cyclic(self, offset: usize) -> Axis {
        Self::ALL[(self.index() + offset) % 3]
    }
}

impl TryFrom<usize> for Axis {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            _ => Err(ConfigError::InvalidAxis { value }),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_try_from() {
        for axis in Axis::ALL {
            assert_eq!(Axis::try_from(axis.index()).unwrap(), axis);
        }
    }

    #[test]
    fn cyclic_wraps_after_z() {
        assert_eq!(Axis::X.cyclic(1), Axis::Y);
        assert_eq!(Axis::X.cyclic(2), Axis::Z);
        assert_eq!(Axis::Y.cyclic(2), Axis::X);
        assert_eq!(Axis::Z.cyclic(3), Axis::Z);
    }

    #[test]
    fn out_of_range_index_is_config_error() {
        assert!(matches!(
            Axis::try_from(7),
            Err(ConfigError::InvalidAxis { value: 7 })
        ));
    }

    #[test]
    fn display_is_lowercase_name() {
        assert_eq!(Axis::Y.to_string(), "y");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cyclic_has_period_three(idx in 0usize..3, offset in 0usize..100) {
                let axis = Axis::try_from(idx).unwrap();
                prop_assert_eq!(axis.cyclic(offset), axis.cyclic(offset + 3));
                prop_assert_eq!(axis.cyclic(offset).index(), (idx + offset) % 3);
            }
        }
    }
}
