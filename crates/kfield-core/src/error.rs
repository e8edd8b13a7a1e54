//! Error types for the kfield workspace.
//!
//! Organized by subsystem: configuration (eager, at setup time),
//! mapping (bounded replica search), and solving (one `advance()` call).
//! Note that a coordinate falling outside a mapping's domain is *not*
//! an error; it is reported through the validity flag of
//! `kfield_mapping::Mapped`.

use crate::axis::Axis;
use crate::vector::Int3;
use std::error::Error;
use std::fmt;

/// Errors detected while configuring a grid, solver, PML or mapping.
///
/// Always raised by the configuring call itself, never in the middle
/// of an `advance()`.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The grid has zero cells along at least one axis.
    EmptyGrid {
        /// The offending cell counts.
        cells: Int3,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The rejected value.
        value: f64,
    },
    /// A grid step is NaN, infinite, zero, or negative.
    InvalidStep {
        /// Axis of the bad step.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
    /// PML layers on both sides of an axis do not fit in the grid.
    PmlTooThick {
        /// Axis on which the layer is too thick.
        axis: Axis,
        /// Requested thickness in cells (per side).
        thickness: usize,
        /// Cells available along that axis.
        cells: usize,
    },
    /// An integer axis index outside `0..3`.
    InvalidAxis {
        /// The rejected index.
        value: usize,
    },
    /// A mapping constructor received an invalid parameter.
    InvalidMapping {
        /// Description of the invalid parameter.
        reason: String,
    },
    /// A PML parameter is out of range.
    InvalidPml {
        /// Description of the invalid parameter.
        reason: String,
    },
    /// A grid handed to a solver does not match the extents it was built for.
    SizeMismatch {
        /// Cell counts the solver was built for.
        expected: Int3,
        /// Cell counts of the grid actually passed.
        actual: Int3,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { cells } => write!(f, "grid has zero cells: {cells:?}"),
            Self::InvalidTimeStep { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidStep { axis, value } => {
                write!(f, "grid step along {axis} must be finite and positive, got {value}")
            }
            Self::PmlTooThick {
                axis,
                thickness,
                cells,
            } => write!(
                f,
                "pml thickness {thickness} along {axis} does not fit twice into {cells} cells"
            ),
            Self::InvalidAxis { value } => write!(f, "axis index {value} is not in 0..3"),
            Self::InvalidMapping { reason } => write!(f, "invalid mapping: {reason}"),
            Self::InvalidPml { reason } => write!(f, "invalid pml: {reason}"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "grid size {actual:?} does not match solver size {expected:?}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from evaluating a mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingError {
    /// The tight-focusing replica search needs more periods than allowed.
    ///
    /// Raised instead of running an unbounded search when the sliding
    /// window has moved too far for the configured bound.
    ReplicaOverflow {
        /// Number of periodic replicas the search would need.
        required: usize,
        /// Configured upper bound.
        limit: usize,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplicaOverflow { required, limit } => write!(
                f,
                "replica search needs {required} periods, limit is {limit}"
            ),
        }
    }
}

impl Error for MappingError {}

/// Which field triple a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Electric field.
    E,
    /// Magnetic field.
    B,
    /// Current density.
    J,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::E => write!(f, "E"),
            Self::B => write!(f, "B"),
            Self::J => write!(f, "J"),
        }
    }
}

/// Errors from a field solver.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// Configuration was rejected.
    Config(ConfigError),
    /// The frequency transform could not run.
    Transform {
        /// Description of the failure.
        reason: String,
    },
    /// Non-finite value found in the real-space grid after an advance.
    NonFinite {
        /// Field containing the value.
        field: FieldKind,
        /// Flat index of the first offending cell.
        index: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Transform { reason } => write!(f, "transform failed: {reason}"),
            Self::NonFinite { field, index } => {
                write!(f, "non-finite value in field {field} at cell {index}")
            }
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SolverError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
