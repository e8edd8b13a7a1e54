//! Ordered composition of mappings.

use crate::mapped::Mapped;
use crate::mapping::Mapping;
use kfield_core::{MappingError, Vec3};
use smallvec::SmallVec;

/// An ordered list of [`Mapping`]s.
///
/// [`forward`](Self::forward) applies the stages front to back and
/// [`inverse`](Self::inverse) back to front. Validity is the AND of
/// every stage. Composition is not commutative, so push order matters.
///
/// The chain is plain data: conversions take `&self` and may run from
/// many threads at once; `push`/`pop` need `&mut self`.
///
/// # Examples
///
/// ```
/// use kfield_core::{Axis, Vec3};
/// use kfield_mapping::{MappingChain, Periodic, Shift};
///
/// let mut chain = MappingChain::new();
/// chain.push(Shift::new(Vec3::new(10.0, 0.0, 0.0)));
/// chain.push(Periodic::new(Axis::X, 0.0, 4.0).unwrap());
///
/// // Inverse: wrap into [0, 4), then undo the shift.
/// let m = chain.inverse(Vec3::new(5.0, 0.0, 0.0), 0.0);
/// assert!(m.valid);
/// assert!((m.coords.x - (1.0 - 10.0)).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappingChain {
    stages: SmallVec<[Mapping; 4]>,
}

impl MappingChain {
    /// Empty chain (identity, always valid).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage at the end of the chain.
    pub fn push(&mut self, mapping: impl Into<Mapping>) {
        let mapping = mapping.into();
        tracing::debug!(kind = mapping.kind(), depth = self.stages.len() + 1, "mapping pushed");
        self.stages.push(mapping);
    }

    /// Remove and return the last stage.
    pub fn pop(&mut self) -> Option<Mapping> {
        let popped = self.stages.pop();
        if let Some(m) = &popped {
            tracing::debug!(kind = m.kind(), depth = self.stages.len(), "mapping popped");
        }
        popped
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stages in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.stages.iter()
    }

    /// Grid frame → lab frame through every stage, front to back.
    pub fn forward(&self, coords: Vec3, time: f64) -> Result<Mapped, MappingError> {
        let mut acc = Mapped::ok(coords);
        for stage in &self.stages {
            let m = stage.forward(acc.coords, time)?;
            acc = Mapped::new(m.coords, acc.valid && m.valid);
        }
        Ok(acc)
    }

    /// Lab frame → grid frame through every stage, back to front.
    pub fn inverse(&self, coords: Vec3, time: f64) -> Mapped {
        self.stages
            .iter()
            .rev()
            .fold(Mapped::ok(coords), |acc, stage| {
                let m = stage.inverse(acc.coords, time);
                Mapped::new(m.coords, acc.valid && m.valid)
            })
    }

    /// Forward conversion with the validity flag discarded.
    ///
    /// Used when initialising a grid from a lab-frame field function,
    /// where every cell gets a value regardless of domain.
    pub fn convert_coords(&self, coords: Vec3, time: f64) -> Result<Vec3, MappingError> {
        Ok(self.forward(coords, time)?.coords)
    }
}

impl FromIterator<Mapping> for MappingChain {
    fn from_iter<I: IntoIterator<Item = Mapping>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}
