//! Half-open integer boxes.

use kfield_core::Int3;

/// Axis-aligned half-open box `[begin, end)` of cell indices.
///
/// Used for the frequency-space update regions of the solvers and for
/// the real-space interior left free by a PML.
///
/// # Examples
///
/// ```
/// use kfield_grid::Area;
///
/// let full = Area::full([4, 4, 3]);
/// let inner = Area::new([1, 1, 0], [3, 3, 3]);
/// assert!(inner.is_within(&full));
/// assert!(inner.contains([2, 1, 2]));
/// assert!(!inner.contains([3, 1, 2]));
/// assert_eq!(inner.cell_count(), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Area {
    /// Inclusive lower corner.
    pub begin: Int3,
    /// Exclusive upper corner.
    pub end: Int3,
}

impl Area {
    /// Box `[begin, end)`.
    pub fn new(begin: Int3, end: Int3) -> Self {
        Self { begin, end }
    }

    /// Box covering every index of an array with extents `size`.
    pub fn full(size: Int3) -> Self {
        Self {
            begin: [0; 3],
            end: size,
        }
    }

    /// Whether `idx` lies inside the box.
    pub fn contains(&self, idx: Int3) -> bool {
        (0..3).all(|a| idx[a] >= self.begin[a] && idx[a] < self.end[a])
    }

    /// Whether this box is a sub-box of `outer`.
    pub fn is_within(&self, outer: &Area) -> bool {
        (0..3).all(|a| self.begin[a] >= outer.begin[a] && self.end[a] <= outer.end[a])
    }

    /// Number of cells in the box (zero if any extent is empty).
    pub fn cell_count(&self) -> usize {
        (0..3)
            .map(|a| self.end[a].saturating_sub(self.begin[a]))
            .product()
    }

    /// Whether the box holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}
