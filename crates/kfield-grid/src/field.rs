//! Dense scalar field storage.

use kfield_core::Int3;

/// A dense 3D array of `f64`, stored cell-major (`[i][j][k]`, k fastest).
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    size: Int3,
    data: Vec<f64>,
}

impl ScalarField {
    /// Zero-filled field with extents `size`.
    pub fn zeros(size: Int3) -> Self {
        Self {
            size,
            data: vec![0.0; size[0] * size[1] * size[2]],
        }
    }

    /// Array extents.
    pub fn size(&self) -> Int3 {
        self.size
    }

    /// Flat index of `(i, j, k)`.
    #[inline]
    pub fn index(&self, idx: Int3) -> usize {
        (idx[0] * self.size[1] + idx[1]) * self.size[2] + idx[2]
    }

    /// Value at `(i, j, k)`.
    #[inline]
    pub fn get(&self, idx: Int3) -> f64 {
        self.data[self.index(idx)]
    }

    /// Overwrite the value at `(i, j, k)`.
    #[inline]
    pub fn set(&mut self, idx: Int3, value: f64) {
        let i = self.index(idx);
        self.data[i] = value;
    }

    /// Set every value to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Raw cell-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw cell-major storage.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
