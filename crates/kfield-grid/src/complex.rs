//! Frequency-space working grid.

use kfield_core::{CVec3, Complex64, FieldKind, Int3};

/// Extents of the half spectrum produced by a real-to-complex transform
/// of a real array with extents `real`: `(nx, ny, nz/2 + 1)`.
pub fn complex_size(real: Int3) -> Int3 {
    [real[0], real[1], real[2] / 2 + 1]
}

/// Frequency-space E, B and J, one [`CVec3`] per field per mode.
///
/// Stored cell-major (`[i][j][k]`, k fastest) so that a per-mode update
/// pass can walk E, B and J in lockstep with a single flat index.
#[derive(Clone, Debug)]
pub struct ComplexGrid {
    size: Int3,
    e: Vec<CVec3>,
    b: Vec<CVec3>,
    j: Vec<CVec3>,
}

fn zeros(n: usize) -> Vec<CVec3> {
    vec![CVec3::repeat(Complex64::new(0.0, 0.0)); n]
}

impl ComplexGrid {
    /// Zero-filled complex grid sized for a real grid with `real_cells`.
    pub fn for_real_size(real_cells: Int3) -> Self {
        let size = complex_size(real_cells);
        let n = size.iter().product();
        Self {
            size,
            e: zeros(n),
            b: zeros(n),
            j: zeros(n),
        }
    }

    /// Complex extents.
    pub fn size(&self) -> Int3 {
        self.size
    }

    /// Number of modes.
    pub fn len(&self) -> usize {
        self.e.len()
    }

    /// Whether the grid holds no modes.
    pub fn is_empty(&self) -> bool {
        self.e.is_empty()
    }

    /// Flat index of mode `(i, j, k)`.
    #[inline]
    pub fn index(&self, idx: Int3) -> usize {
        (idx[0] * self.size[1] + idx[1]) * self.size[2] + idx[2]
    }

    /// Mode indices of a flat index.
    #[inline]
    pub fn unflatten(&self, flat: usize) -> Int3 {
        let k = flat % self.size[2];
        let rest = flat / self.size[2];
        [rest / self.size[1], rest % self.size[1], k]
    }

    /// All modes of one field.
    pub fn field(&self, kind: FieldKind) -> &[CVec3] {
        match kind {
            FieldKind::E => &self.e,
            FieldKind::B => &self.b,
            FieldKind::J => &self.j,
        }
    }

    /// Mutable access to all modes of one field.
    pub fn field_mut(&mut self, kind: FieldKind) -> &mut [CVec3] {
        match kind {
            FieldKind::E => &mut self.e,
            FieldKind::B => &mut self.b,
            FieldKind::J => &mut self.j,
        }
    }

    /// Split borrow for update passes: `(&mut E, &mut B, &J)`.
    pub fn split_mut(&mut self) -> (&mut [CVec3], &mut [CVec3], &[CVec3]) {
        (&mut self.e, &mut self.b, &self.j)
    }

    /// Mode value of a field at `(i, j, k)`.
    pub fn get(&self, kind: FieldKind, idx: Int3) -> CVec3 {
        self.field(kind)[self.index(idx)]
    }

    /// Overwrite a mode value.
    pub fn set(&mut self, kind: FieldKind, idx: Int3, v: CVec3) {
        let i = self.index(idx);
        self.field_mut(kind)[i] = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_spectrum_size() {
        assert_eq!(complex_size([8, 6, 4]), [8, 6, 3]);
        assert_eq!(complex_size([8, 6, 5]), [8, 6, 3]);
        assert_eq!(complex_size([1, 1, 1]), [1, 1, 1]);
    }

    #[test]
    fn unflatten_inverts_index() {
        let g = ComplexGrid::for_real_size([3, 4, 6]);
        for flat in 0..g.len() {
            assert_eq!(g.index(g.unflatten(flat)), flat);
        }
    }

    #[test]
    fn split_mut_exposes_all_three() {
        let mut g = ComplexGrid::for_real_size([2, 2, 2]);
        let one = CVec3::repeat(Complex64::new(1.0, 0.0));
        g.set(FieldKind::J, [1, 1, 1], one);
        let (e, b, j) = g.split_mut();
        e[0] = one;
        b[0] = one;
        assert_eq!(j[g_index(1, 1, 1)], one);
        assert_eq!(g.get(FieldKind::E, [0, 0, 0]), one);
    }

    fn g_index(i: usize, j: usize, k: usize) -> usize {
        (i * 2 + j) * 2 + k
    }
}
