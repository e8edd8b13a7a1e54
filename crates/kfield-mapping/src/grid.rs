//! Field lookup and initialisation through a mapping chain.

use crate::chain::MappingChain;
use kfield_core::{FieldKind, Int3, MappingError, Vec3};
use kfield_grid::SpectralGrid;

/// A grid viewed through a mapping chain.
///
/// Lookups take a lab-frame coordinate, run it through the chain's
/// inverse at the grid's current global time, and sample the grid at
/// the result. A coordinate outside the chain's domain reads as zero.
///
/// # Examples
///
/// ```
/// use kfield_core::{FieldKind, Vec3};
/// use kfield_grid::{GridConfig, SpectralGrid};
/// use kfield_mapping::{MappedGrid, MappingChain, Segment, Shift};
///
/// let mut grid = SpectralGrid::new(&GridConfig { cells: [4, 4, 4], ..Default::default() }).unwrap();
/// grid.set_value(FieldKind::E, [1, 0, 0], Vec3::new(0.0, 2.0, 0.0));
///
/// let mut chain = MappingChain::new();
/// chain.push(Segment::new(Vec3::zeros(), Vec3::new(4.0, 4.0, 4.0)).unwrap());
/// chain.push(Shift::new(Vec3::new(10.0, 0.0, 0.0)));
///
/// let view = MappedGrid::new(&grid, &chain);
/// assert_eq!(view.e(Vec3::new(11.0, 0.0, 0.0)).y, 2.0);
/// assert_eq!(view.e(Vec3::new(-5.0, 0.0, 0.0)), Vec3::zeros());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MappedGrid<'g> {
    grid: &'g SpectralGrid,
    chain: &'g MappingChain,
}

impl<'g> MappedGrid<'g> {
    /// View `grid` through `chain`.
    pub fn new(grid: &'g SpectralGrid, chain: &'g MappingChain) -> Self {
        Self { grid, chain }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'g SpectralGrid {
        self.grid
    }

    /// The mapping chain.
    pub fn chain(&self) -> &'g MappingChain {
        self.chain
    }

    /// Electric field at a lab-frame coordinate, zero outside the domain.
    pub fn e(&self, coords: Vec3) -> Vec3 {
        self.sample(FieldKind::E, coords)
    }

    /// Magnetic field at a lab-frame coordinate, zero outside the domain.
    pub fn b(&self, coords: Vec3) -> Vec3 {
        self.sample(FieldKind::B, coords)
    }

    /// Current density at a lab-frame coordinate, zero outside the domain.
    pub fn j(&self, coords: Vec3) -> Vec3 {
        self.sample(FieldKind::J, coords)
    }

    fn sample(&self, kind: FieldKind, coords: Vec3) -> Vec3 {
        match self.chain.inverse(coords, self.grid.global_time()).into_option() {
            Some(local) => self.grid.interpolate(kind, &local),
            None => Vec3::zeros(),
        }
    }
}

/// Fill E and B of `grid` from a lab-frame field function.
///
/// Each cell coordinate is converted with
/// [`MappingChain::convert_coords`] at the grid's global time and `f`
/// is evaluated there; `f` returns `(E, B)`. J is left untouched.
///
/// Every coordinate is converted before the first write, so on error the
/// grid is left exactly as it was.
pub fn set_em_field<F>(
    grid: &mut SpectralGrid,
    chain: &MappingChain,
    f: F,
) -> Result<(), MappingError>
where
    F: Fn(Vec3) -> (Vec3, Vec3),
{
    let time = grid.global_time();
    let cells = grid.num_cells();

    let lab = cell_indices(cells)
        .map(|idx| chain.convert_coords(grid.cell_coords(idx), time))
        .collect::<Result<Vec<Vec3>, _>>()?;

    for (idx, coords) in cell_indices(cells).zip(lab) {
        let (e, b) = f(coords);
        grid.set_value(FieldKind::E, idx, e);
        grid.set_value(FieldKind::B, idx, b);
    }
    Ok(())
}

/// Cell indices in cell-major order.
fn cell_indices([nx, ny, nz]: Int3) -> impl Iterator<Item = Int3> {
    (0..nx).flat_map(move |i| (0..ny).flat_map(move |j| (0..nz).map(move |k| [i, j, k])))
}
