use ndarray::Array2;

/// Single coordinate axis used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a grid of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Cell at row-major position `index` in a grid of `size`.
pub const fn from_linear_index(index: CellCount, size: Coord2) -> Coord2 {
    let cols = size.1 as CellCount;
    ((index / cols) as Coord, (index % cols) as Coord)
}

/// Chebyshev distance, the exact move count between two cells when diagonal
/// steps cost the same as orthogonal ones.
pub fn chebyshev((r1, c1): Coord2, (r2, c2): Coord2) -> u32 {
    u32::from(r1.abs_diff(r2)).max(u32::from(c1.abs_diff(c2)))
}

/// Manhattan distance, the exact move count for 4-connected movement.
pub fn manhattan((r1, c1): Coord2, (r2, c2): Coord2) -> u32 {
    u32::from(r1.abs_diff(r2)) + u32::from(c1.abs_diff(c2))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::moore(index, grid_size(self))
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)>;

    fn iter_neighbor_cells(&self, index: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbor_cells_with_index(index)
            .map(|(_, cell)| cell)
    }
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)> {
        self.iter_neighbors(index)
            .map(|index| (index, self[index.to_nd_index()]))
    }
}

/// Size of a grid as `(rows, cols)`, grids are never built larger than [`Coord::MAX`].
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds cells around `center`, in row-major order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    /// The up to 8 cells surrounding `center`, diagonals included.
    pub fn moore(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: &MOORE,
            index: 0,
        }
    }

    /// The up to 4 cells sharing an edge with `center`.
    pub fn orthogonal(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: &ORTHOGONAL,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.deltas.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn moore_neighbors_are_clipped_at_corners() {
        let corner: Vec<_> = NeighborIter::moore((0, 0), (3, 3)).collect();
        assert_eq!(corner, [(0, 1), (1, 0), (1, 1)]);

        let center = NeighborIter::moore((1, 1), (3, 3)).count();
        assert_eq!(center, 8);
    }

    #[test]
    fn orthogonal_neighbors_skip_diagonals() {
        let edge: Vec<_> = NeighborIter::orthogonal((0, 1), (3, 3)).collect();
        assert_eq!(edge, [(0, 0), (0, 2), (1, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::moore((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn linear_index_maps_in_row_major_order() {
        let size = (3, 4);
        assert_eq!(from_linear_index(0, size), (0, 0));
        assert_eq!(from_linear_index(3, size), (0, 3));
        assert_eq!(from_linear_index(9, size), (2, 1));
    }

    #[test]
    fn distances() {
        assert_eq!(chebyshev((0, 0), (3, 1)), 3);
        assert_eq!(manhattan((0, 0), (3, 1)), 4);
        assert_eq!(chebyshev((2, 2), (2, 2)), 0);
    }
}
