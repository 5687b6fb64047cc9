#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use types::grid_size;

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use observation::*;
pub use search::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod observation;
mod search;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size as `(rows, cols)`.
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config from raw startup parameters, failing fast on zero-sized boards, boards that
    /// do not fit [`Coord`] and mine counts above `rows * cols`.
    pub fn new((rows, cols): (usize, usize), mines: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard { rows, cols }.into());
        }

        let max = usize::from(Coord::MAX);
        let (Ok(rows_c), Ok(cols_c)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(ConfigError::BoardTooLarge { rows, cols, max }.into());
        };

        let available = mult(rows_c, cols_c);
        let too_many = ConfigError::TooManyMines {
            requested: mines,
            available,
        };
        let mines = CellCount::try_from(mines).map_err(|_| too_many)?;
        if mines > available {
            return Err(too_many.into());
        }

        Ok(Self::new_unchecked((rows_c, cols_c), mines))
    }

    /// Re-checks a config that did not go through [`GameConfig::new`], e.g. one read from a file.
    pub fn validate(&self) -> Result<()> {
        Self::new(
            (self.size.0.into(), self.size.1.into()),
            self.mines.into(),
        )
        .map(|_| ())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Mine positions together with the adjacency counts derived from them.
///
/// Counts are computed once on construction and never change afterwards. Deserialized layouts are
/// rebuilt from their mine positions, stored counts are not trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredMineLayout")]
pub struct MineLayout {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows > max || cols > max {
            return Err(ConfigError::BoardTooLarge { rows, cols, max }.into());
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Ok(Self {
            cells: compute_adjacency(mine_mask),
            mine_count: mine_count.try_into().unwrap_or(CellCount::MAX),
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    /// Builds a layout from row-major cell indices as produced by [`place_mines`].
    pub fn from_mine_indices(size: Coord2, mine_indices: &BTreeSet<CellCount>) -> Result<Self> {
        let total = mult(size.0, size.1);
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &index in mine_indices {
            if index >= total {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[from_linear_index(index, size).to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Cell content, `None` outside the grid.
    pub fn value(&self, coords: Coord2) -> Option<CellValue> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.value(coords).is_some_and(CellValue::is_mine)
    }

    /// Adjacent mine count of a safe cell, `None` for mines and coordinates outside the grid.
    pub fn adjacent_count(&self, coords: Coord2) -> Option<u8> {
        match self.value(coords)? {
            CellValue::Mine => None,
            CellValue::Count(count) => Some(count),
        }
    }

    /// All mine coordinates in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, value)| value.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

// `mine_count` is ignored on input and recomputed from `cells`.
#[derive(Deserialize)]
struct StoredMineLayout {
    cells: Array2<CellValue>,
}

impl TryFrom<StoredMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(stored: StoredMineLayout) -> Result<Self> {
        Self::from_mine_mask(&stored.cells.map(|value| value.is_mine()))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Counts, for every non-mine cell, the mines in its clipped Moore neighborhood.
fn compute_adjacency(mine_mask: &Array2<bool>) -> Array2<CellValue> {
    Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
        let coords = (row as Coord, col as Coord);
        if mine_mask[coords.to_nd_index()] {
            CellValue::Mine
        } else {
            let count = mine_mask
                .iter_neighbor_cells(coords)
                .filter(|&is_mine| is_mine)
                .count();
            CellValue::Count(count as u8)
        }
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
