use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Owns one session's board: the mine layout plus the revealed/flagged state of every cell.
///
/// Flags protect a cell: revealing a flagged cell is a no-op and flood fill stops at flags. Flags
/// cannot be put on revealed cells. Coordinates outside the grid are ignored by every mutating
/// operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    // safe cells only, a revealed mine ends the game instead
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<EngineCell> {
        self.board.get(coords.to_nd_index()).copied()
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.mine_layout.is_mine(coords)
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(EngineCell::is_revealed)
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.cell_at(coords) == Some(EngineCell::Flagged)
    }

    pub fn adjacent_count(&self, coords: Coord2) -> Option<u8> {
        self.mine_layout.adjacent_count(coords)
    }

    /// What the renderer should draw at `coords`, `None` outside the grid.
    pub fn view(&self, coords: Coord2) -> Option<CellView> {
        Some(match self.cell_at(coords)? {
            EngineCell::Hidden => CellView::Hidden,
            EngineCell::Flagged => CellView::Flagged,
            EngineCell::Revealed => match self.mine_layout[coords] {
                CellValue::Mine => CellView::Mine,
                CellValue::Count(count) => CellView::Number(count),
            },
        })
    }

    /// Every cell that is neither revealed nor flagged, in row-major order.
    pub fn hidden_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.board
            .indexed_iter()
            .filter(|(_, cell)| matches!(cell, EngineCell::Hidden))
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use EngineCell::*;
        use MarkOutcome::*;

        let Some(cell) = self.cell_at(coords) else {
            return Ok(NoChange);
        };
        self.check_not_finished()?;

        Ok(match cell {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        if matches!(self.cell_at(coords), Some(EngineCell::Hidden)) {
            self.check_not_finished()?;
            Ok(self.reveal_single_cell(coords))
        } else {
            Ok(RevealOutcome::NoChange)
        }
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        self.board[coords.to_nd_index()] = EngineCell::Revealed;

        if self.mine_layout.is_mine(coords) {
            log::debug!("mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.revealed_count += 1;
        if self.mine_layout.adjacent_count(coords) == Some(0) {
            let cascaded = self.flood_fill(coords);
            log::debug!("flood fill from {:?} revealed {} more cells", coords, cascaded);
        }

        if self.revealed_count == Saturating(self.mine_layout.safe_cell_count()) {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    /// Opens the zero region connected to `origin` plus its numbered border, returning how many
    /// cells were newly revealed. `origin` itself must already be revealed.
    fn flood_fill(&mut self, origin: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(origin).collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            if self.board[visit_coords.to_nd_index()] != EngineCell::Hidden {
                continue;
            }

            // zero cells never border a mine, so everything queued here is safe
            self.board[visit_coords.to_nd_index()] = EngineCell::Revealed;
            self.revealed_count += 1;
            revealed += 1;

            if self.mine_layout.adjacent_count(visit_coords) == Some(0) {
                let next: alloc::vec::Vec<_> = self
                    .hidden_neighbors(visit_coords)
                    .filter(|pos| !visited.contains(pos))
                    .collect();
                to_visit.extend(next);
            }
        }

        revealed
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()] == EngineCell::Hidden)
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        if won {
            self.triggered_mine = None;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
