use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible snapshot of a whole board, the read-back side of the render boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub state: EngineState,
    pub cells: Array2<CellView>,
}

impl Observation {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let size = engine.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            engine
                .view((row as Coord, col as Coord))
                .unwrap_or(CellView::Hidden)
        });

        Self {
            size,
            mine_count: engine.total_mines(),
            state: engine.state(),
            cells,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }

        if self.mine_count > mult(self.size.0, self.size.1) {
            return Err(ConfigError::TooManyMines {
                requested: self.mine_count.into(),
                available: mult(self.size.0, self.size.1),
            }
            .into());
        }

        Ok(())
    }

    pub fn view(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_maps_revealed_and_flagged_cells() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut engine = PlayEngine::new(layout);

        engine.reveal((1, 1)).unwrap();
        engine.toggle_flag((0, 0)).unwrap();

        let obs = Observation::from_engine(&engine);

        assert_eq!(obs.mine_count, 1);
        assert_eq!(obs.state, EngineState::Active);
        assert_eq!(obs.view((1, 1)), Some(CellView::Number(1)));
        assert_eq!(obs.view((0, 0)), Some(CellView::Flagged));
        assert_eq!(obs.view((0, 1)), Some(CellView::Hidden));
        assert_eq!(obs.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let obs = Observation {
            size: (2, 2),
            mine_count: 1,
            state: EngineState::Ready,
            cells: Array2::from_elem([1, 2], CellView::Hidden),
        };

        assert_eq!(obs.validate(), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn serializes_to_json_and_back() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(1, 2)]).unwrap();
        let mut engine = PlayEngine::new(layout);
        engine.reveal((1, 2)).unwrap();

        let obs = Observation::from_engine(&engine);
        let json = serde_json::to_string(&obs).unwrap();
        let parsed: Observation = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, obs);
        assert_eq!(parsed.view((1, 2)), Some(CellView::Mine));
        assert_eq!(parsed.state, EngineState::Lost);
    }
}
