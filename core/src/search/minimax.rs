use alloc::vec::Vec;

use crate::*;

/// Static score of a board: `+1` per revealed cell (a revealed mine included) and `-1` per mine
/// that is still unrevealed, flagged or not.
pub fn evaluate(state: &PlayEngine) -> i32 {
    let (rows, cols) = state.size();
    let mut score = 0;
    for row in 0..rows {
        for col in 0..cols {
            let coords = (row, col);
            if state.is_revealed(coords) {
                score += 1;
            } else if state.is_mine(coords) {
                score -= 1;
            }
        }
    }
    score
}

/// A snapshot ends the search once its game is won or lost.
pub fn is_terminal(state: &PlayEngine) -> bool {
    state.is_finished()
}

/// Every cell a move can still reveal in `state`. Flagged cells are skipped since revealing them
/// is a no-op.
pub fn candidate_moves(state: &PlayEngine) -> Vec<Coord2> {
    state.hidden_cells().collect()
}

/// The snapshot that results from revealing `coords` in a copy of `state`.
pub fn apply_move(state: &PlayEngine, coords: Coord2) -> Result<PlayEngine> {
    let mut next = state.clone();
    next.reveal(coords)?;
    Ok(next)
}

/// Depth-bounded minimax score of `state` with default limits.
pub fn minimax(state: &PlayEngine, depth: u32, maximizing: bool) -> i32 {
    Minimax::new().search(state, depth, maximizing)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub coords: Coord2,
    pub score: i32,
}

/// Two-player min/max search where both sides reveal cells on independent board snapshots.
///
/// The board handed in is never mutated. With a node limit set, nodes visited after the budget
/// runs out are scored statically.
#[derive(Clone, Debug, Default)]
pub struct Minimax {
    node_limit: Option<u64>,
    nodes: u64,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn search(&mut self, state: &PlayEngine, depth: u32, maximizing: bool) -> i32 {
        self.nodes += 1;
        if depth == 0 || is_terminal(state) || self.budget_exhausted() {
            return evaluate(state);
        }

        let scores = candidate_moves(state)
            .into_iter()
            .filter_map(|coords| apply_move(state, coords).ok())
            .map(|next| self.search(&next, depth - 1, !maximizing))
            .collect::<Vec<_>>();

        let best = if maximizing {
            scores.into_iter().max()
        } else {
            scores.into_iter().min()
        };
        // no moves left, score the position itself
        best.unwrap_or_else(|| evaluate(state))
    }

    /// The maximizing side's best reveal in `state`, looking `depth` plies ahead. Ties keep the
    /// first move in row-major order.
    pub fn best_move(&mut self, state: &PlayEngine, depth: u32) -> Option<ScoredMove> {
        if depth == 0 || is_terminal(state) {
            return None;
        }

        let mut best: Option<ScoredMove> = None;
        for coords in candidate_moves(state) {
            let Ok(next) = apply_move(state, coords) else {
                continue;
            };
            let score = self.search(&next, depth - 1, false);
            if best.is_none_or(|current| score > current.score) {
                best = Some(ScoredMove { coords, score });
            }
        }

        log::debug!(
            "best move {:?} after {} nodes at depth {}",
            best,
            self.nodes,
            depth
        );
        best
    }

    fn budget_exhausted(&self) -> bool {
        self.node_limit.is_some_and(|limit| self.nodes >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> PlayEngine {
        PlayEngine::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn evaluate_counts_revealed_cells_and_hidden_mines() {
        let mut state = engine((3, 3), &[(0, 0), (2, 2)]);
        assert_eq!(evaluate(&state), -2);

        state.reveal((1, 1)).unwrap();
        assert_eq!(evaluate(&state), -1);

        // flags do not hide a mine from the score
        state.toggle_flag((0, 0)).unwrap();
        assert_eq!(evaluate(&state), -1);
    }

    #[test]
    fn revealed_mine_scores_like_any_revealed_cell() {
        let mut state = engine((1, 2), &[(0, 0)]);

        state.reveal((0, 0)).unwrap();

        assert!(is_terminal(&state));
        assert_eq!(evaluate(&state), 1);
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let state = engine((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(minimax(&state, 0, true), evaluate(&state));
        assert_eq!(minimax(&state, 0, false), evaluate(&state));
    }

    #[test]
    fn terminal_snapshot_is_not_expanded() {
        let mut state = engine((2, 2), &[(0, 0)]);
        state.reveal((0, 0)).unwrap();

        let mut search = Minimax::new();
        assert_eq!(search.search(&state, 3, true), evaluate(&state));
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn search_explores_snapshots_without_touching_the_live_board() {
        let state = engine((1, 3), &[(0, 0)]);
        let before = state.clone();

        // maximizer: revealing the mine or opening the zero region both reach +1,
        // the minimizer prefers the lone number at 0
        assert_eq!(minimax(&state, 1, true), 1);
        assert_eq!(minimax(&state, 1, false), 0);
        assert_eq!(minimax(&state, 2, true), 1);

        assert_eq!(state, before);
    }

    #[test]
    fn best_move_prefers_the_cascading_reveal() {
        let state = engine((1, 4), &[(0, 0)]);

        let best = Minimax::new().best_move(&state, 1);

        assert_eq!(
            best,
            Some(ScoredMove {
                coords: (0, 2),
                score: 2,
            })
        );
    }

    #[test]
    fn flagged_and_revealed_cells_are_not_candidates() {
        let mut state = engine((2, 2), &[(0, 0)]);
        state.toggle_flag((0, 0)).unwrap();
        state.reveal((1, 1)).unwrap();

        assert_eq!(candidate_moves(&state), [(0, 1), (1, 0)]);
    }

    #[test]
    fn node_limit_falls_back_to_static_evaluation() {
        let state = engine((3, 3), &[(0, 0), (2, 2)]);

        let mut search = Minimax::new().with_node_limit(1);

        assert_eq!(search.search(&state, 4, true), evaluate(&state));
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn finished_game_has_no_best_move() {
        let mut state = engine((1, 2), &[(0, 0)]);
        state.reveal((0, 1)).unwrap();

        assert_eq!(state.state(), EngineState::Won);
        assert_eq!(Minimax::new().best_move(&state, 2), None);
    }

    #[test]
    fn fully_flagged_board_scores_the_position() {
        let mut state = engine((1, 2), &[(0, 0)]);
        state.toggle_flag((0, 0)).unwrap();
        state.toggle_flag((0, 1)).unwrap();

        assert!(candidate_moves(&state).is_empty());
        assert_eq!(minimax(&state, 3, true), evaluate(&state));
        assert_eq!(minimax(&state, 3, false), -1);
    }
}
