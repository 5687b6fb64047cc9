use std::fmt::Write;

use gridsweep_core::{CellView, Coord, Coord2, EngineState, PlayEngine};

/// Character drawn for one cell. Once the game is lost every mine is uncovered, the one that was
/// triggered keeps `*`.
fn cell_char(engine: &PlayEngine, coords: Coord2) -> char {
    let view = engine.view(coords).unwrap_or(CellView::Hidden);
    match view {
        CellView::Mine => '*',
        CellView::Flagged => 'F',
        CellView::Number(0) => '.',
        CellView::Number(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Hidden if engine.state() == EngineState::Lost && engine.is_mine(coords) => 'x',
        CellView::Hidden => '#',
    }
}

pub(crate) fn render_board(engine: &PlayEngine) -> String {
    render_board_with_path(engine, &[])
}

/// Draws the board with `path` cells overlaid as `o`, the board state underneath is not shown
/// for those cells.
pub(crate) fn render_board_with_path(engine: &PlayEngine, path: &[Coord2]) -> String {
    let (rows, cols) = engine.size();
    let width = digits(rows.max(cols).saturating_sub(1));
    let mut out = String::new();

    let _ = write!(out, "{:width$} ", "");
    for col in 0..cols {
        let _ = write!(out, " {:>width$}", col);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>width$} ", row);
        for col in 0..cols {
            let symbol = if path.contains(&(row, col)) {
                'o'
            } else {
                cell_char(engine, (row, col))
            };
            let _ = write!(out, " {:>width$}", symbol);
        }
        out.push('\n');
    }

    out
}

pub(crate) fn render_status(engine: &PlayEngine) -> String {
    let state = match engine.state() {
        EngineState::Ready => "ready",
        EngineState::Active => "playing",
        EngineState::Won => "won",
        EngineState::Lost => "lost",
    };
    format!(
        "mines left: {}  revealed: {}/{}  state: {}",
        engine.mines_left(),
        engine.revealed_count(),
        engine.mine_layout().safe_cell_count(),
        state
    )
}

fn digits(value: Coord) -> usize {
    value.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsweep_core::MineLayout;

    fn engine(size: Coord2, mines: &[Coord2]) -> PlayEngine {
        PlayEngine::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn hidden_board_is_all_hashes() {
        let engine = engine((2, 3), &[(0, 0)]);

        assert_eq!(render_board(&engine), "   0 1 2\n0  # # #\n1  # # #\n");
    }

    #[test]
    fn revealed_numbers_flags_and_zeroes() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        engine.toggle_flag((0, 0)).unwrap();
        engine.reveal((2, 2)).unwrap();

        assert_eq!(
            render_board(&engine),
            "   0 1 2\n0  F 1 .\n1  1 1 .\n2  . . .\n"
        );
    }

    #[test]
    fn lost_board_uncovers_remaining_mines() {
        let mut engine = engine((1, 3), &[(0, 0), (0, 2)]);
        engine.reveal((0, 2)).unwrap();

        assert_eq!(render_board(&engine), "   0 1 2\n0  x # *\n");
        assert!(render_status(&engine).ends_with("state: lost"));
    }

    #[test]
    fn path_overlay_replaces_cells() {
        let engine = engine((2, 2), &[]);

        let out = render_board_with_path(&engine, &[(0, 0), (1, 1)]);

        assert_eq!(out, "   0 1\n0  o #\n1  # o\n");
    }

    #[test]
    fn wide_boards_pad_columns() {
        let engine = engine((1, 11), &[]);

        let out = render_board(&engine);

        assert!(out.starts_with("     0  1  2"));
        assert!(out.ends_with(" 0   #  #  #  #  #  #  #  #  #  #  #\n"));
    }
}
