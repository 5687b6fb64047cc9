use std::io::{BufRead, Write};

use anyhow::Result;
use gridsweep_core::{Coord2, Minimax, PathFinder, PlayEngine, RevealOutcome, in_bounds};

use crate::input::{Command, HELP, ParseCommandError};
use crate::render::{render_board, render_board_with_path, render_status};

/// Upper bound on minimax nodes per `eval`/`hint`, the branching factor is the number of hidden
/// cells so unbounded searches stall on anything but tiny boards.
const SEARCH_NODE_LIMIT: u64 = 250_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    engine: PlayEngine,
    move_count: u32,
}

impl GameSession {
    pub fn new(engine: PlayEngine) -> Self {
        Self {
            engine,
            move_count: 0,
        }
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Reveal(coords) => self.reveal(coords, out),
            Command::Flag(coords) => {
                if !self.check_bounds(coords, out)? {
                    return Ok(Flow::Continue);
                }
                if self.engine.toggle_flag(coords)?.has_update() {
                    self.move_count += 1;
                }
                self.show(out)?;
                Ok(Flow::Continue)
            }
            Command::Path { from, to } => {
                let path = PathFinder::new(self.engine.size()).find_path(from, to);
                if path.is_empty() {
                    writeln!(out, "no path from {:?} to {:?}", from, to)?;
                } else {
                    write!(out, "{}", render_board_with_path(&self.engine, &path))?;
                    writeln!(out, "{} steps: {}", path.len() - 1, format_path(&path))?;
                }
                Ok(Flow::Continue)
            }
            Command::Eval { depth } => {
                let mut search = Minimax::new().with_node_limit(SEARCH_NODE_LIMIT);
                let score = search.search(&self.engine, depth, true);
                writeln!(
                    out,
                    "minimax score at depth {}: {} ({} nodes)",
                    depth,
                    score,
                    search.nodes()
                )?;
                Ok(Flow::Continue)
            }
            Command::Hint { depth } => {
                let mut search = Minimax::new().with_node_limit(SEARCH_NODE_LIMIT);
                match search.best_move(&self.engine, depth) {
                    Some(best) => writeln!(
                        out,
                        "minimax picks {:?} with score {} ({} nodes)",
                        best.coords,
                        best.score,
                        search.nodes()
                    )?,
                    None => writeln!(out, "nothing left to pick")?,
                }
                Ok(Flow::Continue)
            }
            Command::Show => {
                self.show(out)?;
                Ok(Flow::Continue)
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(Flow::Continue)
            }
            Command::Quit => Ok(Flow::Finished),
        }
    }

    fn reveal(&mut self, coords: Coord2, out: &mut impl Write) -> Result<Flow> {
        if !self.check_bounds(coords, out)? {
            return Ok(Flow::Continue);
        }

        let outcome = self.engine.reveal(coords)?;
        if outcome.has_update() {
            self.move_count += 1;
        }
        log::debug!("reveal {:?}: {:?}", coords, outcome);

        self.show(out)?;
        match outcome {
            RevealOutcome::HitMine => {
                writeln!(out, "Game Over!")?;
                Ok(Flow::Finished)
            }
            RevealOutcome::Won => {
                writeln!(out, "Cleared in {} moves!", self.move_count)?;
                Ok(Flow::Finished)
            }
            RevealOutcome::Revealed | RevealOutcome::NoChange => Ok(Flow::Continue),
        }
    }

    /// Reports coordinates outside the board, returns whether `coords` is usable.
    fn check_bounds(&self, coords: Coord2, out: &mut impl Write) -> Result<bool> {
        let inside = in_bounds(coords, self.engine.size());
        if !inside {
            writeln!(out, "{:?} is outside the board, ignored", coords)?;
        }
        Ok(inside)
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", render_board(&self.engine))?;
        writeln!(out, "{}", render_status(&self.engine))?;
        Ok(())
    }
}

fn format_path(path: &[Coord2]) -> String {
    path.iter()
        .map(|coords| format!("{:?}", coords))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Drains `input` line by line until the game ends, the player quits or input closes.
pub(crate) fn run(
    session: &mut GameSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    session.show(out)?;
    writeln!(out, "type `help` for commands")?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            log::debug!("input closed");
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::trace!("command {:?}", command);

        if session.handle(command, out)? == Flow::Finished {
            break;
        }
    }

    out.flush()?;
    Ok(())
}
