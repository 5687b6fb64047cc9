use std::str::FromStr;

use gridsweep_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input, already mapped to board coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Primary activate, reveals a cell.
    Reveal(Coord2),
    /// Secondary toggle, flips a flag.
    Flag(Coord2),
    Path { from: Coord2, to: Coord2 },
    Eval { depth: u32 },
    Hint { depth: u32 },
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseCommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?}, type `help` for a list")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected} arguments, got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{0:?} is not a valid number")]
    InvalidNumber(String),
}

pub(crate) const HELP: &str = "\
commands:
  r ROW COL            reveal a cell
  f ROW COL            toggle a flag
  path R1 C1 R2 C2     shortest path between two cells
  eval DEPTH           minimax score of the current board
  hint DEPTH           minimax pick for the next reveal
  show                 redraw the board
  help                 this text
  q                    quit";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;
        let rest: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let [row, col] = numbers::<Coord, 2>("reveal", &rest)?;
                Self::Reveal((row, col))
            }
            "f" | "flag" => {
                let [row, col] = numbers::<Coord, 2>("flag", &rest)?;
                Self::Flag((row, col))
            }
            "path" => {
                let [r1, c1, r2, c2] = numbers::<Coord, 4>("path", &rest)?;
                Self::Path {
                    from: (r1, c1),
                    to: (r2, c2),
                }
            }
            "eval" => {
                let [depth] = numbers::<u32, 1>("eval", &rest)?;
                Self::Eval { depth }
            }
            "hint" => {
                let [depth] = numbers::<u32, 1>("hint", &rest)?;
                Self::Hint { depth }
            }
            "show" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(ParseCommandError::UnknownCommand(name.to_string())),
        };
        Ok(command)
    }
}

fn numbers<T: FromStr + Copy + Default, const N: usize>(
    command: &'static str,
    words: &[&str],
) -> Result<[T; N], ParseCommandError> {
    if words.len() != N {
        return Err(ParseCommandError::WrongArity {
            command,
            expected: N,
            got: words.len(),
        });
    }

    let mut values = [T::default(); N];
    for (value, word) in values.iter_mut().zip(words) {
        *value = word
            .parse()
            .map_err(|_| ParseCommandError::InvalidNumber(word.to_string()))?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_board_events() {
        assert_eq!("r 1 2".parse(), Ok(Command::Reveal((1, 2))));
        assert_eq!("  F 0 4 ".parse(), Ok(Command::Flag((0, 4))));
        assert_eq!(
            "path 0 0 3 4".parse(),
            Ok(Command::Path {
                from: (0, 0),
                to: (3, 4),
            })
        );
        assert_eq!("eval 2".parse(), Ok(Command::Eval { depth: 2 }));
        assert_eq!("hint 1".parse(), Ok(Command::Hint { depth: 1 }));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(ParseCommandError::WrongArity {
                command: "reveal",
                expected: 2,
                got: 1,
            })
        );
        assert_eq!(
            "r 1 x".parse::<Command>(),
            Err(ParseCommandError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::UnknownCommand("dig".to_string()))
        );
    }

    #[test]
    fn coordinates_beyond_the_axis_type_are_rejected() {
        assert_eq!(
            "r 300 1".parse::<Command>(),
            Err(ParseCommandError::InvalidNumber("300".to_string()))
        );
        assert!("r -1 0".parse::<Command>().is_err());
    }
}
