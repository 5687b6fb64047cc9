use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gridsweep_core::GameConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Clear a minefield from the terminal", long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows, prompted for when not given anywhere else
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Number of columns, prompted for when not given anywhere else
    #[arg(short, long)]
    pub cols: Option<usize>,

    /// Number of mines, prompted for when not given anywhere else
    #[arg(short, long)]
    pub mines: Option<usize>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// TOML file with `rows`, `cols`, `mines` and `seed` keys
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Named difficulty used for values missing from flags and config file
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Print the final board as JSON when the session ends
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}
