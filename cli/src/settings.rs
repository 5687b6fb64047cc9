use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use gridsweep_core::GameConfig;
use serde::{Deserialize, Serialize};

use crate::args::Args;

/// Startup parameters as they may appear in a `--config` file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub mines: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub config: GameConfig,
    pub seed: u64,
}

/// Merges flags, config file and preset, then prompts on `input` for whatever is still missing.
pub(crate) fn resolve(
    args: &Args,
    file: Option<&ConfigFile>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Settings> {
    let file = file.cloned().unwrap_or_default();
    let preset = args.preset.map(|preset| preset.config());

    let rows = args
        .rows
        .or(file.rows)
        .or(preset.map(|config| config.rows().into()));
    let cols = args
        .cols
        .or(file.cols)
        .or(preset.map(|config| config.cols().into()));
    let mines = args
        .mines
        .or(file.mines)
        .or(preset.map(|config| config.mines.into()));

    let rows = value_or_prompt(rows, "ROWS", input, output)?;
    let cols = value_or_prompt(cols, "COLUMNS", input, output)?;
    let mines = value_or_prompt(mines, "MINES", input, output)?;

    let config = GameConfig::new((rows, cols), mines)?;
    let seed = args
        .seed
        .or(file.seed)
        .unwrap_or_else(rand::random::<u64>);

    Ok(Settings { config, seed })
}

fn value_or_prompt(
    value: Option<usize>,
    label: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<usize> {
    if let Some(value) = value {
        return Ok(value);
    }

    write!(output, "{label} : ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed while waiting for {}", label.to_lowercase());
    }
    let answer = line.trim();
    answer.parse().with_context(|| {
        format!(
            "{} must be a non-negative integer, got {:?}",
            label.to_lowercase(),
            answer
        )
    })
}
