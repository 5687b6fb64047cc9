use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use gridsweep_core::{MinefieldGenerator, Observation, PlayEngine, RandomMinefieldGenerator};

mod args;
mod input;
mod render;
mod session;
mod settings;

fn main() -> Result<()> {
    let args = args::Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let file = args
        .config
        .as_deref()
        .map(settings::ConfigFile::load)
        .transpose()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let settings = settings::resolve(&args, file.as_ref(), &mut input, &mut output)?;
    log::info!(
        "starting {}x{} board with {} mines, seed {}",
        settings.config.rows(),
        settings.config.cols(),
        settings.config.mines,
        settings.seed
    );

    let layout = RandomMinefieldGenerator::new(settings.seed).generate(settings.config)?;
    let mut session = session::GameSession::new(PlayEngine::new(layout));
    session::run(&mut session, &mut input, &mut output)?;

    log::info!(
        "session ended in state {:?} after {} moves",
        session.engine().state(),
        session.move_count()
    );

    if args.json {
        let observation = Observation::from_engine(session.engine());
        observation
            .validate()
            .context("final board snapshot is inconsistent")?;
        let json = serde_json::to_string_pretty(&observation)
            .context("could not serialize the final board")?;
        writeln!(output, "{json}")?;
    }

    Ok(())
}
