use std::{fs::File, io, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod animation;
mod app;
mod args;
mod audio;
mod beeper;
mod console;
mod grid;
mod misc;

fn main() -> anyhow::Result<()> {
    let args = args::Args::parse();
    args.validate()?;
    init_logging(&args)?;

    info!("Starting beep-grid v{}", env!("CARGO_PKG_VERSION"));
    app::run(&args)
}

/// Logs go to `--log-file` if given.
/// Otherwise they are dropped, stdout and stderr belong to the terminal UI.
fn init_logging(args: &args::Args) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&args.log_level).context("Invalid log level")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }

    Ok(())
}
