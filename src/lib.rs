pub mod cli;
pub mod disk;
pub mod error;
pub mod mft;
pub mod ntfs;
pub mod read;
pub mod scan;

use crate::cli::Cli;
use clap::Parser;
use tracing::Level;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing subscriber with the given log level.
pub fn init_tracing(level: Level) -> eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::builder().parse_lossy(level.to_string()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(cfg!(debug_assertions))
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);
    if let Err(error) = subscriber.try_init() {
        eprintln!(
            "Failed to initialize tracing subscriber - are you running `cargo test`? If so, multiple test entrypoints may be running from the same process: {error}"
        );
        return Ok(());
    }

    debug!("Tracing initialized with level: {:?}", level);
    Ok(())
}

// Entrypoint for the program to reduce coupling to the name of this crate.
pub fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_level)?;
    cli.invoke()
}
