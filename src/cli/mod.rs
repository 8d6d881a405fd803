pub mod command;

use crate::cli::command::Command;
use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "ntfs-salvage",
    version,
    about = "NTFS file recovery toolkit",
    propagate_version = true
)]
pub struct Cli {
    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = Level::INFO)]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn invoke(self) -> eyre::Result<()> {
        self.command.invoke()
    }
}
