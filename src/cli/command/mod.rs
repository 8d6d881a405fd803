pub mod extract;
pub mod image_args;
pub mod scan;
pub mod show;

use crate::cli::command::extract::ExtractArgs;
use crate::cli::command::scan::ScanArgs;
use crate::cli::command::show::ShowArgs;
use clap::Subcommand;

/// Recovery commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recoverable file candidates found in the MFT
    Scan(ScanArgs),
    /// Show the parsed detail of a single MFT record
    Show(ShowArgs),
    /// Reassemble a file's contents and write them to an output path
    Extract(ExtractArgs),
}

impl Command {
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            Command::Scan(args) => args.invoke(),
            Command::Show(args) => args.invoke(),
            Command::Extract(args) => args.invoke(),
        }
    }
}
