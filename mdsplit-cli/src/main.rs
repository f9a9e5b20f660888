//! mdsplit command-line entry point

use clap::Parser;
use mdsplit_cli::commands::Commands;

/// Split Markdown into chunks that fit a message length limit
#[derive(Debug, Parser)]
#[command(name = "mdsplit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
