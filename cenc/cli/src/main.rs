use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use self::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_tracing()?;
    cli.run()
}
