use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::commands::{DecodeCommand, DowngradeCommand, EncodeCommand};

/**
    CENC PSSH box tool.
*/
#[derive(Parser)]
#[command(name = "cenc")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a PSSH box from a payload and optional key IDs.
    Encode(EncodeCommand),
    /// Decode and print a base64 PSSH box.
    Decode(DecodeCommand),
    /// Rewrite a v1 Widevine PSSH box as v0.
    Downgrade(DowngradeCommand),
}

impl Cli {
    /**
        Install a stderr `tracing` subscriber so stdout only carries command output.
    */
    pub fn init_tracing(&self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env()?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        Ok(())
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Encode(cmd) => cmd.run(),
            Command::Decode(cmd) => cmd.run(),
            Command::Downgrade(cmd) => cmd.run(),
        }
    }
}
