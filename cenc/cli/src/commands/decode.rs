use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use cenc_core::PsshBox;

/**
    Decode and print a PSSH box.
*/
#[derive(Args)]
pub struct DecodeCommand {
    /// Base64-encoded PSSH box.
    pub base64: String,

    /// Reject boxes whose declared length differs from their actual length.
    #[arg(long)]
    pub strict: bool,

    /// Print the decoded fields as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DecodedPssh {
    version: u32,
    system: &'static str,
    system_id: String,
    key_ids: Vec<String>,
    data_size: usize,
    data: String,
}

impl From<&PsshBox> for DecodedPssh {
    fn from(pssh: &PsshBox) -> Self {
        Self {
            version: pssh.version,
            system: pssh.system_id().to_name(),
            system_id: pssh.system_id().to_uuid(),
            key_ids: pssh.key_ids().iter().map(|k| k.to_hex()).collect(),
            data_size: pssh.data.len(),
            data: data_encoding::BASE64.encode(&pssh.data),
        }
    }
}

impl DecodeCommand {
    pub fn run(self) -> Result<()> {
        let input = self.base64.trim();
        let pssh = if self.strict {
            cenc_core::decode_strict(input)
        } else {
            cenc_core::decode(input)
        }
        .context("failed to parse PSSH box")?;

        if self.json {
            let decoded = DecodedPssh::from(&pssh);
            println!("{}", serde_json::to_string_pretty(&decoded)?);
            return Ok(());
        }

        println!("Version:    {}", pssh.version);
        println!("System ID:  {}", pssh.system_id());
        println!("Data Size:  {} bytes", pssh.data.len());

        let kids = pssh.key_ids();
        if !kids.is_empty() {
            println!();
            println!("Key IDs ({}):", kids.len());
            for kid in kids {
                println!("  {kid}");
            }
        }

        Ok(())
    }
}
