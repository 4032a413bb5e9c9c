use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use cenc_core::{KeyId, SystemId};

/**
    Build a PSSH box.
*/
#[derive(Args)]
pub struct EncodeCommand {
    /// DRM system: a UUID or one of widevine, playready, fairplay, clearkey.
    #[arg(long, default_value = "widevine")]
    pub system_id: SystemId,

    /// Key ID as 32 hex digits (hyphens allowed). Repeat for more; any key ID makes a v1 box.
    #[arg(long = "kid")]
    pub kids: Vec<KeyId>,

    /// Init data payload, base64-encoded.
    #[arg(long, conflicts_with = "data_hex")]
    pub data_base64: Option<String>,

    /// Init data payload, hex-encoded.
    #[arg(long)]
    pub data_hex: Option<String>,
}

impl EncodeCommand {
    pub fn run(self) -> Result<()> {
        let data = match (&self.data_base64, &self.data_hex) {
            (Some(b64), _) => data_encoding::BASE64
                .decode(b64.trim().as_bytes())
                .context("invalid base64 payload")?,
            (None, Some(h)) => hex::decode(h.trim()).context("invalid hex payload")?,
            (None, None) => Vec::new(),
        };

        debug!(
            system = %self.system_id,
            kids = self.kids.len(),
            data_size = data.len(),
            "encoding"
        );

        let pssh = cenc_core::encode(&data, Some(self.system_id.to_bytes()), &self.kids);
        println!("{pssh}");
        Ok(())
    }
}
