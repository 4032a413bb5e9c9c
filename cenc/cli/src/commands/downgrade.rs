use anyhow::Result;
use clap::Args;
use tracing::info;

/**
    Rewrite a v1 Widevine PSSH box as v0.
*/
#[derive(Args)]
pub struct DowngradeCommand {
    /// Base64-encoded PSSH box.
    pub base64: String,
}

impl DowngradeCommand {
    pub fn run(self) -> Result<()> {
        let input = self.base64.trim();
        let output = cenc_core::downgrade_to_v0(input);
        if output == input {
            info!("box left unchanged");
        }
        println!("{output}");
        Ok(())
    }
}
