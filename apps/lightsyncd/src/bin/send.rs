//! One-shot command sender for a single Hubitat device.
//!
//! Exercises the dispatch contract outside the reconciliation cycle:
//!
//! ```text
//! lightsync-send <device-id> <on|off>
//! ```

use std::time::Duration;

use anyhow::bail;
use lightsync_protocol::{Command, CommandAction};
use tracing_subscriber::EnvFilter;

use lightsyncd::config::SyncConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(device_id), Some(action)) = (args.next(), args.next()) else {
        bail!("usage: lightsync-send <device-id> <on|off>");
    };
    let action: CommandAction = match action.parse() {
        Ok(action) => action,
        Err(e) => bail!("{e}"),
    };

    let config = SyncConfig::load()?;
    let hubitat = lightsync_hubitat::Client::new(
        &config.hubitat.base_url,
        &config.hubitat.access_token,
        Duration::from_millis(config.request_timeout_ms),
    )?;

    let command = Command { device_id, action };
    hubitat.send(&command).await?;
    tracing::info!(device = %command.device_id, action = %command.action, "command sent");
    Ok(())
}
