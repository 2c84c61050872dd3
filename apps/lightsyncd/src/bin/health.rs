//! Connectivity probe for both hubs.
//!
//! Checks that the Hubitat Maker API answers and that the source hub
//! can be reached and logged into, using the same configuration as the
//! daemon. Exits nonzero when any check fails.

use std::time::Duration;

use lightsync_discovery::HubLocator;
use lightsync_legrand::Credentials;
use lightsync_protocol::HubEndpoint;
use tracing_subscriber::EnvFilter;

use lightsyncd::config::SyncConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SyncConfig::load()?;
    let request_timeout = Duration::from_millis(config.request_timeout_ms);
    let mut healthy = true;

    // Target hub: list devices through the Maker API.
    let hubitat = lightsync_hubitat::Client::new(
        &config.hubitat.base_url,
        &config.hubitat.access_token,
        request_timeout,
    )?;
    match hubitat.probe().await {
        Ok(status) => tracing::info!(status, "Hubitat Maker API reachable"),
        Err(e) => {
            tracing::error!(error = %e, "Hubitat connectivity failed");
            healthy = false;
        }
    }

    // Source hub: resolve the endpoint, then attempt a login.
    let endpoint = match &config.legrand.hub_url {
        Some(url) => Some(HubEndpoint::new(url.as_str())),
        None => {
            let locator = HubLocator::new(&config.legrand.vendor_match);
            locator
                .locate(Duration::from_millis(config.discovery_timeout_ms))
                .await?
        }
    };

    match endpoint {
        Some(endpoint) => {
            let legrand = lightsync_legrand::Client::new(request_timeout)?;
            let credentials = Credentials {
                username: config.legrand.username.clone(),
                password: config.legrand.password.clone(),
            };
            match legrand.login(&endpoint, &credentials).await {
                Ok(_) => tracing::info!(url = endpoint.base_url(), "source hub reachable"),
                Err(e) => {
                    tracing::error!(url = endpoint.base_url(), error = %e, "source hub login failed");
                    healthy = false;
                }
            }
        }
        None => {
            tracing::error!("no source hub discovered");
            healthy = false;
        }
    }

    if !healthy {
        std::process::exit(1);
    }
    Ok(())
}
