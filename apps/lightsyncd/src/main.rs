//! LightSync daemon entry point.
//!
//! Wires configuration into the reconciliation engine and drives it on
//! a fixed interval until ctrl-c. No cycle outcome ever stops the
//! process; a failed cycle just waits for the next tick.

use std::time::Duration;

use lightsync_discovery::HubLocator;
use lightsync_legrand::Credentials;
use lightsync_sync::{EndpointSource, SyncEngine};
use tracing_subscriber::EnvFilter;

use lightsyncd::config::SyncConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting LightSync");

    let config = match SyncConfig::load() {
        Ok(c) => {
            tracing::info!(name = %c.name, interval_ms = c.interval_ms, "configuration loaded");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            SyncConfig::default()
        }
    };

    let locator = match &config.legrand.hub_url {
        Some(url) => {
            tracing::info!(url, "using fixed source hub address, discovery disabled");
            EndpointSource::Fixed(url.clone())
        }
        None => EndpointSource::Mdns(HubLocator::new(&config.legrand.vendor_match)),
    };

    let request_timeout = Duration::from_millis(config.request_timeout_ms);
    let engine = SyncEngine::new(
        locator,
        lightsync_legrand::Client::new(request_timeout)?,
        Credentials {
            username: config.legrand.username.clone(),
            password: config.legrand.password.clone(),
        },
        lightsync_hubitat::Client::new(
            &config.hubitat.base_url,
            &config.hubitat.access_token,
            request_timeout,
        )?,
        Duration::from_millis(config.discovery_timeout_ms),
    );

    let mut ticker = tokio::time::interval(Duration::from_millis(config.interval_ms));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = engine.run_cycle().await;
                tracing::info!(
                    outcome = %report.outcome,
                    seen = report.devices_seen,
                    sent = report.commands_sent,
                    skipped = report.commands_skipped,
                    errors = report.dispatch_errors,
                    "cycle finished"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
