use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use lightsync_discovery::{DiscoveryError, HubLocator};
use lightsync_legrand::Credentials;
use lightsync_protocol::HubEndpoint;
use tracing::{debug, info, warn};

use crate::plan::plan_command;
use crate::report::{CycleOutcome, CycleReport};

/// Resolves the source hub endpoint for one cycle.
///
/// Seam between the engine and mDNS so cycles can also run against a
/// fixed address from configuration (and against stubs in tests).
pub trait Locator: Send + Sync {
    fn locate(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<Option<HubEndpoint>, DiscoveryError>> + Send;
}

/// Production endpoint sources: mDNS discovery or a configured URL.
pub enum EndpointSource {
    /// Browse mDNS each cycle.
    Mdns(HubLocator),
    /// Fixed base URL from configuration; discovery is skipped.
    Fixed(String),
}

impl Locator for EndpointSource {
    async fn locate(&self, timeout: Duration) -> Result<Option<HubEndpoint>, DiscoveryError> {
        match self {
            EndpointSource::Mdns(locator) => locator.locate(timeout).await,
            EndpointSource::Fixed(url) => Ok(Some(HubEndpoint::new(url.as_str()))),
        }
    }
}

/// Runs reconciliation cycles: source state in, target commands out.
///
/// The endpoint and session are resolved fresh at the start of every
/// cycle and threaded through as values; nothing is cached across
/// cycles.
pub struct SyncEngine<L> {
    locator: L,
    source: lightsync_legrand::Client,
    credentials: Credentials,
    target: lightsync_hubitat::Client,
    discovery_timeout: Duration,
    in_progress: AtomicBool,
}

impl<L: Locator> SyncEngine<L> {
    pub fn new(
        locator: L,
        source: lightsync_legrand::Client,
        credentials: Credentials,
        target: lightsync_hubitat::Client,
        discovery_timeout: Duration,
    ) -> Self {
        Self {
            locator,
            source,
            credentials,
            target,
            discovery_timeout,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Runs one reconciliation cycle. Never returns an error; every
    /// outcome, including early exits, is a [`CycleReport`].
    ///
    /// A tick that arrives while a cycle is still running is dropped
    /// with a warning — cycles are idempotent, so the dropped tick
    /// loses nothing.
    pub async fn run_cycle(&self) -> CycleReport {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            warn!("previous cycle still running, dropping this tick");
            return CycleReport::short_circuited(CycleOutcome::Overlapped);
        }
        let report = self.cycle().await;
        self.in_progress.store(false, Ordering::SeqCst);
        report
    }

    /// Cycle body: locate → login → fetch → per-device dispatch.
    async fn cycle(&self) -> CycleReport {
        let endpoint = match self.locator.locate(self.discovery_timeout).await {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => {
                info!("no source hub discovered, waiting for next cycle");
                return CycleReport::short_circuited(CycleOutcome::HubNotFound);
            }
            Err(e) => {
                warn!(error = %e, "discovery failed");
                return CycleReport::short_circuited(CycleOutcome::HubNotFound);
            }
        };

        let session = match self.source.login(&endpoint, &self.credentials).await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "authentication failed, aborting cycle");
                return CycleReport::short_circuited(CycleOutcome::AuthFailed);
            }
        };

        let devices = match self.source.devices(&endpoint, &session).await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "catalog fetch failed, aborting cycle");
                return CycleReport::short_circuited(CycleOutcome::FetchFailed);
            }
        };

        let mut report = CycleReport {
            outcome: CycleOutcome::Completed,
            devices_seen: devices.len(),
            commands_sent: 0,
            commands_skipped: 0,
            dispatch_errors: 0,
        };

        // Catalog order, one device at a time. A failing device is
        // recorded and the rest keep going.
        for device in &devices {
            let Some(command) = plan_command(device) else {
                debug!(device = %device.id, name = %device.name, "device ineligible, skipped");
                report.commands_skipped += 1;
                continue;
            };

            match self.target.send(&command).await {
                Ok(()) => report.commands_sent += 1,
                Err(e) => {
                    report.dispatch_errors += 1;
                    warn!(
                        device = %device.id,
                        target = %command.device_id,
                        error = %e,
                        "dispatch failed"
                    );
                }
            }
        }

        report
    }
}
