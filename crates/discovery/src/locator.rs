use std::net::IpAddr;
use std::time::{Duration, Instant};

use lightsync_protocol::HubEndpoint;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use tracing::{debug, info};

use crate::DiscoveryError;

/// mDNS service type the vendor hub advertises under.
pub const SERVICE_TYPE: &str = "_http._tcp.local.";

/// Locates the source hub on the local network via mDNS/DNS-SD.
pub struct HubLocator {
    vendor_match: String,
}

impl HubLocator {
    /// Creates a locator matching advertisements whose name or host
    /// contains `vendor_match`, case-insensitive.
    pub fn new(vendor_match: &str) -> Self {
        Self {
            vendor_match: vendor_match.to_lowercase(),
        }
    }

    /// Browses for the hub within the given window.
    ///
    /// The first matching advertisement wins and the browse is torn
    /// down immediately; if the window elapses with no match the result
    /// is `Ok(None)`, a benign outcome. Retry is the caller's concern,
    /// one attempt per reconciliation cycle.
    pub async fn locate(&self, timeout: Duration) -> Result<Option<HubEndpoint>, DiscoveryError> {
        let daemon = ServiceDaemon::new()
            .map_err(|e| DiscoveryError::Mdns(format!("failed to create mDNS daemon: {e}")))?;

        let receiver = match daemon.browse(SERVICE_TYPE) {
            Ok(rx) => rx,
            Err(e) => {
                let _ = daemon.shutdown();
                return Err(DiscoveryError::Mdns(format!("failed to browse mDNS: {e}")));
            }
        };

        let deadline = Instant::now() + timeout;
        let mut found = None;

        while found.is_none() && Instant::now() < deadline {
            match tokio::time::timeout(
                deadline.saturating_duration_since(Instant::now()),
                tokio::task::spawn_blocking({
                    let receiver = receiver.clone();
                    move || receiver.recv_timeout(Duration::from_millis(100))
                }),
            )
            .await
            {
                Ok(Ok(Ok(event))) => {
                    found = self.match_event(&event);
                }
                _ => {
                    // Timeout or receive error — keep waiting until the deadline.
                }
            }
        }

        let _ = daemon.shutdown();

        match &found {
            Some(endpoint) => info!(url = endpoint.base_url(), "discovered source hub"),
            None => debug!(timeout_ms = timeout.as_millis() as u64, "no source hub found"),
        }
        Ok(found)
    }

    /// Turns a matching `ServiceResolved` event into an endpoint.
    fn match_event(&self, event: &ServiceEvent) -> Option<HubEndpoint> {
        let ServiceEvent::ServiceResolved(info) = event else {
            return None;
        };
        if !self.matches(info.get_fullname(), info.get_hostname()) {
            return None;
        }
        endpoint_for(info)
    }

    /// Matching predicate: advertised name OR host contains the vendor
    /// substring, case-insensitive.
    fn matches(&self, name: &str, host: &str) -> bool {
        name.to_lowercase().contains(&self.vendor_match)
            || host.to_lowercase().contains(&self.vendor_match)
    }
}

/// Builds the hub base URL from a resolved service.
///
/// Prefers the first usable IPv4 address (loopback and link-local
/// filtered out); the advertised port is kept unless it is plain 80.
fn endpoint_for(info: &ServiceInfo) -> Option<HubEndpoint> {
    let ip = info.get_addresses().iter().find_map(|ip| {
        let IpAddr::V4(v4) = ip else {
            return None;
        };
        if v4.is_loopback() || v4.is_link_local() {
            return None;
        }
        Some(*v4)
    })?;

    let port = info.get_port();
    let url = if port == 80 {
        format!("http://{ip}")
    } else {
        format!("http://{ip}:{port}")
    };
    Some(HubEndpoint::new(url))
}
