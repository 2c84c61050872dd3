//! mDNS/DNS-SD discovery of the source lighting hub.
//!
//! The vendor hub advertises plain HTTP over mDNS, so we browse the
//! generic `_http._tcp` service class and match advertisements whose
//! name or host carries the vendor's identifying substring.

pub mod locator;

pub use locator::{HubLocator, SERVICE_TYPE};

/// Errors for discovery operations.
///
/// A hub that simply isn't there is not an error; `locate` returns
/// `Ok(None)` for that.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("mDNS error: {0}")]
    Mdns(String),
}
