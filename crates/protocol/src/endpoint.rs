use std::time::{Duration, Instant};

/// A resolved base URL for the source hub.
///
/// Cycle-scoped: rediscovered at the start of each reconciliation
/// cycle and never persisted.
#[derive(Debug, Clone)]
pub struct HubEndpoint {
    base_url: String,
    resolved_at: Instant,
}

impl HubEndpoint {
    /// Creates an endpoint resolved now. Trailing slashes are
    /// normalized away so paths can be appended directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            resolved_at: Instant::now(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// How long ago this endpoint was resolved.
    pub fn age(&self) -> Duration {
        self.resolved_at.elapsed()
    }
}
