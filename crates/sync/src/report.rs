use std::fmt;

/// How one reconciliation cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle ran to the end; per-device counts tell the rest.
    Completed,
    /// No matching hub advertisement within the discovery window.
    HubNotFound,
    /// Login was rejected or the source hub was unreachable.
    AuthFailed,
    /// Catalog fetch failed after a successful login.
    FetchFailed,
    /// A previous cycle was still running; this tick was dropped.
    Overlapped,
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::Completed => write!(f, "completed"),
            CycleOutcome::HubNotFound => write!(f, "hub-not-found"),
            CycleOutcome::AuthFailed => write!(f, "auth-failed"),
            CycleOutcome::FetchFailed => write!(f, "fetch-failed"),
            CycleOutcome::Overlapped => write!(f, "overlapped"),
        }
    }
}

/// Aggregate summary of one cycle.
///
/// A partially successful cycle is still a normal report; dispatch
/// failures show up in `dispatch_errors`, never as an engine error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    /// Devices present in the fetched catalog.
    pub devices_seen: usize,
    /// Commands acknowledged by the target hub.
    pub commands_sent: usize,
    /// Devices skipped as ineligible (wrong kind or no mapping).
    pub commands_skipped: usize,
    /// Per-device dispatch failures.
    pub dispatch_errors: usize,
}

impl CycleReport {
    /// A report for a cycle that ended before any device work.
    pub fn short_circuited(outcome: CycleOutcome) -> Self {
        Self {
            outcome,
            devices_seen: 0,
            commands_sent: 0,
            commands_skipped: 0,
            dispatch_errors: 0,
        }
    }
}
