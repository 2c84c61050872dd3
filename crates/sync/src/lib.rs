//! Reconciliation engine for the LightSync bridge.
//!
//! One cycle: locate the source hub, authenticate, fetch the device
//! catalog, then dispatch one on/off command per mapped light with
//! full per-device failure isolation. A cycle never errors out of the
//! engine; everything it saw is summarized in a [`CycleReport`].

pub mod engine;
pub mod plan;
pub mod report;

pub use engine::{EndpointSource, Locator, SyncEngine};
pub use plan::plan_command;
pub use report::{CycleOutcome, CycleReport};
