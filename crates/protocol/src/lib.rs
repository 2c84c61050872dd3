//! Shared types for the LightSync bridge.
//!
//! The source system (a Legrand-style vendor hub) owns authoritative
//! light state; the target system (a Hubitat hub) receives forwarded
//! on/off commands. These types flow between the discovery, catalog,
//! and dispatch crates.

pub mod command;
pub mod device;
pub mod endpoint;

// Re-export primary types.
pub use command::{Command, CommandAction};
pub use device::{Device, DeviceKind, DeviceState};
pub use endpoint::HubEndpoint;
