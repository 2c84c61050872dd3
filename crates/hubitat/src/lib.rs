//! Hubitat Maker API client.
//!
//! One GET per command against the per-device control endpoint. A
//! failure here is always scoped to the single device it targeted.

pub mod client;

pub use client::{Client, DispatchError};
