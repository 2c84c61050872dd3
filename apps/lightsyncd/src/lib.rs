//! Shared pieces of the LightSync binaries: configuration loading and
//! client wiring used by the daemon, the health probe, and the
//! one-shot command sender.

pub mod config;
