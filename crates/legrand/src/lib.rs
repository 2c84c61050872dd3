//! HTTP client for the Legrand-style source hub.
//!
//! Two calls against a discovered endpoint: `POST /login` to obtain a
//! session token and `GET /devices` for the full device catalog.
//! Sessions are cycle-scoped; every reconciliation cycle logs in again.

pub mod client;

pub use client::{AuthError, Client, Credentials, FetchError, Session};
