use std::time::Duration;

use lightsync_protocol::Command;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

/// Errors from dispatching a command to the target hub.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("command rejected with status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Hubitat Maker API client.
///
/// The base URL includes the Maker API app path, e.g.
/// `http://hubitat.local/apps/api/42`.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl Client {
    /// Creates a client with a finite per-request timeout.
    pub fn new(
        base_url: &str,
        access_token: &str,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// Sends one on/off command to one device.
    ///
    /// Any 2xx response is an acknowledgment; everything else is a
    /// `DispatchError` for this device only.
    pub async fn send(&self, command: &Command) -> Result<(), DispatchError> {
        let device_id = utf8_percent_encode(&command.device_id, NON_ALPHANUMERIC);
        let url = format!("{}/devices/{device_id}/{}", self.base_url, command.action);
        let resp = self
            .http
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DispatchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(device = %command.device_id, action = %command.action, "command acknowledged");
        Ok(())
    }

    /// Reachability probe: lists devices and returns the status code.
    ///
    /// Used by the health-check tool, not by the reconciliation cycle.
    pub async fn probe(&self) -> Result<u16, DispatchError> {
        let url = format!("{}/devices", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DispatchError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(status.as_u16())
    }
}
