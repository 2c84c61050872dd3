use std::time::Duration;

use lightsync_protocol::{Device, HubEndpoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Username/password pair for the source hub, from configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// An opaque session token returned by a successful login.
///
/// No expiry is tracked; a stale token simply surfaces as an error on
/// the next catalog fetch and the following cycle re-authenticates.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Errors from the login call.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("login rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors from the catalog fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog fetch failed with status {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Source hub API client.
///
/// The endpoint is threaded as an argument rather than stored so one
/// client outlives rediscovery across cycles.
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    /// Creates a client with a finite per-request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Authenticates against the hub and returns the session token.
    pub async fn login(
        &self,
        endpoint: &HubEndpoint,
        credentials: &Credentials,
    ) -> Result<Session, AuthError> {
        let url = format!("{}/login", endpoint.base_url());
        let resp = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: LoginResponse = resp.json().await?;
        debug!(url, "authenticated against source hub");
        Ok(Session { token: body.token })
    }

    /// Fetches the full device catalog in one authenticated request.
    ///
    /// No pagination or filtering; the source returns the whole set.
    /// Malformed optional fields degrade per device (see the serde
    /// defaults on [`Device`]), never the whole fetch.
    pub async fn devices(
        &self,
        endpoint: &HubEndpoint,
        session: &Session,
    ) -> Result<Vec<Device>, FetchError> {
        let url = format!("{}/devices", endpoint.base_url());
        let resp = self
            .http
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let devices: Vec<Device> = resp.json().await?;
        debug!(count = devices.len(), "fetched device catalog");
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightsync_protocol::{DeviceKind, DeviceState};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a mock HTTP server that responds once with the given
    /// status and JSON body, and reports the request head it saw.
    async fn mock_server(
        status: u16,
        body: &str,
    ) -> (
        HubEndpoint,
        tokio::sync::oneshot::Receiver<String>,
        tokio::task::JoinHandle<()>,
    ) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let endpoint = HubEndpoint::new(format!("http://127.0.0.1:{port}"));
        let body = body.to_string();
        let (req_tx, req_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let request = read_request(&mut stream).await;
                let _ = req_tx.send(request);

                let resp = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (endpoint, req_rx, handle)
    }

    /// Reads a full HTTP request (head plus Content-Length body).
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let Ok(n) = stream.read(&mut chunk).await else {
                break;
            };
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text
                    .lines()
                    .find_map(|l| l.to_lowercase().strip_prefix("content-length:").map(str::to_owned))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "user".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn login_returns_token() {
        let (endpoint, req_rx, handle) = mock_server(200, r#"{"token":"abc123"}"#).await;

        let client = Client::new(Duration::from_secs(2)).unwrap();
        let session = client.login(&endpoint, &credentials()).await.unwrap();
        assert_eq!(session.token(), "abc123");

        let request = req_rx.await.unwrap();
        assert!(request.starts_with("POST /login"), "request: {request}");
        assert!(request.contains(r#""username":"user""#));
        assert!(request.contains(r#""password":"secret""#));

        handle.abort();
    }

    #[tokio::test]
    async fn login_rejected_is_auth_error() {
        let (endpoint, _req_rx, handle) = mock_server(401, r#"{"error":"bad credentials"}"#).await;

        let client = Client::new(Duration::from_secs(2)).unwrap();
        let err = client.login(&endpoint, &credentials()).await.unwrap_err();
        match err {
            AuthError::Rejected { status, .. } => assert_eq!(status, 401),
            other => panic!("expected Rejected, got {other:?}"),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn login_unreachable_is_auth_error() {
        // Nothing listens here.
        let endpoint = HubEndpoint::new("http://127.0.0.1:1");
        let client = Client::new(Duration::from_secs(2)).unwrap();
        let err = client.login(&endpoint, &credentials()).await.unwrap_err();
        assert!(matches!(err, AuthError::Http(_)));
    }

    #[tokio::test]
    async fn devices_returns_catalog() {
        let json = r#"[
            {"id":"L1","name":"Kitchen","type":"light","state":"on","hubitatId":"42"},
            {"id":"T1","name":"Hall","type":"thermostat","state":"off"}
        ]"#;
        let (endpoint, req_rx, handle) = mock_server(200, json).await;

        let client = Client::new(Duration::from_secs(2)).unwrap();
        let session = Session {
            token: "abc123".into(),
        };
        let devices = client.devices(&endpoint, &session).await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].kind, DeviceKind::Light);
        assert_eq!(devices[0].state, DeviceState::On);
        assert_eq!(devices[1].kind, DeviceKind::Other);

        let request = req_rx.await.unwrap();
        assert!(request.starts_with("GET /devices"), "request: {request}");
        assert!(
            request.to_lowercase().contains("authorization: bearer abc123"),
            "request: {request}"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn devices_error_status_is_fetch_error() {
        let (endpoint, _req_rx, handle) = mock_server(500, "oops").await;

        let client = Client::new(Duration::from_secs(2)).unwrap();
        let session = Session { token: "t".into() };
        let err = client.devices(&endpoint, &session).await.unwrap_err();
        match err {
            FetchError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("expected Api, got {other:?}"),
        }

        handle.abort();
    }
}
