//! HTTP sending seam.
//!
//! # Responsibilities
//! - Issue one authenticated GET and hand back status + body
//! - Report transport-level failures without interpreting status codes
//!
//! Deadlines are not applied here; the fetch client wraps each call.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA};

use crate::client::error::FetchError;

/// What came back from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single GET request.
#[async_trait]
pub trait HttpSend: Send + Sync {
    /// Returns `Err(FetchError::Transport)` only when no HTTP response was obtained.
    async fn get(&self, url: &str, credential: &str) -> Result<HttpReply, FetchError>;
}

/// `reqwest`-backed sender.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("canvas-fetch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn get(&self, url: &str, credential: &str) -> Result<HttpReply, FetchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(credential)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .header(PRAGMA, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            // Status classifies the error; the body is best-effort.
            let body = response.text().await.unwrap_or_default();
            return Ok(HttpReply { status, body });
        }
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read body: {}", e)))?;

        Ok(HttpReply { status, body })
    }
}
