//! HTTP transport seam and its wreq-backed implementation.

use super::request::{HttpRequest, HttpResponse, Method};
use crate::config::Config;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use wreq::Client;

/// Failures below the HTTP layer: no response was obtained.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Failed to send request: {0}")]
    Send(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Transport has been released")]
    Released,
}

/// Executes HTTP requests - enables mocking for tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns status and body, whatever the status.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Releases connections held by the transport. Called at most once by the client.
    fn close(&self) {}
}

/// Default transport on top of a pooled wreq client.
pub struct WreqTransport {
    client: Mutex<Option<Client>>,
    user_agent: String,
}

impl WreqTransport {
    /// Creates a transport with the timeouts and user agent from `config`.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client: Mutex::new(Some(client)), user_agent: config.user_agent.clone() })
    }

    /// Returns a handle to the pooled client, unless released.
    fn client(&self) -> Option<Client> {
        self.client.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_released(&self) -> bool {
        self.client().is_none()
    }
}

#[async_trait]
impl Transport for WreqTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = self.client().ok_or(TransportError::Released)?;

        debug!("{} {}", request.method, request.redacted_url());

        let url = request.url();
        let mut builder = match request.method {
            Method::Get => client.get(url.as_str()),
        };
        builder = builder.header("User-Agent", self.user_agent.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| TransportError::Send(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response.bytes().await.map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(HttpResponse { status, body: body.to_vec() })
    }

    fn close(&self) {
        if self.client.lock().unwrap_or_else(|e| e.into_inner()).take().is_some() {
            debug!("Released HTTP client");
        }
    }
}
