//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use indix_client::api::{HttpRequest, HttpResponse, Transport, TransportError};
use indix_client::{Credentials, IndixClient, Query};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that answers every request with a fixture file from `tests/fixtures`.
#[derive(Clone)]
pub struct FixtureTransport {
    resource: PathBuf,
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
    pub close_calls: Arc<AtomicU32>,
}

impl FixtureTransport {
    pub fn new(resource: &str) -> Self {
        Self {
            resource: fixture_path(resource),
            requests: Arc::new(Mutex::new(Vec::new())),
            close_calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn closes(&self) -> u32 {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let body = std::fs::read(&self.resource)
            .map_err(|e| TransportError::Send(format!("{}: {}", self.resource.display(), e)))?;
        Ok(HttpResponse::new(200, body))
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn fixture_path(resource: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(resource)
}

pub fn fixture_bytes(resource: &str) -> Vec<u8> {
    std::fs::read(fixture_path(resource)).unwrap()
}

/// Client over a fixture transport, with the credentials the fixtures were recorded with.
pub fn fixture_client(resource: &str) -> (IndixClient, FixtureTransport) {
    init_tracing();
    let transport = FixtureTransport::new(resource);
    let credentials = Credentials::new("123", "123").unwrap();
    let client = IndixClient::with_transport(credentials, "https://api.indix.com", transport.clone());
    (client, transport)
}

/// The query used against every fixture: `{q: "nike", countryCode: "US", storesCount: 3}`.
pub fn nike_query() -> Query {
    Query::builder().q("nike").country_code("US").stores_count(3).build().unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
