//! The search client: one operation per endpoint.

use super::decoder;
use super::endpoint::Endpoint;
use super::request::{Credentials, HttpRequest};
use super::transport::{Transport, WreqTransport};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    AnySearchResult, CatalogPremiumSearchResult, CatalogStandardSearchResult, OffersSearchResult,
    SummarySearchResult, UniversalSearchResult,
};
use crate::query::Query;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Client for the product search API.
///
/// The client owns its transport. Call [`IndixClient::close`] when done;
/// dropping the client closes it as well. Once closed, every operation
/// returns [`Error::Closed`].
pub struct IndixClient {
    transport: Box<dyn Transport>,
    credentials: Credentials,
    base_url: String,
    closed: AtomicBool,
}

impl IndixClient {
    /// Creates a client against the default API host.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Result<Self> {
        Self::with_config(Credentials::new(app_id, app_key)?, &Config::default())
    }

    /// Creates a client using the base URL and timeouts from `config`.
    pub fn with_config(credentials: Credentials, config: &Config) -> Result<Self> {
        let transport = WreqTransport::new(config)?;
        Ok(Self::with_transport(credentials, &config.base_url, transport))
    }

    /// Creates a client over a custom transport (for testing or alternative HTTP stacks).
    pub fn with_transport(
        credentials: Credentials,
        base_url: &str,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            transport: Box::new(transport),
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Releases the transport. Safe to call more than once.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("Closing client");
            self.transport.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn get_products_universal(&self, query: &Query) -> Result<UniversalSearchResult> {
        self.fetch(Endpoint::Universal, query).await
    }

    pub async fn get_products_offers_standard(&self, query: &Query) -> Result<OffersSearchResult> {
        self.fetch(Endpoint::OffersStandard, query).await
    }

    pub async fn get_products_offers_premium(&self, query: &Query) -> Result<OffersSearchResult> {
        self.fetch(Endpoint::OffersPremium, query).await
    }

    pub async fn get_products_catalog_standard(
        &self,
        query: &Query,
    ) -> Result<CatalogStandardSearchResult> {
        self.fetch(Endpoint::CatalogStandard, query).await
    }

    pub async fn get_products_catalog_premium(
        &self,
        query: &Query,
    ) -> Result<CatalogPremiumSearchResult> {
        self.fetch(Endpoint::CatalogPremium, query).await
    }

    pub async fn get_products_summary(&self, query: &Query) -> Result<SummarySearchResult> {
        self.fetch(Endpoint::Summary, query).await
    }

    /// Searches an endpoint chosen at runtime.
    pub async fn search(&self, endpoint: Endpoint, query: &Query) -> Result<AnySearchResult> {
        let body = self.send(endpoint, query).await?;
        decoder::decode_for(endpoint, &body)
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint, query: &Query) -> Result<T> {
        let body = self.send(endpoint, query).await?;
        decoder::decode(&body)
    }

    /// Sends the search request and returns the body of a successful response.
    async fn send(&self, endpoint: Endpoint, query: &Query) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(Error::Closed);
        }

        info!("Searching {}: {} ({})", endpoint, query.q(), query.country_code());

        let request = HttpRequest::for_search(&self.base_url, endpoint, &self.credentials, query);
        let response = self.transport.execute(&request).await?;

        if response.is_success() {
            return Ok(response.body);
        }

        let status = response.status;
        let message = decoder::error_message(&response.body)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        warn!("{} search failed with status {}: {}", endpoint, status, message);

        if status >= 500 {
            Err(Error::InternalServer { status, message })
        } else {
            Err(Error::Api { status, message })
        }
    }
}

impl Drop for IndixClient {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::HttpResponse;
    use crate::api::transport::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU32;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"{"count": 2, "facets": [], "products": [{"mpid": "a"}, {"mpid": "b"}]}"#;

    /// Transport that replays one canned response and records what it saw.
    #[derive(Clone, Default)]
    struct MockTransport {
        status: u16,
        body: String,
        fail: bool,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        close_calls: Arc<AtomicU32>,
    }

    impl MockTransport {
        fn ok(body: &str) -> Self {
            Self { status: 200, body: body.to_string(), ..Default::default() }
        }

        fn status(status: u16, body: &str) -> Self {
            Self { status, body: body.to_string(), ..Default::default() }
        }

        fn failing() -> Self {
            Self { fail: true, ..Default::default() }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(
            &self,
            request: &HttpRequest,
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(TransportError::Send("connection reset".to_string()));
            }
            Ok(HttpResponse::new(self.status, self.body.as_bytes()))
        }

        fn close(&self) {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn creds() -> Credentials {
        Credentials::new("123", "123").unwrap()
    }

    fn nike() -> Query {
        Query::builder().q("nike").country_code("US").stores_count(3).build().unwrap()
    }

    fn client_with(transport: MockTransport) -> IndixClient {
        IndixClient::with_transport(creds(), "https://api.indix.com/", transport)
    }

    #[tokio::test]
    async fn test_each_operation_hits_its_endpoint() {
        let transport = MockTransport::ok(BODY);
        let client = client_with(transport.clone());
        let query = nike();

        assert_eq!(client.get_products_universal(&query).await.unwrap().count, 2);
        assert_eq!(client.get_products_offers_standard(&query).await.unwrap().count, 2);
        assert_eq!(client.get_products_offers_premium(&query).await.unwrap().count, 2);
        assert_eq!(client.get_products_catalog_standard(&query).await.unwrap().count, 2);
        assert_eq!(client.get_products_catalog_premium(&query).await.unwrap().count, 2);
        assert_eq!(client.get_products_summary(&query).await.unwrap().count, 2);

        let paths: Vec<String> =
            transport.requests.lock().unwrap().iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                "/v2/universal/products",
                "/v2/offersStandard/products",
                "/v2/offersPremium/products",
                "/v2/catalogStandard/products",
                "/v2/catalogPremium/products",
                "/v2/summary/products",
            ]
        );
    }

    #[tokio::test]
    async fn test_request_carries_credentials_and_query() {
        let transport = MockTransport::ok(BODY);
        let client = client_with(transport.clone());

        client.get_products_summary(&nike()).await.unwrap();

        let requests = transport.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.base_url, "https://api.indix.com");
        assert_eq!(request.param_value("app_id"), Some("123"));
        assert_eq!(request.param_value("app_key"), Some("123"));
        assert_eq!(request.param_value("q"), Some("nike"));
        assert_eq!(request.param_value("countryCode"), Some("US"));
        assert_eq!(request.param_value("storesCount"), Some("3"));
    }

    #[tokio::test]
    async fn test_search_dispatch() {
        let client = client_with(MockTransport::ok(BODY));

        let result = client.search(Endpoint::CatalogPremium, &nike()).await.unwrap();
        assert_eq!(result.endpoint(), Endpoint::CatalogPremium);
        assert_eq!(result.mpids(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_client_error_status() {
        let client =
            client_with(MockTransport::status(401, r#"{"message": "Invalid app_id or app_key"}"#));

        let err = client.get_products_universal(&nike()).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("Invalid app_id or app_key"));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let client = client_with(MockTransport::status(502, ""));

        let err = client.get_products_summary(&nike()).await.unwrap_err();
        assert!(err.is_server_error());
        assert!(matches!(err, Error::InternalServer { status: 502, .. }));
        assert!(err.to_string().contains("request failed with status 502"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = client_with(MockTransport::failing());

        let err = client.get_products_summary(&nike()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Send(_))));
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_decode_failure_is_distinct() {
        let client = client_with(MockTransport::ok("<html>not json</html>"));

        let err = client.get_products_summary(&nike()).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_blocks_calls() {
        let transport = MockTransport::ok(BODY);
        let client = client_with(transport.clone());

        assert!(!client.is_closed());
        client.close();
        client.close();
        assert!(client.is_closed());
        assert_eq!(transport.close_calls.load(Ordering::SeqCst), 1);

        let err = client.get_products_universal(&nike()).await.unwrap_err();
        assert!(matches!(err, Error::Closed));
        assert_eq!(transport.request_count(), 0);

        drop(client);
        assert_eq!(transport.close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_transport() {
        let transport = MockTransport::status(500, "boom");
        {
            let client = client_with(transport.clone());
            assert!(client.get_products_summary(&nike()).await.is_err());
        }
        assert_eq!(transport.close_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_rejects_blank_credentials() {
        assert!(matches!(IndixClient::new("", "key"), Err(Error::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_base_url_default() {
        let client = IndixClient::new("id", "key").unwrap();
        assert_eq!(client.base_url(), "https://api.indix.com");
    }

    #[tokio::test]
    async fn test_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/offersStandard/products"))
            .and(query_param("app_id", "123"))
            .and(query_param("q", "nike air"))
            .and(query_param("storeId", "270"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"message": "ok", "result": {}}}"#, BODY)),
            )
            .mount(&mock_server)
            .await;

        let config = Config { base_url: mock_server.uri(), ..Config::default() };
        let client = IndixClient::with_config(creds(), &config).unwrap();
        let query = Query::builder()
            .q("nike air")
            .country_code("us")
            .store_ids([270])
            .build()
            .unwrap();

        let result = client.get_products_offers_standard(&query).await.unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.mpids(), vec!["a", "b"]);
        client.close();
    }

    #[tokio::test]
    async fn test_over_http_error_statuses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/summary/products"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"message": "countryCode invalid"}"#),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/universal/products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let config = Config { base_url: mock_server.uri(), ..Config::default() };
        let client = IndixClient::with_config(creds(), &config).unwrap();

        let err = client.get_products_summary(&nike()).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 400, .. }));
        assert!(err.to_string().contains("countryCode invalid"));

        let err = client.get_products_universal(&nike()).await.unwrap_err();
        assert!(matches!(err, Error::InternalServer { status: 500, .. }));
    }
}
