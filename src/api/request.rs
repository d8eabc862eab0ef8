//! Translation of queries into HTTP requests.

use super::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::query::Query;
use std::borrow::Cow;
use std::fmt;

/// The two tokens the API expects on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    app_key: String,
}

impl Credentials {
    /// Creates credentials, rejecting blank tokens.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let app_key = app_key.into();
        if app_id.trim().is_empty() || app_key.trim().is_empty() {
            return Err(Error::MissingCredentials);
        }
        Ok(Self { app_id, app_key })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
        }
    }
}

/// A transport-agnostic HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub base_url: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// Query parameters, unencoded, in send order
    pub params: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a GET request for `path` under `base_url`.
    pub fn get(base_url: &str, path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: path.into(),
            headers: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Builds the request for a product search on `endpoint`.
    ///
    /// Credentials go first, followed by the query's own parameters.
    pub fn for_search(
        base_url: &str,
        endpoint: Endpoint,
        credentials: &Credentials,
        query: &Query,
    ) -> Self {
        let mut request = Self::get(base_url, endpoint.path())
            .header("Accept", "application/json")
            .param("app_id", credentials.app_id.as_str())
            .param("app_key", credentials.app_key.as_str());

        for (name, value) in query.to_params() {
            request = request.param(name, value);
        }
        request
    }

    /// Returns the value of the first parameter with this name.
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Renders the full URL with percent-encoded parameters.
    pub fn url(&self) -> String {
        self.render_url(|_, value| urlencoding::encode(value))
    }

    /// Same as [`HttpRequest::url`] with the app key masked, for logs.
    pub fn redacted_url(&self) -> String {
        self.render_url(|name, value| {
            if name == "app_key" {
                Cow::Borrowed("***")
            } else {
                urlencoding::encode(value)
            }
        })
    }

    fn render_url<'a>(&'a self, encode: impl Fn(&str, &'a str) -> Cow<'a, str>) -> String {
        let mut url = format!("{}{}", self.base_url, self.path);
        for (i, (name, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(name));
            url.push('=');
            url.push_str(&encode(name.as_str(), value.as_str()));
        }
        url
    }
}

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
