//! JSON response decoding.
//!
//! Decoding is lenient about shape: unknown fields are ignored everywhere,
//! and the result may arrive wrapped as `{"message": ..., "result": {...}}`
//! or as the bare result object.

use super::endpoint::Endpoint;
use crate::error::Result;
use crate::models::AnySearchResult;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decodes a response body into `T`, unwrapping the `result` envelope if present.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let mut value: Value = serde_json::from_slice(body)?;

    let payload = if value.get("result").is_some_and(Value::is_object) {
        value["result"].take()
    } else {
        value
    };

    Ok(serde_json::from_value(payload)?)
}

/// Decodes a response body into the result type served by `endpoint`.
pub fn decode_for(endpoint: Endpoint, body: &[u8]) -> Result<AnySearchResult> {
    debug!("Decoding {} bytes as {} result", body.len(), endpoint);

    Ok(match endpoint {
        Endpoint::Universal => AnySearchResult::Universal(decode(body)?),
        Endpoint::OffersStandard => AnySearchResult::OffersStandard(decode(body)?),
        Endpoint::OffersPremium => AnySearchResult::OffersPremium(decode(body)?),
        Endpoint::CatalogStandard => AnySearchResult::CatalogStandard(decode(body)?),
        Endpoint::CatalogPremium => AnySearchResult::CatalogPremium(decode(body)?),
        Endpoint::Summary => AnySearchResult::Summary(decode(body)?),
    })
}

/// Extracts a human-readable message from an error body.
///
/// Looks for a string `message` or `error` field, falling back to the raw
/// text. Returns `None` for an empty body.
pub fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
