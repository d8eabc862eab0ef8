//! indix-client - Typed async client for the Indix product search API
//!
//! Build a [`Query`], pick an endpoint on [`IndixClient`], and get back a
//! typed [`SearchResult`](models::SearchResult) for that endpoint's product shape.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;

pub use api::{Credentials, Endpoint, IndixClient, Transport};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{AnySearchResult, Offer, Product, SearchResult, StoreRecord};
pub use query::{Availability, Query, QueryBuilder, QueryError, SortBy};
