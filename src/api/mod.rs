//! API plumbing: endpoints, request translation, transport, decoding and the client.

pub mod client;
pub mod decoder;
pub mod endpoint;
pub mod request;
pub mod transport;

pub use client::IndixClient;
pub use endpoint::Endpoint;
pub use request::{Credentials, HttpRequest, HttpResponse, Method};
pub use transport::{Transport, TransportError, WreqTransport};
