//! Network
//!
//! REST client for the admin backend.

mod http;

pub use http::{unwrap_envelope, with_query, ApiClient, FormPart, Payload};
