//! CloudFront invalidation client
//!
//! This module provides:
//! - Legacy CloudFront REST signing (HMAC-SHA1 over the `Date` header)
//! - `InvalidationBatch` request building
//! - Error document parsing into typed errors

pub mod connection;
pub mod distribution;
pub mod error;
pub mod request;
pub mod response;
pub mod signer;
pub mod transport;

// Re-export main types for convenience
pub use connection::{Connection, Credentials};
pub use distribution::Distribution;
pub use error::{InvalidationError, Result};
pub use request::{build_invalidation_batch, InvalidationRequest};
pub use response::{interpret_response, parse_error_body, RawResponse};
pub use signer::RequestSigner;
pub use transport::{HttpsTransport, Transport};
