//! Invalidation errors

use bytes::Bytes;
use hyper::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while issuing an invalidation
#[derive(Error, Debug)]
pub enum InvalidationError {
    #[error("No paths given for invalidation")]
    NoPaths,

    /// The service answered without any payload; nothing more is known.
    #[error("Empty response from CloudFront")]
    EmptyResponse,

    #[error("CloudFront error ({status}): {code}: {message}")]
    Remote {
        status: StatusCode,
        code: String,
        message: String,
        body: Bytes,
    },

    #[error("Malformed CloudFront response ({status}): {reason}")]
    MalformedResponse {
        status: StatusCode,
        reason: String,
        body: Bytes,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::http::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl InvalidationError {
    /// Raw response body carried by service-side failures
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            InvalidationError::Remote { body, .. }
            | InvalidationError::MalformedResponse { body, .. } => Some(&body[..]),
            _ => None,
        }
    }

    /// Service error code, when the service supplied one
    pub fn code(&self) -> Option<&str> {
        match self {
            InvalidationError::Remote { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

impl From<hyper_util::client::legacy::Error> for InvalidationError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        InvalidationError::Transport(format!("Client error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, InvalidationError>;
