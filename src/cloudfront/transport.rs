//! HTTPS transport for the CloudFront API
//!
//! `Transport` is the seam between request building and the network. The
//! production implementation is `HttpsTransport`; tests plug in recorders.

use crate::cloudfront::error::{InvalidationError, Result};
use crate::cloudfront::request::InvalidationRequest;
use crate::cloudfront::response::RawResponse;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::rt::TokioExecutor;
use native_tls::TlsConnector;
use std::time::Duration;

/// Sends one invalidation request and reads the whole response
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, host: &str, request: &InvalidationRequest) -> Result<RawResponse>;
}

/// hyper client over native-tls
pub struct HttpsTransport {
    client: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Option<Duration>,
}

impl HttpsTransport {
    /// Prepare a client; no connection is made until the first request
    pub fn new(timeout: Option<Duration>, insecure_tls: bool) -> Result<Self> {
        let mut http = HttpConnector::new();
        http.set_nodelay(true);
        http.enforce_http(false);
        http.set_connect_timeout(Some(Duration::from_secs(10)));

        let tls = if insecure_tls {
            tracing::warn!("INSECURE TLS MODE ENABLED: Certificate verification is disabled!");
            TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
        } else {
            TlsConnector::new()
        }
        .map_err(|e| InvalidationError::Transport(format!("TLS setup failed: {}", e)))?;

        let https = HttpsConnector::from((http, tls.into()));

        // A single session: one idle connection is all a one-shot client reuses
        let client = HyperClient::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(1)
            .set_host(true)
            .build(https);

        Ok(Self { client, timeout })
    }

    async fn send_once(&self, host: &str, request: &InvalidationRequest) -> Result<RawResponse> {
        let url = format!("https://{}{}", host, request.path);

        let mut req = Request::builder().method(Method::POST).uri(&url);
        for (key, value) in request.headers() {
            req = req.header(key, value);
        }
        let req = req.body(Full::new(Bytes::from(request.body.clone())))?;

        let response = self.client.request(req).await?;
        let status = response.status();
        let body = response
            .collect()
            .await
            .map_err(|e| InvalidationError::Transport(format!("Body error: {}", e)))?
            .to_bytes();

        tracing::debug!(status = %status, bytes = body.len(), "cloudfront_response");
        Ok(RawResponse { status, body })
    }
}

impl Transport for HttpsTransport {
    async fn send(&self, host: &str, request: &InvalidationRequest) -> Result<RawResponse> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.send_once(host, request))
                .await
                .map_err(|_| InvalidationError::Timeout(limit))?,
            None => self.send_once(host, request).await,
        }
    }
}

impl std::fmt::Debug for HttpsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpsTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_creation() {
        let transport = HttpsTransport::new(Some(Duration::from_secs(5)), false).unwrap();
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
    }
}
