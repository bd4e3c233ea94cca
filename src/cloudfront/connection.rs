//! Authenticated connection to the CloudFront API

use crate::cloudfront::distribution::Distribution;
use crate::cloudfront::error::Result;
use crate::cloudfront::signer::RequestSigner;
use crate::cloudfront::transport::{HttpsTransport, Transport};
use crate::config::ApiConfig;

/// Account credentials; the secret is only ever used as an HMAC key
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Owns the transport and the signing secret, and hands out `Distribution`s
///
/// Distributions borrow the connection, so none can outlive `close`.
#[derive(Debug)]
pub struct Connection<T = HttpsTransport> {
    signer: RequestSigner,
    api_host: String,
    api_path_template: String,
    transport: T,
}

impl Connection<HttpsTransport> {
    /// Open against the default CloudFront endpoint
    pub fn open(access_key_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::open_with(
            Credentials::new(access_key_id, secret_key),
            &ApiConfig::default(),
        )
    }

    /// Open with explicit API settings
    pub fn open_with(credentials: Credentials, api: &ApiConfig) -> Result<Self> {
        let transport = HttpsTransport::new(api.request_timeout(), api.insecure_tls)?;
        Ok(Self::with_transport(credentials, api, transport))
    }
}

impl<T: Transport> Connection<T> {
    /// Build a connection over any transport
    pub fn with_transport(credentials: Credentials, api: &ApiConfig, transport: T) -> Self {
        tracing::debug!(
            host = %api.host,
            access_key_id = %credentials.access_key_id,
            "cloudfront_connection_opened"
        );
        Self {
            signer: RequestSigner::new(credentials.access_key_id, credentials.secret_key),
            api_host: api.host.clone(),
            api_path_template: api.path_template.clone(),
            transport,
        }
    }

    /// Handle for a distribution; no I/O, the id is validated remotely
    pub fn distribution(&self, distribution_id: impl Into<String>) -> Distribution<'_, T> {
        Distribution::new(self, distribution_id.into())
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn api_path_template(&self) -> &str {
        &self.api_path_template
    }

    pub(crate) fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the transport
    pub fn close(self) {
        tracing::debug!(host = %self.api_host, "cloudfront_connection_closed");
        drop(self.transport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_uses_defaults() {
        let connection = Connection::open("AKID", "SECRET").unwrap();
        assert_eq!(connection.api_host(), "cloudfront.amazonaws.com");
        assert_eq!(
            connection.api_path_template(),
            "/2010-11-01/distribution/{distribution_id}/invalidation"
        );
        assert_eq!(connection.signer().access_key(), "AKID");
        connection.close();
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials::new("AKID", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("hunter2"));
    }
}
