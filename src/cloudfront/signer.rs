//! CloudFront REST request signer
//!
//! The legacy CloudFront scheme signs exactly one value: the `Date` header.
//! The signature is `base64(HMAC-SHA1(secret_key, date))` and travels in
//! `Authorization: AWS {access_key}:{signature}`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// HTTP-date layout (RFC 7231 IMF-fixdate)
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Signer for CloudFront API requests
#[derive(Clone)]
pub struct RequestSigner {
    access_key: String,
    secret_key: String,
}

impl RequestSigner {
    /// Create a new signer
    pub fn new(access_key: String, secret_key: String) -> Self {
        Self {
            access_key,
            secret_key,
        }
    }

    /// Access key id this signer authenticates as
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Format a timestamp as an HTTP date (`Tue, 02 Mar 2010 10:00:00 GMT`)
    pub fn http_date(now: DateTime<Utc>) -> String {
        now.format(HTTP_DATE_FORMAT).to_string()
    }

    /// Sign a `Date` header value
    pub fn sign(&self, date: &str) -> String {
        STANDARD.encode(Self::hmac_sha1(self.secret_key.as_bytes(), date.as_bytes()))
    }

    /// Compute the `Date` header value and its signature for `now`
    pub fn calculate_key(&self, now: DateTime<Utc>) -> (String, String) {
        let date = Self::http_date(now);
        let signature = self.sign(&date);
        (date, signature)
    }

    /// Build the `Authorization` header value for a signature
    pub fn authorization(&self, signature: &str) -> String {
        let mut header = String::with_capacity(5 + self.access_key.len() + signature.len());
        header.push_str("AWS ");
        header.push_str(&self.access_key);
        header.push(':');
        header.push_str(signature);
        header
    }

    /// HMAC-SHA1 returning fixed-size array
    fn hmac_sha1(key: &[u8], msg: &[u8]) -> [u8; 20] {
        let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(msg);
        let result = mac.finalize().into_bytes();
        let mut output = [0u8; 20];
        output.copy_from_slice(&result);
        output
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
