//! Distribution handle and the invalidate operation

use crate::cloudfront::connection::Connection;
use crate::cloudfront::error::{InvalidationError, Result};
use crate::cloudfront::request::{build_invalidation_batch, expand_path_template, InvalidationRequest};
use crate::cloudfront::response::interpret_response;
use crate::cloudfront::transport::Transport;
use chrono::{DateTime, Utc};

/// A CloudFront distribution reached through a borrowed `Connection`
#[derive(Debug)]
pub struct Distribution<'a, T> {
    connection: &'a Connection<T>,
    id: String,
}

impl<'a, T: Transport> Distribution<'a, T> {
    pub(crate) fn new(connection: &'a Connection<T>, id: String) -> Self {
        Self { connection, id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// API path for this distribution's invalidations
    pub fn request_path(&self) -> String {
        expand_path_template(self.connection.api_path_template(), &self.id)
    }

    /// Build the signed request as of `now`
    pub fn build_request<S: AsRef<str>>(
        &self,
        paths: &[S],
        now: DateTime<Utc>,
    ) -> Result<InvalidationRequest> {
        if paths.is_empty() {
            return Err(InvalidationError::NoPaths);
        }

        let signer = self.connection.signer();
        let (date, signature) = signer.calculate_key(now);

        Ok(InvalidationRequest {
            path: self.request_path(),
            date,
            authorization: signer.authorization(&signature),
            body: build_invalidation_batch(&self.id, paths, now.timestamp()),
        })
    }

    /// Invalidate `paths`: one signed POST, no retry
    pub async fn invalidate<S: AsRef<str>>(&self, paths: &[S]) -> Result<()> {
        let request = self.build_request(paths, Utc::now())?;

        tracing::debug!(
            distribution = %self.id,
            path = %request.path,
            paths = paths.len(),
            "cloudfront_invalidation_request"
        );

        let response = self
            .connection
            .transport()
            .send(self.connection.api_host(), &request)
            .await?;

        match interpret_response(&response) {
            Ok(()) => {
                tracing::info!(
                    distribution = %self.id,
                    paths = paths.len(),
                    "cloudfront_invalidation_created"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    distribution = %self.id,
                    status = %response.status,
                    error = %err,
                    "cloudfront_invalidation_rejected"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudfront::connection::Credentials;
    use crate::cloudfront::response::RawResponse;
    use crate::config::ApiConfig;
    use chrono::TimeZone;
    use hyper::StatusCode;
    use std::sync::Mutex;

    struct CannedTransport {
        status: StatusCode,
        body: &'static str,
        sent: Mutex<Vec<(String, InvalidationRequest)>>,
    }

    impl CannedTransport {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        async fn send(&self, host: &str, request: &InvalidationRequest) -> Result<RawResponse> {
            self.sent
                .lock()
                .unwrap()
                .push((host.to_string(), request.clone()));
            Ok(RawResponse::new(self.status, self.body))
        }
    }

    fn connection(status: StatusCode, body: &'static str) -> Connection<CannedTransport> {
        Connection::with_transport(
            Credentials::new("AKID", "SECRET"),
            &ApiConfig::default(),
            CannedTransport::new(status, body),
        )
    }

    #[test]
    fn test_build_request() {
        let connection = connection(StatusCode::CREATED, "<Invalidation/>");
        let distribution = connection.distribution("EXAMPLE123");
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();

        let request = distribution.build_request(&["/a.png", "/b.png"], now).unwrap();

        assert_eq!(request.path, "/2010-11-01/distribution/EXAMPLE123/invalidation");
        assert_eq!(request.date, "Thu, 01 Jan 2026 12:00:00 GMT");
        let signature = connection.signer().sign(&request.date);
        assert_eq!(request.authorization, format!("AWS AKID:{}", signature));
        assert!(request
            .body
            .contains(&format!("<CallerReference>EXAMPLE123{}</CallerReference>", now.timestamp())));
    }

    #[test]
    fn test_build_request_rejects_empty_paths() {
        let connection = connection(StatusCode::CREATED, "<Invalidation/>");
        let paths: [&str; 0] = [];
        assert!(matches!(
            connection.distribution("E1").build_request(&paths, Utc::now()),
            Err(InvalidationError::NoPaths)
        ));
    }

    #[tokio::test]
    async fn test_invalidate_success() {
        let connection = connection(StatusCode::CREATED, "<Invalidation><Id>I1</Id></Invalidation>");
        connection
            .distribution("E1")
            .invalidate(&["/index.html"])
            .await
            .unwrap();

        let sent = connection.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "cloudfront.amazonaws.com");
        assert_eq!(sent[0].1.path, "/2010-11-01/distribution/E1/invalidation");
    }

    #[tokio::test]
    async fn test_invalidate_remote_error() {
        let connection = connection(
            StatusCode::FORBIDDEN,
            "<ErrorResponse><Error><Code>AccessDenied</Code><Message>Bad signature</Message></Error></ErrorResponse>",
        );
        let err = connection
            .distribution("E1")
            .invalidate(&["/index.html"])
            .await
            .unwrap_err();

        match err {
            InvalidationError::Remote { code, message, .. } => {
                assert_eq!(code, "AccessDenied");
                assert_eq!(message, "Bad signature");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalidate_empty_paths_sends_nothing() {
        let connection = connection(StatusCode::CREATED, "<Invalidation/>");
        let paths: Vec<String> = Vec::new();
        let result = connection.distribution("E1").invalidate(paths.as_slice()).await;

        assert!(matches!(result, Err(InvalidationError::NoPaths)));
        assert!(connection.transport().sent.lock().unwrap().is_empty());
    }
}
