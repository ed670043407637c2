use std::time::Instant;

use bytes::Bytes;
use http::header::{DATE, USER_AGENT};
use http::{HeaderValue, Method, StatusCode};
use log::{debug, warn};
use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::response::{detect_server, error_summary};
use s3probe_core::time::{format_http_date, now, DateTime};
use s3probe_core::{Context, Result, SignRequest, SigningRequest};

/// User agent sent with every check request.
pub const S3PROBE_USER_AGENT: &str = concat!("s3probe/", env!("CARGO_PKG_VERSION"));

/// Name of the bucket check in reports.
pub const CHECK_NAME: &str = "Bucket Authentication Check";

/// Outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// The server answered without an error status.
    Pass,
    /// The request could not be built or sent, or the server returned an error.
    Fail,
}

/// Details of an authenticated bucket request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    /// Status was 2xx.
    pub success: bool,
    /// `SIGV4` or `SIGV2`.
    pub auth_type: String,
    /// The bucket exists (200 or 403).
    pub bucket_exists: bool,
    /// Access to the bucket was granted (200).
    pub access_granted: bool,
    /// HTTP status code.
    pub status_code: u16,
    /// Time from start of the check to the response, in milliseconds.
    #[serde(rename = "responseTimeMs")]
    pub response_time: u64,
    /// Server product detected from the `Server` header.
    pub provider: String,
    /// Url of the bucket root.
    pub endpoint: String,
}

/// Report of one bucket check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Always [`CHECK_NAME`].
    pub test_name: &'static str,
    /// Pass or fail.
    pub status: CheckStatus,
    /// Whole check duration in milliseconds.
    pub duration_ms: u64,
    /// Failure summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response details, absent when no response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AuthResult>,
}

impl CheckReport {
    fn failed(start: Instant, error: String) -> Self {
        Self {
            test_name: CHECK_NAME,
            status: CheckStatus::Fail,
            duration_ms: elapsed_ms(start),
            error: Some(error),
            details: None,
        }
    }

    /// The check passed.
    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

/// Authenticated `HEAD` against the bucket root.
#[derive(Debug)]
pub struct BucketCheck {
    ctx: Context,
    config: ResolvedConfig,
    signer: Box<dyn SignRequest>,
}

impl BucketCheck {
    /// Create a check that sends through `ctx`.
    pub fn new(ctx: Context, config: ResolvedConfig) -> Self {
        let signer = config.signer();
        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Config this check runs with.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Build the signed request.
    ///
    /// `now` is used for the `Date` header and the signature alike.
    pub fn build_request(&self, now: DateTime) -> Result<http::Request<Bytes>> {
        let mut req = SigningRequest::from_target(Method::HEAD, &self.config.target)?;
        req.headers
            .insert(USER_AGENT, HeaderValue::from_static(S3PROBE_USER_AGENT));
        req.headers
            .insert(DATE, HeaderValue::try_from(format_http_date(now))?);

        self.signer
            .sign_request(&mut req, &self.config.credential, now)?;
        debug!(
            "built {} request to {}",
            self.config.auth_type,
            req.url()
        );

        req.into_request()
    }

    /// Send the check request and classify the response.
    ///
    /// Failures are reported, never returned: a check always produces a report.
    pub async fn run(&self) -> CheckReport {
        let start = Instant::now();

        let req = match self.build_request(now()) {
            Ok(req) => req,
            Err(err) => {
                warn!("failed to create request: {err}");
                return CheckReport::failed(start, format!("failed to create request: {err}"));
            }
        };

        let resp = match self.ctx.http_send(req).await {
            Ok(resp) => resp,
            Err(err) => {
                warn!("request failed: {err}");
                return CheckReport::failed(start, format!("request failed: {err}"));
            }
        };

        let status = resp.status();
        let (bucket_exists, access_granted) = classify(status);
        debug!(
            "bucket check got {status}, exists: {bucket_exists}, granted: {access_granted}"
        );

        let details = AuthResult {
            success: status.is_success(),
            auth_type: self.config.auth_type.to_string(),
            bucket_exists,
            access_granted,
            status_code: status.as_u16(),
            response_time: elapsed_ms(start),
            provider: detect_server(resp.headers()).to_string(),
            endpoint: self.config.target.url(),
        };

        let error = (status.as_u16() >= 400).then(|| error_summary(status, resp.body()));

        CheckReport {
            test_name: CHECK_NAME,
            status: if error.is_some() {
                CheckStatus::Fail
            } else {
                CheckStatus::Pass
            },
            duration_ms: elapsed_ms(start),
            error,
            details: Some(details),
        }
    }
}

/// `(bucket exists, access granted)` for a response status.
fn classify(status: StatusCode) -> (bool, bool) {
    match status {
        StatusCode::OK => (true, true),
        StatusCode::FORBIDDEN => (true, false),
        _ => (false, false),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StatusCode::OK, (true, true))]
    #[test_case(StatusCode::FORBIDDEN, (true, false))]
    #[test_case(StatusCode::NOT_FOUND, (false, false))]
    #[test_case(StatusCode::MOVED_PERMANENTLY, (false, false))]
    #[test_case(StatusCode::NO_CONTENT, (false, false))]
    fn test_classify(status: StatusCode, expected: (bool, bool)) {
        assert_eq!(classify(status), expected);
    }

    #[test]
    fn test_user_agent() {
        assert!(S3PROBE_USER_AGENT.starts_with("s3probe/"));
    }
}
