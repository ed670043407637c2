use std::fmt::Debug;
use std::time::Duration;

use bytes::Bytes;

use crate::Result;

/// HttpSend is the transport that carries a signed request to the endpoint.
///
/// s3probe never opens connections itself: the signed request description is
/// handed to an implementation of this trait, which returns status, headers
/// and the full body.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Transport settings owned by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Request timeout.
    pub timeout: Duration,
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
    /// Maximum redirects to follow when `follow_redirects` is set.
    pub max_redirects: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: Duration::from_secs(30),
            follow_redirects: true,
            max_redirects: 10,
        }
    }
}
