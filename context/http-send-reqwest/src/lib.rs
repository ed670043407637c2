//! [`HttpSend`] implementation backed by [`reqwest`].

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{redirect, Client, Request};
use s3probe_core::{Error, HttpSend, Result, TransportOptions};

/// HttpSend that sends requests with a [`reqwest::Client`].
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client honoring the transport options.
    ///
    /// - `insecure` disables TLS certificate verification.
    /// - Redirects are followed up to `max_redirects` times, or never when
    ///   `follow_redirects` is off.
    pub fn from_options(opts: &TransportOptions) -> Result<Self> {
        let policy = if opts.follow_redirects {
            redirect::Policy::limited(opts.max_redirects)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .timeout(opts.timeout)
            .redirect(policy)
            .danger_accept_invalid_certs(opts.insecure)
            .build()
            .map_err(|e| Error::unexpected("failed to build http client").with_source(e))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("invalid http request").with_source(e))?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send http request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
