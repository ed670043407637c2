use std::mem;
use std::str::FromStr;

use bytes::Bytes;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::{ResolvedRequestTarget, Result};

/// Signing context for request.
///
/// Query values are stored exactly as they will appear on the wire, signers
/// must percent-encode them before pushing.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context for a resolved target.
    ///
    /// The `Host` header is set to the target authority so that signers
    /// canonicalize exactly the value that will be sent.
    pub fn from_target(method: Method, target: &ResolvedRequestTarget) -> Result<Self> {
        let authority = Authority::from_str(&target.authority())?;

        let mut headers = HeaderMap::new();
        headers.insert(http::header::HOST, HeaderValue::from_str(authority.as_str())?);

        Ok(SigningRequest {
            method,
            scheme: target.scheme().clone(),
            authority,
            path: target.path().to_string(),
            query: Vec::new(),
            headers,
        })
    }

    /// Write the signing context into http::request::Parts.
    fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = Some(PathAndQuery::from_str(&path_and_query(
                self.path,
                &self.query,
            ))?);
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Turn the signing context into a request description with an empty body.
    pub fn into_request(self) -> Result<http::Request<Bytes>> {
        let (mut parts, body) = http::Request::new(Bytes::new()).into_parts();
        self.apply(&mut parts)?;
        Ok(http::Request::from_parts(parts, body))
    }

    /// Full url of the request, query included.
    pub fn url(&self) -> String {
        format!(
            "{}://{}{}",
            self.scheme,
            self.authority,
            path_and_query(self.path.clone(), &self.query)
        )
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }
}

fn path_and_query(path: String, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path;
    }

    let query_size = query.iter().map(|(k, v)| k.len() + v.len() + 2).sum();
    let mut s = path;
    s.reserve(query_size);

    s.push('?');
    for (i, (k, v)) in query.iter().enumerate() {
        if i > 0 {
            s.push('&');
        }

        s.push_str(k);
        if !v.is_empty() {
            s.push('=');
            s.push_str(v);
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolve, AddressingStyle};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_target_sets_host() -> Result<()> {
        let target = resolve(
            "http://localhost:9000",
            "bucket",
            "us-east-1",
            AddressingStyle::PathStyle,
            false,
        )?;
        let req = SigningRequest::from_target(Method::HEAD, &target)?;
        assert_eq!(req.headers[http::header::HOST], "localhost:9000");
        assert_eq!(req.path, "/bucket");
        assert_eq!(req.url(), "http://localhost:9000/bucket");

        let req = req.into_request()?;
        assert_eq!(req.method(), Method::HEAD);
        assert_eq!(req.uri().to_string(), "http://localhost:9000/bucket");
        assert!(req.body().is_empty());
        Ok(())
    }

    #[test]
    fn test_query_is_kept_verbatim() -> Result<()> {
        let target = resolve(
            "https://s3.example.com",
            "b",
            "us-east-1",
            AddressingStyle::VirtualHosted,
            false,
        )?;
        let mut req = SigningRequest::from_target(Method::HEAD, &target)?;
        req.query_push("location", "");
        req.query_push("Signature", "a%2Fb");

        assert_eq!(req.url(), "https://b.s3.example.com/?location&Signature=a%2Fb");
        let req = req.into_request()?;
        assert_eq!(req.uri().query(), Some("location&Signature=a%2Fb"));
        Ok(())
    }
}
