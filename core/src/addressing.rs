//! Bucket addressing resolution.
//!
//! Every endpoint, whether typed by the user or expanded from a provider
//! shortcut, goes through [`resolve`] to become a [`ResolvedRequestTarget`].

use std::fmt;
use std::net::IpAddr;

use http::uri::Scheme;
use http::Uri;
use log::debug;

use crate::provider::shortcut;
use crate::{Error, Result};

/// How the bucket is expressed in the request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingStyle {
    /// `https://<bucket>.<endpoint>/`
    #[default]
    VirtualHosted,
    /// `https://<endpoint>/<bucket>`
    PathStyle,
}

impl fmt::Display for AddressingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressingStyle::VirtualHosted => f.write_str("virtual-hosted"),
            AddressingStyle::PathStyle => f.write_str("path-style"),
        }
    }
}

/// The bucket-root resource a check request is sent to.
///
/// For [`AddressingStyle::VirtualHosted`] the host is `<bucket>.<endpoint>` and
/// the path is `/`; for [`AddressingStyle::PathStyle`] the host is the bare
/// endpoint and the path is `/<bucket>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequestTarget {
    scheme: Scheme,
    bucket: String,
    endpoint_host: String,
    hostname: String,
    port: Option<u16>,
    path: String,
    style: AddressingStyle,
}

impl ResolvedRequestTarget {
    /// Request scheme, `http` or `https`.
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Bucket this target addresses.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Addressing style applied to this target.
    pub fn style(&self) -> AddressingStyle {
        self.style
    }

    /// Host name without port, bucket-qualified for virtual-hosted targets.
    ///
    /// This is the name DNS and TLS checks should use.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Port the request is sent to, falling back to the scheme default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| default_port(&self.scheme))
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of the `Host` header.
    ///
    /// Default ports are never included, non-default ports always are.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.hostname),
            None => self.hostname.clone(),
        }
    }

    /// Full url of the target.
    pub fn url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority(), self.path)
    }

    /// Endpoint url with the bucket removed from both host and path.
    ///
    /// Provider detection runs on this so bucket names never leak into it.
    pub fn endpoint(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.scheme, self.endpoint_host),
            None => format!("{}://{}", self.scheme, self.endpoint_host),
        }
    }
}

impl fmt::Display for ResolvedRequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

fn default_port(scheme: &Scheme) -> u16 {
    if scheme == &Scheme::HTTP {
        80
    } else {
        443
    }
}

/// Resolve an endpoint (or provider shortcut) into the bucket-root target.
///
/// - Shortcuts get `<bucket>` and `<region>` substituted into their template.
/// - A missing scheme becomes `http://` when `insecure` is set, `https://` otherwise.
/// - Default ports are dropped before the style is applied.
/// - The bucket is removed from wherever the endpoint already carries it
///   (a leading host label or a leading path segment) and then placed
///   according to `style`, so resolving a resolved target again is a no-op.
/// - A leading host label only counts as the bucket when a dotted name is
///   left behind, so `minio.local` stays intact for bucket `minio`.
/// - IP literal hosts are never stripped. A bucket named like the first
///   octet of an IP endpoint therefore keeps the IP whole, and
///   virtual-hosted addressing prefixes the bucket label to it.
///
/// Bucket names are limited to ASCII letters, digits, `.`, `-` and `_`,
/// without leading, trailing or doubled dots.
pub fn resolve(
    endpoint: &str,
    bucket: &str,
    region: &str,
    style: AddressingStyle,
    insecure: bool,
) -> Result<ResolvedRequestTarget> {
    if bucket.is_empty() {
        return Err(Error::config_invalid("bucket is required"));
    }
    if !is_valid_bucket(bucket) {
        return Err(Error::config_invalid(format!("invalid bucket name: {bucket}")));
    }

    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(Error::config_invalid("endpoint is required"));
    }

    let expanded = match shortcut(endpoint) {
        Some(s) => {
            let v = s.expand(bucket, region);
            debug!("expanded shortcut {} into {v}", s.name);
            v
        }
        None => endpoint.to_string(),
    };

    let url = if expanded.contains("://") {
        expanded
    } else if insecure {
        format!("http://{expanded}")
    } else {
        format!("https://{expanded}")
    };

    let uri: Uri = url
        .parse()
        .map_err(|e| Error::config_invalid(format!("invalid endpoint url: {url}")).with_source(e))?;

    let scheme = match uri.scheme_str() {
        Some(s) if s.eq_ignore_ascii_case("https") => Scheme::HTTPS,
        Some(s) if s.eq_ignore_ascii_case("http") => Scheme::HTTP,
        _ => {
            return Err(Error::config_invalid(format!(
                "invalid endpoint url: {url}: scheme must be http or https"
            )))
        }
    };

    let authority = uri
        .authority()
        .ok_or_else(|| Error::config_invalid(format!("invalid endpoint url: {url}: missing host")))?;
    let port = authority
        .port_u16()
        .filter(|port| *port != default_port(&scheme));

    let host = strip_bucket_label(authority.host(), bucket);
    if host.is_empty() {
        return Err(Error::config_invalid(format!(
            "invalid endpoint url: {url}: missing host"
        )));
    }

    let rest = strip_bucket_segment(uri.path(), bucket);
    if !rest.is_empty() && rest != "/" {
        debug!("endpoint path {rest} is ignored for bucket-root requests");
    }

    let (hostname, path) = match style {
        AddressingStyle::VirtualHosted => (format!("{bucket}.{host}"), "/".to_string()),
        AddressingStyle::PathStyle => (host.to_string(), format!("/{bucket}")),
    };

    let target = ResolvedRequestTarget {
        scheme,
        bucket: bucket.to_string(),
        endpoint_host: host.to_string(),
        hostname,
        port,
        path,
        style,
    };
    debug!("resolved {style} target: {target}");
    Ok(target)
}

/// Remove leading `<bucket>.` labels from a host name.
///
/// IP literals never carry a bucket label, and a label is only removed when
/// the rest is still a dotted name (or nothing at all).
fn strip_bucket_label<'a>(mut host: &'a str, bucket: &str) -> &'a str {
    loop {
        if is_ip_literal(host) {
            return host;
        }
        match host
            .strip_prefix(bucket)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            Some(rest) if rest.is_empty() || rest.contains('.') => host = rest,
            _ => return host,
        }
    }
}

/// Remove a leading `/<bucket>` segment from a path.
fn strip_bucket_segment<'a>(path: &'a str, bucket: &str) -> &'a str {
    match path.strip_prefix('/').and_then(|p| p.strip_prefix(bucket)) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

fn is_valid_bucket(bucket: &str) -> bool {
    bucket
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
        && !bucket.starts_with('.')
        && !bucket.ends_with('.')
        && !bucket.contains("..")
}

fn is_ip_literal(host: &str) -> bool {
    host.starts_with('[') || host.parse::<IpAddr>().is_ok()
}
