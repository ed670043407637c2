//! Interpretation of check responses.

use http::header::SERVER;
use http::{HeaderMap, StatusCode};
use quick_xml::de;
use serde::Deserialize;

/// Longest body excerpt carried into an error summary.
const EXCERPT_LIMIT: usize = 256;

/// S3 `<Error>` document.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct S3ErrorResponse {
    /// Machine readable error code, e.g. `AccessDenied`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Resource the error refers to.
    pub resource: String,
    /// Request id assigned by the server.
    pub request_id: String,
}

impl S3ErrorResponse {
    /// Parse an S3 error document, `None` if the body is not one.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let body = std::str::from_utf8(body).ok()?;
        if !is_error_document(body) {
            return None;
        }
        de::from_str(body).ok()
    }
}

fn is_error_document(body: &str) -> bool {
    let mut root = body.trim_start();
    if root.starts_with("<?xml") {
        root = match root.find("?>") {
            Some(idx) => root[idx + 2..].trim_start(),
            None => return false,
        };
    }
    root.starts_with("<Error>") || root.starts_with("<Error ")
}

/// One line summary of a failed response.
///
/// `"Code: Message"` when the body is an S3 error document, otherwise
/// `"HTTP <status>: <body excerpt>"`.
pub fn error_summary(status: StatusCode, body: &[u8]) -> String {
    match S3ErrorResponse::parse(body) {
        Some(err) => format!("{}: {}", err.code, err.message),
        None => {
            let text = String::from_utf8_lossy(body);
            let excerpt: String = text.chars().take(EXCERPT_LIMIT).collect();
            format!("HTTP {}: {}", status.as_u16(), excerpt.trim())
        }
    }
}

/// Server product named by the `Server` response header.
pub fn detect_server(headers: &HeaderMap) -> &'static str {
    let server = headers
        .get(SERVER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if server.contains("AmazonS3") {
        "AWS S3"
    } else if server.contains("MinIO") {
        "MinIO"
    } else if server.contains("StorageGRID") {
        "NetApp StorageGRID"
    } else {
        "Unknown S3-Compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_parse_error_document() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>AccessDenied</Code>
  <Message>Access Denied</Message>
  <Resource>/examplebucket</Resource>
  <RequestId>4442587FB7D0A2F9</RequestId>
</Error>"#;

        let err = S3ErrorResponse::parse(body.as_bytes()).expect("must parse");
        assert_eq!(
            err,
            S3ErrorResponse {
                code: "AccessDenied".to_string(),
                message: "Access Denied".to_string(),
                resource: "/examplebucket".to_string(),
                request_id: "4442587FB7D0A2F9".to_string(),
            }
        );
    }

    #[test_case(b"", None; "empty")]
    #[test_case(b"Not Found", None; "plain text")]
    #[test_case(b"<html><body>denied</body></html>", None; "other root")]
    #[test_case(b"<Error><Code>NoSuchBucket</Code></Error>", Some("NoSuchBucket"); "partial fields")]
    fn test_parse_error_code(body: &[u8], code: Option<&str>) {
        assert_eq!(
            S3ErrorResponse::parse(body).map(|v| v.code),
            code.map(str::to_string)
        );
    }

    #[test]
    fn test_error_summary() {
        assert_eq!(
            error_summary(
                StatusCode::FORBIDDEN,
                b"<Error><Code>SignatureDoesNotMatch</Code><Message>The request signature we calculated does not match</Message></Error>"
            ),
            "SignatureDoesNotMatch: The request signature we calculated does not match"
        );
        assert_eq!(error_summary(StatusCode::FORBIDDEN, b""), "HTTP 403: ");
        assert_eq!(
            error_summary(StatusCode::BAD_GATEWAY, b"upstream down\n"),
            "HTTP 502: upstream down"
        );

        let long = "x".repeat(1000);
        assert_eq!(
            error_summary(StatusCode::BAD_REQUEST, long.as_bytes()).len(),
            "HTTP 400: ".len() + EXCERPT_LIMIT
        );
    }

    #[test_case(Some("AmazonS3"), "AWS S3")]
    #[test_case(Some("MinIO"), "MinIO")]
    #[test_case(Some("StorageGRID/11.7"), "NetApp StorageGRID")]
    #[test_case(Some("nginx"), "Unknown S3-Compatible")]
    #[test_case(None, "Unknown S3-Compatible")]
    fn test_detect_server(server: Option<&'static str>, expected: &str) {
        let mut headers = HeaderMap::new();
        if let Some(v) = server {
            headers.insert(SERVER, HeaderValue::from_static(v));
        }
        assert_eq!(detect_server(&headers), expected);
    }
}
