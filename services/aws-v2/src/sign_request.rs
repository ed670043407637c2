use std::fmt::Write;

use http::header::DATE;
use http::HeaderValue;
use log::debug;
use percent_encoding::utf8_percent_encode;

use super::constants::*;
use s3probe_core::hash::hex_hmac_sha256;
use s3probe_core::time::{format_http_date, DateTime};
use s3probe_core::{AddressingStyle, Credential, Result, SignRequest, SigningRequest};

/// RequestSigner that implement AWS SigV2-style query authentication.
///
/// - [Signing and authenticating REST requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)
///
/// # Note
///
/// The signature uses HMAC-SHA256 and is hex encoded. Classic SigV2 is
/// HMAC-SHA1 + base64; the gateways this targets accept the SHA-256 variant.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    bucket: String,
    style: AddressingStyle,
}

impl RequestSigner {
    /// Create a signer for the bucket addressed with `style`.
    pub fn new(bucket: &str, style: AddressingStyle) -> Self {
        Self {
            bucket: bucket.to_string(),
            style,
        }
    }
}

impl SignRequest for RequestSigner {
    fn sign_request(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        now: DateTime,
    ) -> Result<()> {
        let date = format_http_date(now);
        req.headers.insert(DATE, HeaderValue::try_from(date.as_str())?);

        let string_to_sign = string_to_sign(req, &date, &self.bucket, self.style)?;
        let signature = hex_hmac_sha256(
            cred.secret_access_key.as_bytes(),
            string_to_sign.as_bytes(),
        );

        let expires = now.timestamp() + EXPIRES_IN;
        req.query_push(AWS_ACCESS_KEY_ID, encode(&cred.access_key_id));
        req.query_push(SIGNATURE, encode(&signature));
        req.query_push(EXPIRES, expires.to_string());

        Ok(())
    }
}

fn encode(v: &str) -> String {
    utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string()
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// "\n" +
/// "\n" +
/// Date + "\n" +
/// CanonicalizedResource;
/// ```
///
/// Content-MD5 and Content-Type are always empty for bucket checks.
fn string_to_sign(
    ctx: &SigningRequest,
    date: &str,
    bucket: &str,
    style: AddressingStyle,
) -> Result<String> {
    let mut s = String::new();
    writeln!(&mut s, "{}", ctx.method.as_str())?;
    writeln!(&mut s)?;
    writeln!(&mut s)?;
    writeln!(&mut s, "{date}")?;
    write!(&mut s, "{}", canonicalize_resource(&ctx.path, bucket, style))?;

    debug!("string to sign: {}", &s);
    Ok(s)
}

/// The resource always names the bucket, whichever style put it on the wire.
fn canonicalize_resource(path: &str, bucket: &str, style: AddressingStyle) -> String {
    match style {
        AddressingStyle::PathStyle if path.is_empty() => "/".to_string(),
        AddressingStyle::PathStyle => path.to_string(),
        AddressingStyle::VirtualHosted if path.is_empty() || path == "/" => format!("/{bucket}"),
        AddressingStyle::VirtualHosted => format!("/{bucket}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use http::Method;
    use pretty_assertions::assert_eq;
    use s3probe_core::resolve;
    use s3probe_core::time::parse_rfc3339;
    use sha2::Sha256;
    use test_case::test_case;

    fn request(endpoint: &str, bucket: &str, style: AddressingStyle) -> SigningRequest {
        let target = resolve(endpoint, bucket, "us-east-1", style, false).unwrap();
        SigningRequest::from_target(Method::HEAD, &target).unwrap()
    }

    #[test_case("/", "b", AddressingStyle::VirtualHosted, "/b"; "virtual hosted root")]
    #[test_case("", "b", AddressingStyle::VirtualHosted, "/b"; "virtual hosted empty")]
    #[test_case("/key", "b", AddressingStyle::VirtualHosted, "/b/key"; "virtual hosted key")]
    #[test_case("/b", "b", AddressingStyle::PathStyle, "/b"; "path style")]
    #[test_case("", "b", AddressingStyle::PathStyle, "/"; "path style empty")]
    fn test_canonicalize_resource(path: &str, bucket: &str, style: AddressingStyle, expected: &str) {
        assert_eq!(canonicalize_resource(path, bucket, style), expected);
    }

    #[test]
    fn test_resource_converges_across_styles() -> Result<()> {
        let vh = request("s3.example.com", "b", AddressingStyle::VirtualHosted);
        let ps = request("s3.example.com", "b", AddressingStyle::PathStyle);

        let date = "Mon, 01 Jan 2024 00:00:00 GMT";
        let vh = string_to_sign(&vh, date, "b", AddressingStyle::VirtualHosted)?;
        let ps = string_to_sign(&ps, date, "b", AddressingStyle::PathStyle)?;

        assert_eq!(vh, "HEAD\n\n\nMon, 01 Jan 2024 00:00:00 GMT\n/b");
        assert_eq!(vh, ps);
        Ok(())
    }

    #[test]
    fn test_sign_request() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let now = parse_rfc3339("2024-01-01T00:00:00Z")?;
        let cred = Credential::new("AK/ID+1", "secret");
        let mut req = request("s3.example.com", "b", AddressingStyle::VirtualHosted);

        RequestSigner::new("b", AddressingStyle::VirtualHosted).sign_request(&mut req, &cred, now)?;

        assert_eq!(req.headers[DATE], "Mon, 01 Jan 2024 00:00:00 GMT");
        assert!(req.headers.get(http::header::AUTHORIZATION).is_none());

        let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
        mac.update(b"HEAD\n\n\nMon, 01 Jan 2024 00:00:00 GMT\n/b");
        let signature = hex::encode(mac.finalize().into_bytes());

        assert_eq!(
            req.query,
            vec![
                ("AWSAccessKeyId".to_string(), "AK%2FID%2B1".to_string()),
                ("Signature".to_string(), signature),
                ("Expires".to_string(), "1704068100".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_query_appended_after_existing() -> Result<()> {
        let now = parse_rfc3339("2024-01-01T00:00:00Z")?;
        let cred = Credential::new("ak", "sk");
        let mut req = request("http://localhost:9000", "b", AddressingStyle::PathStyle);
        req.query_push("location", "");

        RequestSigner::new("b", AddressingStyle::PathStyle).sign_request(&mut req, &cred, now)?;

        let url = req.url();
        assert!(
            url.starts_with("http://localhost:9000/b?location&AWSAccessKeyId=ak&Signature="),
            "{url}"
        );
        assert!(url.ends_with("&Expires=1704068100"), "{url}");
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<()> {
        let now = parse_rfc3339("2024-01-01T00:00:00Z")?;
        let cred = Credential::new("ak", "sk");
        let signer = RequestSigner::new("b", AddressingStyle::PathStyle);

        let mut first = request("s3.example.com", "b", AddressingStyle::PathStyle);
        let mut second = request("s3.example.com", "b", AddressingStyle::PathStyle);
        signer.sign_request(&mut first, &cred, now)?;
        signer.sign_request(&mut second, &cred, now)?;

        assert_eq!(first.url(), second.url());
        Ok(())
    }
}
