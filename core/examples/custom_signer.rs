use http::header::AUTHORIZATION;
use http::{HeaderValue, Method};
use s3probe_core::hash::hex_hmac_sha256;
use s3probe_core::time::{format_iso8601, now, DateTime};
use s3probe_core::{
    resolve, AddressingStyle, Credential, Result, SignRequest, SigningRequest,
};

/// A gateway that accepts `HMAC <key>:<hex(hmac(secret, "<method> <host><path> <time>"))>`.
#[derive(Debug)]
struct GatewaySigner;

impl SignRequest for GatewaySigner {
    fn sign_request(
        &self,
        req: &mut SigningRequest,
        credential: &Credential,
        now: DateTime,
    ) -> Result<()> {
        let time = format_iso8601(now);
        let string_to_sign = format!("{} {}{} {time}", req.method, req.authority, req.path);
        let signature = hex_hmac_sha256(
            credential.secret_access_key.as_bytes(),
            string_to_sign.as_bytes(),
        );

        req.headers.insert("x-gateway-date", HeaderValue::try_from(time)?);
        let mut value = HeaderValue::try_from(format!(
            "HMAC {}:{signature}",
            credential.access_key_id
        ))?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

fn main() -> Result<()> {
    let target = resolve(
        "http://localhost:9000",
        "demo-bucket",
        "us-east-1",
        AddressingStyle::PathStyle,
        true,
    )?;

    let credential = Credential::new("demo-access-key", "demo-secret-key");
    credential.validate()?;

    let mut req = SigningRequest::from_target(Method::HEAD, &target)?;
    GatewaySigner.sign_request(&mut req, &credential, now())?;

    let req = req.into_request()?;
    println!("{} {}", req.method(), req.uri());
    for (name, value) in req.headers() {
        println!("  {name}: {value:?}");
    }
    Ok(())
}
