//! AWS SigV4 signing for S3 bucket checks.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use s3probe_aws_v4::RequestSigner;
//! use s3probe_core::time::now;
//! use s3probe_core::{resolve, AddressingStyle, Credential, SignRequest, SigningRequest};
//!
//! let target = resolve("s3.amazonaws.com", "my-bucket", "us-east-1", AddressingStyle::VirtualHosted, false)?;
//! let mut req = SigningRequest::from_target(Method::HEAD, &target)?;
//! let cred = Credential::new("access_key_id", "secret_access_key");
//!
//! RequestSigner::new("us-east-1").sign_request(&mut req, &cred, now())?;
//! assert!(req.headers.contains_key(http::header::AUTHORIZATION));
//! # Ok::<(), s3probe_core::Error>(())
//! ```

mod constants;
pub use constants::{SIGNED_HEADERS, UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE};

mod sign_request;
pub use sign_request::RequestSigner;
