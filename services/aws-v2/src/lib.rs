//! AWS SigV2-style query signing for S3-compatible services.
//!
//! Some older S3-compatible gateways only understand the legacy V2 scheme.
//! The signature is carried in the query string (`AWSAccessKeyId`,
//! `Signature`, `Expires`) so no `Authorization` header is sent.

mod constants;
pub use constants::EXPIRES_IN;

mod sign_request;
pub use sign_request::RequestSigner;
