//! Resolve, sign and check S3-compatible bucket requests.
//!
//! `s3probe` ties the pieces together: a [`Config`] is validated into a
//! [`ResolvedConfig`] plus provider warnings, and a [`BucketCheck`] sends a
//! signed `HEAD` to the bucket root and reports what happened.
//!
//! ```no_run
//! use s3probe::{default_context, BucketCheck, Config};
//!
//! # async fn run() -> s3probe::Result<()> {
//! let ctx = default_context(&Default::default())?;
//! let (resolved, warnings) = Config::default().from_env(&ctx)?.validate()?;
//! for w in &warnings {
//!     eprintln!("{w}");
//! }
//!
//! let ctx = default_context(&resolved.transport)?;
//! let report = BucketCheck::new(ctx, resolved).run().await;
//! println!("{report:?}");
//! # Ok(())
//! # }
//! ```

pub use s3probe_core::*;

/// AWS SigV4 signer.
pub mod aws_v4 {
    pub use s3probe_aws_v4::*;
}

/// SigV2-style query signer.
pub mod aws_v2 {
    pub use s3probe_aws_v2::*;
}

mod config;
pub use config::*;

mod check;
pub use check::{AuthResult, BucketCheck, CheckReport, CheckStatus, CHECK_NAME, S3PROBE_USER_AGENT};

pub mod response;

#[cfg(feature = "reqwest")]
pub use s3probe_http_send_reqwest::ReqwestHttpSend;

/// Context backed by reqwest and the process environment.
#[cfg(feature = "reqwest")]
pub fn default_context(opts: &TransportOptions) -> Result<Context> {
    Ok(Context::new()
        .with_http_send(ReqwestHttpSend::from_options(opts)?)
        .with_env(OsEnv))
}
