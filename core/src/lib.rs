//! Core components for resolving and signing S3 bucket requests.
//!
//! This crate provides the foundational types shared by the s3probe signers
//! and the bucket check pipeline.
//!
//! ## Overview
//!
//! - **Providers**: a static capability registry, endpoint shortcuts and a
//!   detector that maps an endpoint to a provider id.
//! - **Addressing**: [`resolve`] turns an endpoint and bucket into a
//!   [`ResolvedRequestTarget`] for either [`AddressingStyle`].
//! - **Warnings**: [`warnings`] explains which requested settings the
//!   detected provider is unlikely to honor.
//! - **Signing**: [`SigningRequest`] plus the [`SignRequest`] trait that the
//!   protocol crates implement.
//! - **Context**: the [`HttpSend`] transport and [`Env`] access.
//!
//! ## Example
//!
//! ```
//! use s3probe_core::{detect, lookup, resolve, warnings, AddressingStyle, RequestedFeatures};
//!
//! let target = resolve(
//!     "https://abc123.r2.cloudflarestorage.com",
//!     "my-bucket",
//!     "auto",
//!     AddressingStyle::PathStyle,
//!     false,
//! )?;
//! assert_eq!(target.url(), "https://abc123.r2.cloudflarestorage.com/my-bucket");
//!
//! let profile = lookup(detect(&target.url()));
//! let ws = warnings(AddressingStyle::PathStyle, RequestedFeatures::default(), profile);
//! assert_eq!(ws.len(), 1);
//! # Ok::<(), s3probe_core::Error>(())
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::Context;
mod transport;
pub use transport::{HttpSend, TransportOptions};
mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod credential;
pub use credential::Credential;

pub mod provider;
pub use provider::{lookup, shortcut, AclSupport, PolicySupport, ProviderProfile};
mod detect;
pub use detect::detect;
mod addressing;
pub use addressing::{resolve, AddressingStyle, ResolvedRequestTarget};
mod warning;
pub use warning::{join_warnings, warnings, RequestedFeatures, Warning, WarningLevel};

mod api;
pub use api::SignRequest;
mod request;
pub use request::SigningRequest;
