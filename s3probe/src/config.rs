use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;
use std::time::Duration;

use log::{debug, LevelFilter};
use s3probe_core::utils::Redact;
use s3probe_core::{
    detect, lookup, resolve, shortcut, warnings, AddressingStyle, Context, Credential, Error,
    ProviderProfile, RequestedFeatures, ResolvedRequestTarget, Result, SignRequest,
    TransportOptions, Warning,
};

/// Env value for the endpoint url or shortcut.
pub const S3PROBE_ENDPOINT: &str = "S3PROBE_ENDPOINT";
/// Env value for the provider shortcut.
pub const S3PROBE_PROVIDER: &str = "S3PROBE_PROVIDER";
/// Env value for the bucket.
pub const S3PROBE_BUCKET: &str = "S3PROBE_BUCKET";
/// Env value for the region.
pub const S3PROBE_REGION: &str = "S3PROBE_REGION";
/// Env value for the access key id.
pub const S3PROBE_ACCESS_KEY: &str = "S3PROBE_ACCESS_KEY";
/// Env value for the secret access key.
pub const S3PROBE_SECRET_KEY: &str = "S3PROBE_SECRET_KEY";
/// Env value for the auth type, `sigv4` or `sigv2`.
pub const S3PROBE_AUTH_TYPE: &str = "S3PROBE_AUTH_TYPE";
/// Env value for the connectivity check port.
pub const S3PROBE_PORT: &str = "S3PROBE_PORT";
/// Env value to use plain http and skip TLS verification.
pub const S3PROBE_INSECURE: &str = "S3PROBE_INSECURE";
/// Env value for the timeout in seconds.
pub const S3PROBE_TIMEOUT: &str = "S3PROBE_TIMEOUT";
/// Env value to toggle redirect following.
pub const S3PROBE_FOLLOW_REDIRECTS: &str = "S3PROBE_FOLLOW_REDIRECTS";
/// Env value for the maximum redirects.
pub const S3PROBE_MAX_REDIRECTS: &str = "S3PROBE_MAX_REDIRECTS";
/// Env value to request virtual-hosted addressing.
pub const S3PROBE_VIRTUAL_HOSTED: &str = "S3PROBE_VIRTUAL_HOSTED";
/// Env value to request path-style addressing.
pub const S3PROBE_PATH_STYLE: &str = "S3PROBE_PATH_STYLE";
/// Env value to request a bucket policy check.
pub const S3PROBE_CHECK_POLICY: &str = "S3PROBE_CHECK_POLICY";
/// Env value to request an ACL check.
pub const S3PROBE_CHECK_ACL: &str = "S3PROBE_CHECK_ACL";
/// Env value for verbose logging.
pub const S3PROBE_VERBOSE: &str = "S3PROBE_VERBOSE";

/// Signing protocol used for the check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// AWS Signature Version 4.
    #[default]
    SigV4,
    /// Legacy SigV2-style query signing.
    SigV2,
}

impl AuthType {
    /// Upper case label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::SigV4 => "SIGV4",
            AuthType::SigV2 => "SIGV2",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sigv4" => Ok(AuthType::SigV4),
            "sigv2" => Ok(AuthType::SigV2),
            _ => Err(Error::config_invalid(
                "invalid auth-type: must be 'sigv4' or 'sigv2'",
            )),
        }
    }
}

/// Config for a bucket check.
///
/// Numeric fields are kept signed so out of range input can be reported by
/// [`Config::validate`] instead of failing to parse.
#[derive(Clone)]
pub struct Config {
    /// `endpoint` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PROBE_ENDPOINT`]
    ///
    /// A provider shortcut name is accepted here too.
    pub endpoint: Option<String>,
    /// `provider` shortcut, used when no endpoint is given.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PROBE_PROVIDER`]
    pub provider: Option<String>,
    /// `bucket` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PROBE_BUCKET`]
    pub bucket: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - env value: [`S3PROBE_REGION`]
    /// - default to `us-east-1`
    pub region: String,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PROBE_ACCESS_KEY`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PROBE_SECRET_KEY`]
    pub secret_access_key: Option<String>,
    /// `auth_type`, `sigv4` (default) or `sigv2`, case-insensitive.
    pub auth_type: String,
    /// Port used by connectivity checks, `0` means derive from the endpoint.
    pub port: i64,
    /// Use `http://` for scheme-less endpoints and skip TLS verification.
    pub insecure: bool,
    /// Request timeout in seconds, default to 30.
    pub timeout: i64,
    /// Follow redirects, default to true.
    pub follow_redirects: bool,
    /// Maximum redirects to follow, default to 10.
    pub max_redirects: i64,
    /// Explicitly request virtual-hosted addressing.
    pub virtual_hosted: bool,
    /// Explicitly request path-style addressing.
    pub path_style: bool,
    /// The caller intends to check the bucket policy.
    pub check_policy: bool,
    /// The caller intends to check the bucket ACL.
    pub check_acl: bool,
    /// Verbose logging.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            provider: None,
            bucket: None,
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            auth_type: "sigv4".to_string(),
            port: 0,
            insecure: false,
            timeout: 30,
            follow_redirects: true,
            max_redirects: 10,
            virtual_hosted: false,
            path_style: false,
            check_policy: false,
            check_acl: false,
            verbose: false,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("provider", &self.provider)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("auth_type", &self.auth_type)
            .field("port", &self.port)
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .field("follow_redirects", &self.follow_redirects)
            .field("max_redirects", &self.max_redirects)
            .field("virtual_hosted", &self.virtual_hosted)
            .field("path_style", &self.path_style)
            .field("check_policy", &self.check_policy)
            .field("check_acl", &self.check_acl)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Optional fields already set are kept. Other fields are overwritten when
    /// the variable is present.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if self.endpoint.is_none() {
            self.endpoint = ctx.env_var(S3PROBE_ENDPOINT);
        }
        if self.provider.is_none() {
            self.provider = ctx.env_var(S3PROBE_PROVIDER);
        }
        if self.bucket.is_none() {
            self.bucket = ctx.env_var(S3PROBE_BUCKET);
        }
        if let Some(v) = ctx.env_var(S3PROBE_REGION) {
            self.region = v;
        }
        if self.access_key_id.is_none() {
            self.access_key_id = ctx.env_var(S3PROBE_ACCESS_KEY);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = ctx.env_var(S3PROBE_SECRET_KEY);
        }
        if let Some(v) = ctx.env_var(S3PROBE_AUTH_TYPE) {
            self.auth_type = v;
        }
        if let Some(v) = ctx.env_var(S3PROBE_PORT) {
            self.port = parse_int(S3PROBE_PORT, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_INSECURE) {
            self.insecure = parse_bool(S3PROBE_INSECURE, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_TIMEOUT) {
            self.timeout = parse_int(S3PROBE_TIMEOUT, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_FOLLOW_REDIRECTS) {
            self.follow_redirects = parse_bool(S3PROBE_FOLLOW_REDIRECTS, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_MAX_REDIRECTS) {
            self.max_redirects = parse_int(S3PROBE_MAX_REDIRECTS, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_VIRTUAL_HOSTED) {
            self.virtual_hosted = parse_bool(S3PROBE_VIRTUAL_HOSTED, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_PATH_STYLE) {
            self.path_style = parse_bool(S3PROBE_PATH_STYLE, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_CHECK_POLICY) {
            self.check_policy = parse_bool(S3PROBE_CHECK_POLICY, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_CHECK_ACL) {
            self.check_acl = parse_bool(S3PROBE_CHECK_ACL, &v)?;
        }
        if let Some(v) = ctx.env_var(S3PROBE_VERBOSE) {
            self.verbose = parse_bool(S3PROBE_VERBOSE, &v)?;
        }

        Ok(self)
    }

    /// Validate the config and resolve everything a check needs.
    ///
    /// The config itself is left untouched. Provider warnings never fail
    /// validation, they are returned next to the resolved config.
    pub fn validate(&self) -> Result<(ResolvedConfig, Vec<Warning>)> {
        let endpoint = match (non_empty(&self.endpoint), non_empty(&self.provider)) {
            (Some(endpoint), _) => endpoint,
            (None, Some(provider)) => {
                if shortcut(provider).is_none() {
                    return Err(Error::config_invalid(format!(
                        "unknown provider: {provider}"
                    )));
                }
                provider
            }
            (None, None) => {
                return Err(Error::config_invalid("endpoint or provider is required"))
            }
        };
        let bucket =
            non_empty(&self.bucket).ok_or_else(|| Error::config_invalid("bucket is required"))?;

        let credential = Credential::new(
            self.access_key_id.clone().unwrap_or_default(),
            self.secret_access_key.clone().unwrap_or_default(),
        );
        credential.validate()?;

        let auth_type = AuthType::from_str(&self.auth_type)?;

        if !(0..=65535).contains(&self.port) {
            return Err(Error::config_invalid(
                "invalid port: must be between 0 and 65535 (0 = auto-detect)",
            ));
        }
        if self.timeout < 1 {
            return Err(Error::config_invalid(
                "invalid timeout: must be greater than 0",
            ));
        }
        if self.max_redirects < 0 {
            return Err(Error::config_invalid(
                "invalid max-redirects: must be 0 or greater",
            ));
        }

        let style = match (self.virtual_hosted, self.path_style) {
            (true, true) => {
                return Err(Error::config_invalid(
                    "virtual-hosted and path-style addressing are mutually exclusive",
                ))
            }
            (_, true) => AddressingStyle::PathStyle,
            _ => AddressingStyle::VirtualHosted,
        };

        let target = resolve(endpoint, bucket, &self.region, style, self.insecure)?;
        let provider = match shortcut(endpoint) {
            Some(s) => lookup(s.provider),
            None => lookup(detect(&target.endpoint())),
        };
        debug!("resolved target {target} for provider {}", provider.id);

        let features = RequestedFeatures {
            policy_check: self.check_policy,
            acl_check: self.check_acl,
        };
        let warnings = warnings(style, features, provider);

        let resolved = ResolvedConfig {
            port: if self.port == 0 {
                target.port()
            } else {
                self.port as u16
            },
            target,
            credential,
            auth_type,
            region: self.region.clone(),
            provider,
            transport: TransportOptions {
                insecure: self.insecure,
                timeout: Duration::from_secs(self.timeout as u64),
                follow_redirects: self.follow_redirects,
                max_redirects: self.max_redirects as usize,
            },
            features,
            verbose: self.verbose,
        };

        Ok((resolved, warnings))
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_int(key: &str, v: &str) -> Result<i64> {
    v.trim().parse().map_err(|e| {
        Error::config_invalid(format!("{key} must be an integer, got {v:?}")).with_source(e)
    })
}

fn parse_bool(key: &str, v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::config_invalid(format!(
            "{key} must be a boolean, got {v:?}"
        ))),
    }
}

/// Validated configuration, ready to build and sign check requests.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Bucket-root target of the check.
    pub target: ResolvedRequestTarget,
    /// Validated credential.
    pub credential: Credential,
    /// Signing protocol.
    pub auth_type: AuthType,
    /// Signing region.
    pub region: String,
    /// Profile of the provider detected from the target.
    pub provider: &'static ProviderProfile,
    /// Port used by connectivity checks.
    pub port: u16,
    /// Transport settings.
    pub transport: TransportOptions,
    /// Features the caller intends to check.
    pub features: RequestedFeatures,
    /// Verbose logging.
    pub verbose: bool,
}

impl ResolvedConfig {
    /// Log level requested by the config, `Debug` when verbose.
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Signer for the configured auth type.
    pub fn signer(&self) -> Box<dyn SignRequest> {
        match self.auth_type {
            AuthType::SigV4 => Box::new(s3probe_aws_v4::RequestSigner::new(&self.region)),
            AuthType::SigV2 => Box::new(s3probe_aws_v2::RequestSigner::new(
                self.target.bucket(),
                self.target.style(),
            )),
        }
    }
}
