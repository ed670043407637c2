//! Capability warnings.
//!
//! Warnings never block a check. They explain why a requested addressing
//! style or feature is likely to fail against the detected provider.

use std::fmt;

use crate::provider::{AclSupport, PolicySupport, ProviderProfile};
use crate::AddressingStyle;

/// Optional checks the caller asked for on top of the bucket check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestedFeatures {
    /// Bucket policy inspection.
    pub policy_check: bool,
    /// Bucket ACL inspection.
    pub acl_check: bool,
}

/// Severity of a [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningLevel {
    /// The requested setting is expected to fail.
    Warning,
    /// The requested setting works today but is discouraged.
    Advisory,
}

/// A human readable capability warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Severity.
    pub level: WarningLevel,
    /// Message shown to the user.
    pub message: String,
}

impl Warning {
    fn warning(message: String) -> Self {
        Self {
            level: WarningLevel::Warning,
            message,
        }
    }

    fn advisory(message: String) -> Self {
        Self {
            level: WarningLevel::Advisory,
            message,
        }
    }

    /// Returns true if this warning predicts a failure.
    pub fn is_blocking(&self) -> bool {
        self.level == WarningLevel::Warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Cross-check the requested style and features against a provider profile.
///
/// Rules are evaluated independently and always emitted in the same order:
/// path-style support, path-style deprecation, policy support, ACL support.
pub fn warnings(
    style: AddressingStyle,
    features: RequestedFeatures,
    profile: &ProviderProfile,
) -> Vec<Warning> {
    let mut out = Vec::new();

    if style == AddressingStyle::PathStyle {
        if !profile.path_style_capable {
            out.push(Warning::warning(if profile.is_custom() {
                "Warning: --path-style addressing may not be supported by this provider. Try removing --path-style flag.".to_string()
            } else {
                format!(
                    "Warning: {} does not support path-style addressing. Remove --path-style to use virtual-hosted addressing.",
                    profile.name
                )
            }));
        } else if profile.path_style_deprecated {
            out.push(Warning::advisory(format!(
                "Advisory: {} has deprecated path-style addressing; prefer virtual-hosted addressing. {}",
                profile.name, profile.notes
            )));
        }
    }

    if features.policy_check && profile.policy_support != PolicySupport::Full {
        out.push(Warning::warning(if profile.is_custom() {
            "Warning: bucket policy support of this endpoint is unknown; policy check results may be inaccurate.".to_string()
        } else {
            format!(
                "Warning: {} bucket policy support is {}. {}",
                profile.name, profile.policy_support, profile.notes
            )
        }));
    }

    if features.acl_check && profile.acl_support != AclSupport::Full {
        out.push(Warning::warning(if profile.is_custom() {
            "Warning: ACL support of this endpoint is unknown; ACL check results may be inaccurate.".to_string()
        } else {
            format!(
                "Warning: {} ACL support is {}. {}",
                profile.name, profile.acl_support, profile.notes
            )
        }));
    }

    out
}

/// Join warnings into one block of text, one warning per line.
pub fn join_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| w.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::lookup;
    use pretty_assertions::assert_eq;

    const NO_FEATURES: RequestedFeatures = RequestedFeatures {
        policy_check: false,
        acl_check: false,
    };

    #[test]
    fn test_cloudflare_path_style() {
        let ws = warnings(AddressingStyle::PathStyle, NO_FEATURES, lookup("cloudflare"));
        assert_eq!(ws.len(), 1);
        assert!(ws[0].is_blocking());
        assert!(ws[0].message.contains("Cloudflare R2"));
        assert!(ws[0].message.contains("path-style"));
    }

    #[test]
    fn test_aws_path_style_is_advisory_only() {
        let ws = warnings(AddressingStyle::PathStyle, NO_FEATURES, lookup("aws"));
        assert_eq!(ws.len(), 1);
        assert_eq!(ws[0].level, WarningLevel::Advisory);
        assert_eq!(ws.iter().filter(|w| w.is_blocking()).count(), 0);
    }

    #[test]
    fn test_virtual_hosted_has_no_style_warnings() {
        for id in ["aws", "cloudflare", "custom"] {
            assert!(warnings(AddressingStyle::VirtualHosted, NO_FEATURES, lookup(id)).is_empty());
        }
    }

    #[test]
    fn test_custom_path_style_uses_generic_wording() {
        let ws = warnings(AddressingStyle::PathStyle, NO_FEATURES, lookup("custom"));
        assert_eq!(
            join_warnings(&ws),
            "Warning: --path-style addressing may not be supported by this provider. Try removing --path-style flag."
        );
    }

    #[test]
    fn test_policy_warning_wording() {
        let features = RequestedFeatures {
            policy_check: true,
            acl_check: false,
        };

        assert!(warnings(AddressingStyle::VirtualHosted, features, lookup("aws")).is_empty());

        let ws = warnings(AddressingStyle::VirtualHosted, features, lookup("ibm"));
        assert_eq!(ws.len(), 1);
        assert!(ws[0].message.starts_with("Warning: IBM Cloud Object Storage bucket policy support is IAM only."));

        let ws = warnings(AddressingStyle::VirtualHosted, features, lookup("custom"));
        assert_eq!(ws.len(), 1);
        assert!(ws[0].message.contains("unknown"));
    }

    #[test]
    fn test_order_is_stable() {
        let features = RequestedFeatures {
            policy_check: true,
            acl_check: true,
        };
        let ws = warnings(AddressingStyle::PathStyle, features, lookup("cloudflare"));
        assert_eq!(ws.len(), 3);
        assert!(ws[0].message.contains("path-style"));
        assert!(ws[1].message.contains("bucket policy support is none"));
        assert!(ws[2].message.contains("ACL support is none"));

        let joined = join_warnings(&ws);
        assert_eq!(joined.lines().count(), 3);
    }
}
