//! Static knowledge about S3-compatible providers.
//!
//! Two immutable tables live here:
//!
//! - the capability registry, keyed by provider id (see [`lookup`])
//! - the endpoint shortcuts accepted in place of an endpoint (see [`shortcut`])
//!
//! Neither table is ever mutated, so both are plain `static` slices.

use std::fmt;

/// Provider id used when an endpoint matches no known provider.
pub const CUSTOM_PROVIDER: &str = "custom";

/// How much of the S3 bucket policy API a provider implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySupport {
    /// Bucket policies are fully supported.
    Full,
    /// Access is governed by the provider's IAM only, bucket policies are not honored.
    IamOnly,
    /// A subset of policy actions and conditions is supported.
    Partial,
    /// Bucket policies are not supported.
    None,
    /// Support level is not known.
    Unknown,
}

impl fmt::Display for PolicySupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicySupport::Full => f.write_str("full"),
            PolicySupport::IamOnly => f.write_str("IAM only"),
            PolicySupport::Partial => f.write_str("partial"),
            PolicySupport::None => f.write_str("none"),
            PolicySupport::Unknown => f.write_str("unknown"),
        }
    }
}

/// How much of the S3 ACL API a provider implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclSupport {
    /// Object and bucket ACLs are fully supported.
    Full,
    /// Only canned ACLs are accepted and mapped onto the provider's own model.
    SyntheticOnly,
    /// ACLs are not supported.
    None,
    /// Support level is not known.
    Unknown,
}

impl fmt::Display for AclSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AclSupport::Full => f.write_str("full"),
            AclSupport::SyntheticOnly => f.write_str("canned ACLs only"),
            AclSupport::None => f.write_str("none"),
            AclSupport::Unknown => f.write_str("unknown"),
        }
    }
}

/// Capability profile of one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Provider id, e.g. `aws`.
    pub id: &'static str,
    /// Human readable name, e.g. `AWS S3`.
    pub name: &'static str,
    /// Bucket policy support.
    pub policy_support: PolicySupport,
    /// ACL support.
    pub acl_support: AclSupport,
    /// Whether `<bucket>.<endpoint>` addressing works.
    pub virtual_host_capable: bool,
    /// Whether `<endpoint>/<bucket>` addressing works.
    pub path_style_capable: bool,
    /// Whether path-style addressing still works but is deprecated.
    pub path_style_deprecated: bool,
    /// Free text notes.
    pub notes: &'static str,
}

impl ProviderProfile {
    /// Returns true if this is the fallback profile for unrecognized endpoints.
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_PROVIDER
    }
}

static CUSTOM_PROFILE: ProviderProfile = ProviderProfile {
    id: CUSTOM_PROVIDER,
    name: "Custom S3-compatible endpoint",
    policy_support: PolicySupport::Unknown,
    acl_support: AclSupport::Unknown,
    virtual_host_capable: false,
    path_style_capable: false,
    path_style_deprecated: false,
    notes: "Capabilities of unrecognized endpoints are not known.",
};

static PROFILES: &[ProviderProfile] = &[
    ProviderProfile {
        id: "aws",
        name: "AWS S3",
        policy_support: PolicySupport::Full,
        acl_support: AclSupport::Full,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: true,
        notes: "Path-style requests are deprecated; buckets created after September 30, 2020 only accept virtual-hosted requests.",
    },
    ProviderProfile {
        id: "wasabi",
        name: "Wasabi",
        policy_support: PolicySupport::Full,
        acl_support: AclSupport::Full,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Bucket policies follow the AWS policy language.",
    },
    ProviderProfile {
        id: "b2",
        name: "Backblaze B2",
        policy_support: PolicySupport::None,
        acl_support: AclSupport::SyntheticOnly,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Only the private and public-read canned ACLs are accepted; access is controlled by application keys.",
    },
    ProviderProfile {
        id: "do",
        name: "DigitalOcean Spaces",
        policy_support: PolicySupport::Partial,
        acl_support: AclSupport::SyntheticOnly,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Bucket policies are limited to a subset of actions; ACLs are limited to private and public-read.",
    },
    ProviderProfile {
        id: "ibm",
        name: "IBM Cloud Object Storage",
        policy_support: PolicySupport::IamOnly,
        acl_support: AclSupport::SyntheticOnly,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Access is managed through IBM Cloud IAM; S3 bucket policies are not evaluated.",
    },
    ProviderProfile {
        id: "minio",
        name: "MinIO",
        policy_support: PolicySupport::Full,
        acl_support: AclSupport::None,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Path-style is the default; virtual-hosted requires MINIO_DOMAIN. ACLs are not supported.",
    },
    ProviderProfile {
        id: "cloudflare",
        name: "Cloudflare R2",
        policy_support: PolicySupport::None,
        acl_support: AclSupport::None,
        virtual_host_capable: true,
        path_style_capable: false,
        path_style_deprecated: false,
        notes: "Access is controlled by API token scopes; bucket policies and ACLs are not implemented.",
    },
    ProviderProfile {
        id: "hetzner",
        name: "Hetzner Object Storage",
        policy_support: PolicySupport::Partial,
        acl_support: AclSupport::SyntheticOnly,
        virtual_host_capable: true,
        path_style_capable: false,
        path_style_deprecated: false,
        notes: "Only virtual-hosted addressing is served; bucket policies support a subset of conditions.",
    },
    ProviderProfile {
        id: "ceph",
        name: "Ceph RADOS Gateway",
        policy_support: PolicySupport::Full,
        acl_support: AclSupport::Full,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Virtual-hosted addressing requires rgw_dns_name to be configured.",
    },
    ProviderProfile {
        id: "dell",
        name: "Dell ECS",
        policy_support: PolicySupport::Full,
        acl_support: AclSupport::Full,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Virtual-hosted addressing requires a base URL to be registered on the cluster.",
    },
    ProviderProfile {
        id: "netapp",
        name: "NetApp StorageGRID",
        policy_support: PolicySupport::Full,
        acl_support: AclSupport::Full,
        virtual_host_capable: true,
        path_style_capable: true,
        path_style_deprecated: false,
        notes: "Virtual-hosted addressing requires endpoint domain names to be configured.",
    },
];

/// Look up the capability profile of a provider.
///
/// Unknown ids resolve to the `custom` profile, so this never fails.
pub fn lookup(provider_id: &str) -> &'static ProviderProfile {
    PROFILES
        .iter()
        .find(|p| p.id == provider_id)
        .unwrap_or(&CUSTOM_PROFILE)
}

/// All known provider profiles, excluding the `custom` fallback.
pub fn profiles() -> &'static [ProviderProfile] {
    PROFILES
}

/// An endpoint shortcut accepted in place of an endpoint url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderShortcut {
    /// Shortcut name, e.g. `aws-legacy`.
    pub name: &'static str,
    /// Provider id the shortcut belongs to.
    pub provider: &'static str,
    /// Endpoint template with `<bucket>` and `<region>` placeholders.
    pub template: &'static str,
    /// One line description.
    pub description: &'static str,
}

impl ProviderShortcut {
    /// Substitute `<bucket>` and `<region>` into the template.
    pub fn expand(&self, bucket: &str, region: &str) -> String {
        self.template
            .replace("<bucket>", bucket)
            .replace("<region>", region)
    }
}

static SHORTCUTS: &[ProviderShortcut] = &[
    ProviderShortcut {
        name: "aws",
        provider: "aws",
        template: "<bucket>.s3.<region>.amazonaws.com",
        description: "AWS S3 (virtual-hosted, default)",
    },
    ProviderShortcut {
        name: "aws-legacy",
        provider: "aws",
        template: "s3.<region>.amazonaws.com/<bucket>",
        description: "AWS S3 (path-style, legacy)",
    },
    ProviderShortcut {
        name: "wasabi",
        provider: "wasabi",
        template: "<bucket>.s3.<region>.wasabisys.com",
        description: "Wasabi (virtual-hosted)",
    },
    ProviderShortcut {
        name: "wasabi-legacy",
        provider: "wasabi",
        template: "s3.<region>.wasabisys.com/<bucket>",
        description: "Wasabi (path-style, legacy)",
    },
    ProviderShortcut {
        name: "b2",
        provider: "b2",
        template: "<bucket>.s3.<region>.backblazeb2.com",
        description: "Backblaze B2 (virtual-hosted)",
    },
    ProviderShortcut {
        name: "b2-legacy",
        provider: "b2",
        template: "s3.<region>.backblazeb2.com/<bucket>",
        description: "Backblaze B2 (path-style, legacy)",
    },
    ProviderShortcut {
        name: "ibm",
        provider: "ibm",
        template: "<bucket>.<region>.objectstorage.cloud.ibm.com",
        description: "IBM Cloud Object Storage (virtual-hosted)",
    },
    ProviderShortcut {
        name: "do",
        provider: "do",
        template: "<bucket>.<region>.digitaloceanspaces.com",
        description: "DigitalOcean Spaces (virtual-hosted)",
    },
];

/// Find an endpoint shortcut by its exact name.
pub fn shortcut(name: &str) -> Option<&'static ProviderShortcut> {
    SHORTCUTS.iter().find(|s| s.name == name)
}

/// All endpoint shortcuts sorted by name.
pub fn shortcuts() -> Vec<&'static ProviderShortcut> {
    let mut v: Vec<_> = SHORTCUTS.iter().collect();
    v.sort_by_key(|s| s.name);
    v
}
