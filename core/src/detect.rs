//! Infer the provider behind an endpoint.

use crate::provider::CUSTOM_PROVIDER;

/// Ordered `(needle, provider id)` rules, first match wins.
///
/// Domain suffixes come before bare keywords so that a hosted provider
/// is never shadowed by a keyword that happens to appear in its hostname.
static RULES: &[(&str, &str)] = &[
    ("amazonaws.com", "aws"),
    ("wasabisys.com", "wasabi"),
    ("backblazeb2.com", "b2"),
    ("digitaloceanspaces.com", "do"),
    ("objectstorage.cloud.ibm.com", "ibm"),
    ("cloud-object-storage.appdomain.cloud", "ibm"),
    ("r2.cloudflarestorage.com", "cloudflare"),
    ("your-objectstorage.com", "hetzner"),
    ("cloudflare", "cloudflare"),
    ("hetzner", "hetzner"),
    ("storagegrid", "netapp"),
    ("netapp", "netapp"),
    ("ecstestdrive", "dell"),
    ("dell", "dell"),
    ("radosgw", "ceph"),
    ("ceph", "ceph"),
    ("minio", "minio"),
];

/// Detect the provider id for an endpoint.
///
/// Matching is a case-insensitive substring search. Endpoints that match
/// no rule are reported as [`CUSTOM_PROVIDER`].
pub fn detect(endpoint: &str) -> &'static str {
    let endpoint = endpoint.to_ascii_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| endpoint.contains(needle))
        .map(|(_, id)| *id)
        .unwrap_or(CUSTOM_PROVIDER)
}
