use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Query parameters carrying the signature.
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const SIGNATURE: &str = "Signature";
pub const EXPIRES: &str = "Expires";

/// Seconds a signed request stays valid.
pub const EXPIRES_IN: i64 = 15 * 60;

/// Query values are encoded with everything but the unreserved characters escaped.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
