use crate::time::DateTime;
use crate::{Credential, Result, SigningRequest};
use std::fmt::Debug;

/// SignRequest is the trait implemented by every signing protocol.
///
/// Signing is a pure computation over the request, the credential and the
/// signing time. The time is always supplied by the caller: one captured
/// timestamp must feed both the request headers and the signature, so
/// implementations must never read the clock themselves.
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Sign the request in place.
    ///
    /// Implementations add headers and/or query parameters to `req`. Given a
    /// validated credential this never fails for well-formed targets; errors
    /// are only returned when a computed value cannot be carried by HTTP.
    fn sign_request(
        &self,
        req: &mut SigningRequest,
        credential: &Credential,
        now: DateTime,
    ) -> Result<()>;
}
