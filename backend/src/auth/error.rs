//! Authentication error taxonomy

use thiserror::Error;

/// Typed authentication failures
///
/// Credential failures (`UnknownUser`, `BadPassword`) and token failures
/// (`Malformed`, `BadSignature`, `Expired`) are kept distinct internally
/// so callers can branch on them, but the HTTP layer collapses the
/// credential pair into one generic response so clients cannot probe
/// which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential stored under the supplied username
    #[error("unknown user")]
    UnknownUser,

    /// Supplied password does not match the stored hash
    #[error("password mismatch")]
    BadPassword,

    /// Token cannot be parsed into claims plus signature
    #[error("malformed token")]
    Malformed,

    /// Token signature does not verify under the configured key
    #[error("bad token signature")]
    BadSignature,

    /// Token claims are past their expiry
    #[error("expired token")]
    Expired,
}
