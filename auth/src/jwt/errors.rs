use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are kept distinct for diagnostics; callers are
/// expected to collapse them into a single unauthorized outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature does not verify")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
