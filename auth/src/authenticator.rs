use std::fmt::Display;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns its secrets: the token signing key, the password salt and the token
/// lifetime are injected once and never looked up again.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Instant after which the token no longer verifies
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    /// * `password_salt` - Server-wide salt for password digests
    /// * `token_ttl` - Validity window of issued tokens
    pub fn new(token_secret: &[u8], password_salt: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(password_salt),
            token_codec: TokenCodec::new(token_secret),
            token_ttl,
        }
    }

    /// Lifetime applied to every issued token.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored digest without issuing a token.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn verify_password(
        &self,
        password: &str,
        stored_digest: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_digest)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_digest` - Stored password digest
    /// * `subject` - Identity the token is bound to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `TokenError` - Token generation failed
    pub fn authenticate<S: Display>(
        &self,
        password: &str,
        stored_digest: &str,
        subject: &S,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_digest)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, Utc::now())?)
    }

    /// Issue a token without password verification.
    ///
    /// Used right after sign-up, when the credential was just created
    /// from the caller's own password.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token<S: Display>(
        &self,
        subject: &S,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthenticationResult, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| TokenError::SigningFailed("token expiry out of range".to_string()))?;
        let access_token = self.token_codec.sign(subject, issued_at, self.token_ttl)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged or expired
    pub fn validate_token<S: FromStr>(&self, token: &str) -> Result<S, TokenError> {
        self.token_codec.verify(token)
    }
}
