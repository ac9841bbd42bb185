use std::fmt::Display;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signs and verifies compact, time-bounded identity tokens.
///
/// Tokens are JWS compact serializations (`header.payload.signature`) signed
/// with HMAC-SHA512 under a server-held secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new token codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// TokenCodec instance configured with HS512
    ///
    /// # Security Notes
    /// - The secret should be at least 512 bits (64 bytes) for HS512
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
        }
    }

    /// Sign a token binding `subject` to an expiry of `issued_at + ttl`.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry out of range, or claims serialization or HMAC computation failed
    pub fn sign<S: Display>(
        &self,
        subject: &S,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, issued_at, ttl)?;
        self.encode(&claims)
    }

    /// Encode prepared claims into a token.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims serialization or HMAC computation failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token against the current clock and return its subject.
    ///
    /// # Errors
    /// * `MalformedToken` - Wrong structure, encoding or subject type
    /// * `BadSignature` - Signature does not verify under this secret
    /// * `Expired` - Signature verifies but expiry is not in the future
    pub fn verify<S: FromStr>(&self, token: &str) -> Result<S, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit instant and return its subject.
    pub fn verify_at<S: FromStr>(&self, token: &str, now: DateTime<Utc>) -> Result<S, TokenError> {
        let claims = self.verify_claims_at(token, now)?;

        claims
            .sub
            .parse::<S>()
            .map_err(|_| TokenError::MalformedToken("subject is not a valid identifier".to_string()))
    }

    /// Verify a token against an explicit instant and return all of its claims.
    ///
    /// The payload is only deserialized after the signature has verified.
    pub fn verify_claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below with a strict comparison and no leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::MalformedToken(e.to_string()),
            })?;

        if token_data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
