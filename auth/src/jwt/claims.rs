use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Identity claims carried by an access token.
///
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (credential identifier)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject valid for `ttl` from `issued_at`.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry falls outside the representable range
    pub fn new(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::SigningFailed("token expiry out of range".to_string()))?;

        Ok(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Expiry instant, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is only live while its expiry is strictly in the future.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::new(42, issued_at, Duration::days(30)).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let issued_at = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = Claims::new(1, issued_at, Duration::seconds(10)).unwrap();

        assert!(!claims.is_expired(DateTime::from_timestamp(1009, 0).unwrap()));
        assert!(claims.is_expired(DateTime::from_timestamp(1010, 0).unwrap())); // Exactly at expiration
        assert!(claims.is_expired(DateTime::from_timestamp(1011, 0).unwrap()));
    }

    #[test]
    fn test_expires_at() {
        let issued_at = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = Claims::new(1, issued_at, Duration::seconds(60)).unwrap();

        assert_eq!(
            claims.expires_at(),
            Some(DateTime::from_timestamp(1060, 0).unwrap())
        );
    }

    #[test]
    fn test_new_claims_expiry_out_of_range() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let result = Claims::new(1, issued_at, Duration::hours(10_000_000_000));

        assert!(matches!(result, Err(TokenError::SigningFailed(_))));
    }
}
