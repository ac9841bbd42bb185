use sha2::Digest;
use sha2::Sha256;

use super::errors::PasswordError;

/// Length of a hex encoded SHA-256 digest.
pub const DIGEST_HEX_LENGTH: usize = 64;

/// Salted SHA-256 password hasher.
///
/// The salt is a single server-wide secret injected at construction, so the
/// same password always yields the same digest under the same hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    /// Create a new password hasher bound to a server-wide salt.
    ///
    /// # Arguments
    /// * `salt` - Secret salt appended to every password before digesting
    ///
    /// # Returns
    /// PasswordHasher instance owning its copy of the salt
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Hash a plaintext password.
    ///
    /// Digests `password || salt` with SHA-256.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// 64 character lowercase hex digest
    ///
    /// # Errors
    /// * `HashingFailed` - Digest primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.salt.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Verify a password against a stored digest.
    ///
    /// The comparison runs over the whole digest regardless of where the
    /// first mismatch is.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored hex digest
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `HashingFailed` - Digest primitive failed
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        let candidate = self.hash(password)?;
        Ok(constant_time_eq(candidate.as_bytes(), digest.as_bytes()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new("pepper");
        let password = "my_secure_password";

        let digest = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &digest)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong_password", &digest)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = PasswordHasher::new("pepper");

        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let hasher = PasswordHasher::new("pepper");
        let digest = hasher.hash("secret").unwrap();

        assert_eq!(digest.len(), DIGEST_HEX_LENGTH);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_hash_matches_known_digest() {
        // sha256("secret" + "salt")
        let hasher = PasswordHasher::new("salt");
        let expected = {
            let mut h = Sha256::new();
            h.update(b"secretsalt");
            hex::encode(h.finalize())
        };

        assert_eq!(hasher.hash("secret").unwrap(), expected);
    }

    #[test]
    fn test_different_salts_produce_different_digests() {
        let a = PasswordHasher::new("salt-a").hash("secret").unwrap();
        let b = PasswordHasher::new("salt-b").hash("secret").unwrap();

        assert_ne!(a, b);
        assert!(!PasswordHasher::new("salt-b").verify("secret", &a).unwrap());
    }

    #[test]
    fn test_verify_rejects_truncated_digest() {
        let hasher = PasswordHasher::new("pepper");
        let digest = hasher.hash("secret").unwrap();

        assert!(!hasher.verify("secret", &digest[..32]).unwrap());
        assert!(!hasher.verify("secret", "").unwrap());
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hasher = PasswordHasher::new("pepper");
        let digest = hasher.hash("").unwrap();

        assert!(hasher.verify("", &digest).unwrap());
        assert!(!hasher.verify(" ", &digest).unwrap());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
