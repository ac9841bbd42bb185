//! Authentication utilities library
//!
//! Provides the credential primitives of the gateway:
//! - Salted SHA-256 password digests
//! - HS512 signed, time-bounded identity tokens
//! - Authentication coordination
//!
//! Secrets are injected at construction; nothing here reads the environment.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new("server-wide-salt");
//! let digest = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &digest).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_64_bytes_long_for_hs512_signing_the_tokens!!");
//! let token = codec.sign(&42_i64, Utc::now(), Duration::days(30)).unwrap();
//! let subject: i64 = codec.verify(&token).unwrap();
//! assert_eq!(subject, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_64_bytes_long_for_hs512_signing_the_tokens!!",
//!     "server-wide-salt",
//!     Duration::days(30),
//! );
//!
//! // Register: digest password
//! let digest = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &digest, &7_i64).unwrap();
//!
//! // Validate token
//! let subject: i64 = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
