use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::credential::errors::CredentialIdError;
use crate::credential::errors::EmailError;
use crate::credential::errors::NameError;
use crate::credential::errors::PasswordPolicyError;

/// Credential aggregate entity.
///
/// A registered account. A disabled credential never authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub name: CredentialName,
    pub email: EmailAddress,
    pub password_digest: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(pub i64);

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CredentialId {
    type Err = CredentialIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(CredentialId)
            .map_err(|e| CredentialIdError::InvalidFormat(e.to_string()))
    }
}

/// Display name value type
///
/// Between 1 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialName(String);

impl CredentialName {
    const MIN_LENGTH: usize = 1;
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `TooShort` - Name is empty
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - Email longer than 255 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw password as submitted by a caller.
///
/// Only its length is constrained; the value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const SIGN_UP_MAX_LENGTH: usize = 64;
    const SIGN_IN_MAX_LENGTH: usize = 255;

    /// Password chosen at sign-up, at most 64 characters.
    pub fn for_sign_up(password: String) -> Result<Self, PasswordPolicyError> {
        Self::bounded(password, Self::SIGN_UP_MAX_LENGTH)
    }

    /// Password presented at sign-in, at most 255 characters.
    pub fn for_sign_in(password: String) -> Result<Self, PasswordPolicyError> {
        Self::bounded(password, Self::SIGN_IN_MAX_LENGTH)
    }

    fn bounded(password: String, max: usize) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length > max {
            Err(PasswordPolicyError::TooLong {
                max,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([redacted])")
    }
}

/// Credential row to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub name: CredentialName,
    pub email: EmailAddress,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Command to register a new credential with validated fields
#[derive(Debug)]
pub struct SignUpCommand {
    pub name: CredentialName,
    pub email: EmailAddress,
    pub password: Password,
}

impl SignUpCommand {
    pub fn new(name: CredentialName, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to authenticate with email and password
#[derive(Debug)]
pub struct SignInCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl SignInCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Issued token together with the credential it is bound to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub credential: Credential,
}
