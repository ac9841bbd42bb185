use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::EmailAddress;
use crate::credential::models::NewCredential;
use crate::credential::models::Session;
use crate::credential::models::SignInCommand;
use crate::credential::models::SignUpCommand;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new credential and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Session bound to the newly created credential
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Digest` / `TokenSigning` - Crypto primitive failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, CredentialError>;

    /// Verify email and password of an enabled credential and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, disabled account or wrong password
    /// * `Digest` / `TokenSigning` - Crypto primitive failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_in(&self, command: SignInCommand) -> Result<Session, CredentialError>;

    /// Resolve a bearer token to the enabled credential it names.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged or expired
    /// * `UnknownSubject` - Subject does not exist or is disabled
    /// * `DatabaseError` - Database operation failed
    async fn resolve_token(&self, token: &str) -> Result<Credential, CredentialError>;
}

/// Persistence operations the credential flows need from the datastore.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve an enabled credential by identifier.
    ///
    /// # Returns
    /// Optional credential (None if absent or disabled)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_enabled_by_id(&self, id: &CredentialId)
        -> Result<Option<Credential>, CredentialError>;

    /// Retrieve an enabled credential by email address.
    ///
    /// # Returns
    /// Optional credential (None if absent or disabled)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_enabled_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError>;

    /// Persist a new enabled credential with `created_at` as both timestamps.
    ///
    /// # Returns
    /// Stored credential with its assigned identifier
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, credential: NewCredential) -> Result<Credential, CredentialError>;
}
