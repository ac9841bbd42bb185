use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use chrono::Utc;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::NewCredential;
use crate::credential::models::Session;
use crate::credential::models::SignInCommand;
use crate::credential::models::SignUpCommand;
use crate::credential::ports::CredentialRepository;
use crate::credential::ports::CredentialServicePort;

/// Stand-in digest checked when no credential matches a sign-in email, so
/// both rejection paths hash and compare a full-length digest.
const UNKNOWN_CREDENTIAL_DIGEST: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Domain service implementation for credential operations.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
pub struct CredentialService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
}

impl<CR> CredentialService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password and token primitives holding the server secrets
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn session(result: AuthenticationResult, credential: Credential) -> Session {
        Session {
            token: result.access_token,
            expires_at: result.expires_at,
            credential,
        }
    }
}

#[async_trait]
impl<CR> CredentialServicePort for CredentialService<CR>
where
    CR: CredentialRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, CredentialError> {
        let password_digest = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| CredentialError::Digest(e.to_string()))?;

        let inserted = self
            .repository
            .insert(NewCredential {
                name: command.name,
                email: command.email,
                password_digest,
                created_at: Utc::now(),
            })
            .await?;

        let credential = self
            .repository
            .find_enabled_by_id(&inserted.id)
            .await?
            .ok_or_else(|| {
                CredentialError::Unknown(format!(
                    "credential {} could not be read back after insert",
                    inserted.id
                ))
            })?;

        let result = self
            .authenticator
            .issue_token(&credential.id, Utc::now())
            .map_err(|e| CredentialError::TokenSigning(e.to_string()))?;

        tracing::info!(credential_id = %credential.id, "Credential registered");

        Ok(Self::session(result, credential))
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<Session, CredentialError> {
        let Some(credential) = self
            .repository
            .find_enabled_by_email(&command.email)
            .await?
        else {
            self.authenticator
                .verify_password(command.password.expose(), UNKNOWN_CREDENTIAL_DIGEST)
                .map_err(|e| CredentialError::Digest(e.to_string()))?;
            tracing::debug!("Sign-in rejected: no enabled credential for email");
            return Err(CredentialError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &credential.password_digest,
                &credential.id,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(credential_id = %credential.id, "Sign-in rejected: password mismatch");
                    CredentialError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => CredentialError::Digest(err.to_string()),
                AuthenticationError::TokenError(err) => {
                    CredentialError::TokenSigning(err.to_string())
                }
            })?;

        tracing::info!(credential_id = %credential.id, "Credential signed in");

        Ok(Self::session(result, credential))
    }

    async fn resolve_token(&self, token: &str) -> Result<Credential, CredentialError> {
        let id: CredentialId = self
            .authenticator
            .validate_token(token)
            .map_err(CredentialError::InvalidToken)?;

        self.repository
            .find_enabled_by_id(&id)
            .await?
            .ok_or(CredentialError::UnknownSubject(id.to_string()))
    }
}
