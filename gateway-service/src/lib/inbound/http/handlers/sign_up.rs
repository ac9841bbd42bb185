use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialName;
use crate::credential::models::EmailAddress;
use crate::credential::models::Password;
use crate::credential::models::Session;
use crate::credential::models::SignUpCommand;
use crate::inbound::http::router::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(reason = %e, "Sign-up body rejected");
        ApiError::Unauthorized
    })?;

    let command = body.try_into_command()?;

    state
        .credential_service
        .sign_up(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for registering (raw JSON)
#[derive(Deserialize)]
pub struct SignUpRequest {
    name: String,
    email: String,
    password: String,
}

impl SignUpRequest {
    fn try_into_command(self) -> Result<SignUpCommand, CredentialError> {
        let name = CredentialName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::for_sign_up(self.password)?;
        Ok(SignUpCommand::new(name, email, password))
    }
}

/// Token and public view of the credential it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub token: String,
    pub user: CredentialData,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            user: (&session.credential).into(),
        }
    }
}

/// Public view of a credential; the password digest is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Credential> for CredentialData {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.0,
            name: credential.name.as_str().to_string(),
            email: credential.email.as_str().to_string(),
            enabled: credential.enabled,
            created_at: credential.created_at,
            updated_at: credential.updated_at,
        }
    }
}
