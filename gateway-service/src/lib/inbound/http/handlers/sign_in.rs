use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::sign_up::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::CredentialError;
use crate::credential::models::EmailAddress;
use crate::credential::models::Password;
use crate::credential::models::SignInCommand;
use crate::inbound::http::router::AppState;

pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(reason = %e, "Sign-in body rejected");
        ApiError::Unauthorized
    })?;

    let command = body.try_into_command()?;

    state
        .credential_service
        .sign_in(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for signing in (raw JSON)
#[derive(Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}

impl SignInRequest {
    fn try_into_command(self) -> Result<SignInCommand, CredentialError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::for_sign_in(self.password)?;
        Ok(SignInCommand::new(email, password))
    }
}
