use std::sync::Arc;

use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Paths reachable without a bearer token. Exact match only.
pub const PUBLIC_PATHS: [&str; 2] = ["/api/sign_up", "/api/sign_in"];

/// Extension type carrying the authenticated credential for one request
#[derive(Debug, Clone)]
pub struct CurrentCredential(pub Credential);

impl CurrentCredential {
    pub fn id(&self) -> CredentialId {
        self.0.id
    }
}

/// Outcome of a request the gate lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Public,
    Authorized(Credential),
}

/// Why the gate turned a request away. Logged, never returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing or malformed credential")]
    MissingCredential,

    #[error("invalid credential: {0}")]
    InvalidCredential(TokenError),

    #[error("unknown or disabled subject: {0}")]
    UnknownSubject(String),

    #[error("credential lookup failed: {0}")]
    Infrastructure(String),
}

/// Request-time policy deciding whether a caller may proceed, and as whom.
pub struct AuthGate {
    credential_service: Arc<dyn CredentialServicePort>,
}

impl AuthGate {
    pub fn new(credential_service: Arc<dyn CredentialServicePort>) -> Self {
        Self { credential_service }
    }

    /// Decide on a request from its path and headers.
    ///
    /// # Errors
    /// * `MissingCredential` - No `Authorization: Bearer <token>` header
    /// * `InvalidCredential` - Token is malformed, forged or expired
    /// * `UnknownSubject` - Token names a missing or disabled credential
    /// * `Infrastructure` - Credential lookup failed
    pub async fn admit(&self, path: &str, headers: &HeaderMap) -> Result<Admission, Rejection> {
        if PUBLIC_PATHS.contains(&path) {
            return Ok(Admission::Public);
        }

        let token = bearer_token(headers).ok_or(Rejection::MissingCredential)?;

        match self.credential_service.resolve_token(token).await {
            Ok(credential) => Ok(Admission::Authorized(credential)),
            Err(CredentialError::InvalidToken(e)) => Err(Rejection::InvalidCredential(e)),
            Err(CredentialError::UnknownSubject(id)) => Err(Rejection::UnknownSubject(id)),
            Err(e) => Err(Rejection::Infrastructure(e.to_string())),
        }
    }
}

/// Token segment of an `Authorization: Bearer <token>` header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer")
        || token.is_empty()
        || token.contains(char::is_whitespace)
    {
        return None;
    }

    Some(token)
}

/// Middleware running every request through the [`AuthGate`]
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    match state.auth_gate.admit(&path, req.headers()).await {
        Ok(Admission::Public) => next.run(req).await,
        Ok(Admission::Authorized(credential)) => {
            tracing::debug!(credential_id = %credential.id, path = %path, "Request authorized");
            req.extensions_mut().insert(CurrentCredential(credential));
            next.run(req).await
        }
        Err(Rejection::Infrastructure(detail)) => {
            ApiError::InternalServerError(detail).into_response()
        }
        Err(rejection) => {
            tracing::warn!(reason = %rejection, path = %path, "Request rejected");
            ApiError::Unauthorized.into_response()
        }
    }
}
