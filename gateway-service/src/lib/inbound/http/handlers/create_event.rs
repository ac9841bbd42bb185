use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::list_events::EventData;
use super::ApiError;
use super::ApiSuccess;
use crate::event::errors::EventError;
use crate::event::models::EventCommand;
use crate::event::models::EventDescription;
use crate::event::models::EventName;
use crate::inbound::http::middleware::CurrentCredential;
use crate::inbound::http::router::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCredential>,
    body: Result<Json<EventRequest>, JsonRejection>,
) -> Result<ApiSuccess<EventData>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .event_service
        .create_event(&current.id(), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::CREATED, event.into()))
}

/// HTTP request body for creating or updating an event (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRequest {
    name: String,
    description: String,
}

impl EventRequest {
    pub(super) fn try_into_command(self) -> Result<EventCommand, EventError> {
        let name = EventName::new(self.name)?;
        let description = EventDescription::new(self.description)?;
        Ok(EventCommand::new(name, description))
    }
}
