use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::event::models::Event;
use crate::inbound::http::middleware::CurrentCredential;
use crate::inbound::http::router::AppState;

pub async fn list_events(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCredential>,
) -> Result<ApiSuccess<Vec<EventData>>, ApiError> {
    state
        .event_service
        .list_events(&current.id())
        .await
        .map_err(ApiError::from)
        .map(|events| ApiSuccess::new(StatusCode::OK, events.iter().map(EventData::from).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventData {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Event> for EventData {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.0,
            user_id: event.owner.0,
            name: event.name.as_str().to_string(),
            description: event.description.as_str().to_string(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
