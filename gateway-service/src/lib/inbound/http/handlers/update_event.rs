use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::create_event::EventRequest;
use super::list_events::EventData;
use super::ApiError;
use super::ApiSuccess;
use crate::event::models::EventId;
use crate::inbound::http::middleware::CurrentCredential;
use crate::inbound::http::router::AppState;

pub async fn update_event(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCredential>,
    Path(event_id): Path<String>,
    body: Result<Json<EventRequest>, JsonRejection>,
) -> Result<ApiSuccess<EventData>, ApiError> {
    let event_id = event_id
        .parse::<i64>()
        .map(EventId)
        .map_err(|e| ApiError::BadRequest(format!("Invalid event id: {}", e)))?;
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .event_service
        .update_event(&current.id(), &event_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}
