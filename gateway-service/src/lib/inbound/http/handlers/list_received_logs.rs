use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::event::models::ReceivedLog;
use crate::inbound::http::middleware::CurrentCredential;
use crate::inbound::http::router::AppState;

/// Logs received by the caller's own events only.
pub async fn list_received_logs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCredential>,
) -> Result<ApiSuccess<Vec<ReceivedLogData>>, ApiError> {
    state
        .event_service
        .list_received_logs(&current.id())
        .await
        .map_err(ApiError::from)
        .map(|logs| {
            ApiSuccess::new(
                StatusCode::OK,
                logs.iter().map(ReceivedLogData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedLogData {
    pub id: i64,
    pub event_id: i64,
    pub source_ip: String,
    pub payload: String,
    pub received_at: DateTime<Utc>,
    pub fired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ReceivedLog> for ReceivedLogData {
    fn from(log: &ReceivedLog) -> Self {
        Self {
            id: log.id,
            event_id: log.event_id.0,
            source_ip: log.source_ip.clone(),
            payload: log.payload.clone(),
            received_at: log.received_at,
            fired_at: log.fired_at,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}
