use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_event::create_event;
use super::handlers::list_events::list_events;
use super::handlers::list_received_logs::list_received_logs;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use super::handlers::update_event::update_event;
use super::middleware::authenticate;
use super::middleware::AuthGate;
use crate::credential::ports::CredentialServicePort;
use crate::event::ports::EventServicePort;

#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServicePort>,
    pub event_service: Arc<dyn EventServicePort>,
    pub auth_gate: Arc<AuthGate>,
}

impl AppState {
    pub fn new(
        credential_service: Arc<dyn CredentialServicePort>,
        event_service: Arc<dyn EventServicePort>,
    ) -> Self {
        Self {
            auth_gate: Arc::new(AuthGate::new(Arc::clone(&credential_service))),
            credential_service,
            event_service,
        }
    }
}

pub fn create_router(
    credential_service: Arc<dyn CredentialServicePort>,
    event_service: Arc<dyn EventServicePort>,
) -> Router {
    let state = AppState::new(credential_service, event_service);

    // Headers are left out of the span: Authorization carries bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // Every route, matched or not, sits behind the gate; public paths are
    // allow-listed inside it.
    Router::new()
        .route("/api/sign_up", post(sign_up))
        .route("/api/sign_in", post(sign_in))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/:event_id", put(update_event))
        .route("/api/received_logs", get(list_received_logs))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
