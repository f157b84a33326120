//! Route handler functions for all API endpoints.
//!
//! Each handler extracts parameters via axum extractors, interacts with the
//! dialog engine, and returns JSON responses.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use findly_dialog::DialogReply;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request/response types
// =============================================================================

/// Request body for POST /message: one inbound transport event.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Transport-assigned user identity.
    pub user_id: i64,
    /// Raw message text.
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Keep-alive banner, also useful for uptime probes.
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "Findly AI is Active!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.engine.active_sessions(),
    })
}

/// POST /message - advance one user's conversation by one step.
///
/// Returns the next prompt, a results list, or a localized not-found
/// reply for the transport to render.
pub async fn message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<DialogReply>, ApiError> {
    tracing::debug!(user_id = request.user_id, "Inbound transport message");
    let reply = state
        .engine
        .handle_message(request.user_id, &request.text)
        .await?;
    Ok(Json(reply))
}

/// GET /events - SSE stream of domain events.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>> + Send> {
    let rx = state.engine.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().event("dialog").data(data)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
