use super::AppState;
use crate::activity::{ActivityRequest, ResponseEnvelope};
use crate::error::ActivityError;
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

pub(super) fn status_for(err: &ActivityError) -> StatusCode {
    match err {
        ActivityError::PersonaNotFound(_) => StatusCode::NOT_FOUND,
        ActivityError::UnsupportedActivity(_) | ActivityError::InvalidRequest(_) => {
            StatusCode::BAD_REQUEST
        }
        ActivityError::Execution(_) => StatusCode::BAD_GATEWAY,
        ActivityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /chat: complete one activity turn
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ActivityRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected /chat body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ResponseEnvelope::failed(format!(
                    "invalid request: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    match Arc::clone(&state.orchestrator)
        .complete_detached(request)
        .await
    {
        Ok(completion) => (StatusCode::OK, Json(ResponseEnvelope::from(completion))),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::warn!(status = status.as_u16(), error = %err, "/chat failed");
            } else {
                tracing::debug!(status = status.as_u16(), error = %err, "/chat rejected");
            }
            (status, Json(ResponseEnvelope::from(&err)))
        }
    }
}

/// GET /health
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /activities: XP awarded per activity
pub(super) async fn handle_activities(State(state): State<AppState>) -> impl IntoResponse {
    let rewards = state.orchestrator.rewards();
    let activities: serde_json::Map<String, serde_json::Value> = rewards
        .entries()
        .into_iter()
        .map(|(id, points)| (id.to_string(), points.into()))
        .collect();
    Json(serde_json::json!({
        "default_points": rewards.default_points(),
        "activities": activities,
    }))
}
