//! Health check endpoint

use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    patients: usize,
    smart_replies: &'static str,
}

/// GET /health - Report liveness and which reply sources are active
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        patients: state.assistant.directory().len(),
        smart_replies: if state.assistant.smart_replies_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    })
}
