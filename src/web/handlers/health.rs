//! Health check HTTP handler

use axum::{extract::State, response::IntoResponse};

use crate::models::CategoryFilter;
use crate::web::{responses::{handle_error, ok, HealthResponse}, AppState};

/// Basic liveness plus catalog size and version
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.list(CategoryFilter::All).await {
        Ok(channels) => {
            ok(HealthResponse::healthy(channels.len(), state.catalog.version())).into_response()
        }
        Err(e) => handle_error(e),
    }
}
