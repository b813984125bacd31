//! Admin API handlers
//!
//! Catalog management behind HTTP Basic authentication: channel CRUD and
//! playlist import. Playlist endpoints take the raw M3U text as the request
//! body.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::parse_channel_id;
use crate::errors::{AppError, SourceError};
use crate::models::{ChannelCreateRequest, ChannelUpdateRequest};
use crate::sources::PlaylistSource;
use crate::utils::sample_data::SAMPLE_PLAYLIST;
use crate::web::{
    responses::{created, handle_error, handle_result, no_content},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ImportUrlRequest {
    pub url: String,
}

/// POST /api/v1/admin/channels
pub async fn create_channel(
    State(state): State<AppState>,
    Json(request): Json<ChannelCreateRequest>,
) -> Response {
    match state.catalog.create(request).await {
        Ok(channel) => created(channel).into_response(),
        Err(e) => handle_error(e),
    }
}

/// PUT /api/v1/admin/channels/:id
pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChannelUpdateRequest>,
) -> Response {
    let id = match parse_channel_id(&id) {
        Ok(id) => id,
        Err(e) => return handle_error(e),
    };
    handle_result(state.catalog.update(id, request).await)
}

/// DELETE /api/v1/admin/channels/:id
pub async fn delete_channel(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_channel_id(&id) {
        Ok(id) => id,
        Err(e) => return handle_error(e),
    };
    match state.catalog.delete(id).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /api/v1/admin/import/preview
pub async fn preview_import(State(state): State<AppState>, body: Bytes) -> Response {
    let text = match playlist_body(&state, body) {
        Ok(text) => text,
        Err(e) => return handle_error(e),
    };
    handle_result(state.catalog.preview_playlist(&text))
}

/// POST /api/v1/admin/import
pub async fn import_playlist(State(state): State<AppState>, body: Bytes) -> Response {
    let text = match playlist_body(&state, body) {
        Ok(text) => text,
        Err(e) => return handle_error(e),
    };
    import_text(&state, &text, "request body").await
}

/// POST /api/v1/admin/import/url
pub async fn import_from_url(
    State(state): State<AppState>,
    Json(request): Json<ImportUrlRequest>,
) -> Response {
    let source = PlaylistSource::Url(request.url);
    let text = match state.loader.load(&source).await {
        Ok(text) => text,
        Err(e) => return handle_error(e.into()),
    };
    import_text(&state, &text, &source.to_string()).await
}

/// POST /api/v1/admin/import/sample
pub async fn import_sample(State(state): State<AppState>) -> Response {
    import_text(&state, SAMPLE_PLAYLIST, "sample playlist").await
}

async fn import_text(state: &AppState, text: &str, origin: &str) -> Response {
    match state.catalog.import_playlist(text).await {
        Ok(summary) => {
            info!(
                "Admin import from {}: {} imported, {} duplicates, {} rejected",
                origin, summary.imported, summary.duplicates, summary.rejected
            );
            let status = if summary.imported > 0 {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(crate::web::ApiResponse::success(summary))).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// Enforce the playlist size bound and UTF-8 on a raw request body
fn playlist_body(state: &AppState, body: Bytes) -> Result<String, AppError> {
    let max_size = state.config.import.max_playlist_bytes;
    let size = body.len() as u64;
    if size > max_size {
        return Err(SourceError::TooLarge { size, max_size }.into());
    }
    String::from_utf8(body.to_vec()).map_err(|_| {
        SourceError::InvalidEncoding {
            origin: "request body".to_string(),
        }
        .into()
    })
}
