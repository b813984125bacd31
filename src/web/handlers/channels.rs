//! Channel browsing API handlers
//!
//! Public, read-mostly endpoints: categories, channel listing with category
//! filter and search, single channel lookup, stream redirect, favorites and
//! the catalog version used by clients to detect changes.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::debug;

use super::parse_channel_id;
use crate::models::CategoryFilter;
use crate::web::{
    responses::{bad_request, handle_error, handle_result, ok, CatalogVersionResponse, FavoriteResponse},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ChannelsQuery {
    /// `all`, `favorites` or a category id
    pub category: Option<String>,
    /// Case-insensitive match on name, description or category
    pub search: Option<String>,
}

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.catalog.categories())
}

/// GET /api/v1/channels
pub async fn list_channels(
    State(state): State<AppState>,
    Query(query): Query<ChannelsQuery>,
) -> Response {
    let filter = match query.category.as_deref().unwrap_or_default().parse::<CategoryFilter>() {
        Ok(filter) => filter,
        Err(e) => return bad_request(&e),
    };
    let search = query.search.unwrap_or_default();
    debug!("Listing channels: filter={:?} search='{}'", filter, search);

    handle_result(state.catalog.search_in(&search, filter).await)
}

/// GET /api/v1/channels/:id
pub async fn get_channel(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_channel_id(&id) {
        Ok(id) => id,
        Err(e) => return handle_error(e),
    };
    handle_result(state.catalog.get(id).await)
}

/// GET /api/v1/channels/:id/stream
///
/// Temporary redirect to the upstream stream so players can be pointed at a
/// stable catalog URL.
pub async fn stream_channel(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_channel_id(&id) {
        Ok(id) => id,
        Err(e) => return handle_error(e),
    };
    match state.catalog.get(id).await {
        Ok(channel) => Redirect::temporary(&channel.stream_url).into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /api/v1/channels/:id/favorite
pub async fn toggle_favorite(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_channel_id(&id) {
        Ok(id) => id,
        Err(e) => return handle_error(e),
    };
    handle_result(
        state
            .catalog
            .toggle_favorite(id)
            .await
            .map(|is_favorite| FavoriteResponse { id, is_favorite }),
    )
}

/// GET /api/v1/catalog/version
pub async fn catalog_version(State(state): State<AppState>) -> impl IntoResponse {
    ok(CatalogVersionResponse {
        version: state.catalog.version(),
        param: state.catalog.version_param(),
    })
}
