//! HTTP response types and utilities
//!
//! This module provides standardized response types and error handling
//! for the web layer, ensuring consistent API responses across all endpoints.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult, SourceError, WebError};
use crate::services::NO_VALID_CHANNELS;

/// Realm announced to clients when admin credentials are missing
pub const ADMIN_REALM: &str = "iptv-catalog admin";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Helper function to convert AppResult to HTTP response
pub fn handle_result<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => ok(data).into_response(),
        Err(error) => handle_error(error),
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } if message == NO_VALID_CHANNELS => {
            (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
        }
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::NotFound { resource, id } => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", resource, id),
        ),
        AppError::Repository(e) => {
            tracing::error!("Catalog store failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Catalog storage failed".to_string(),
            )
        }
        AppError::Source(e) => (source_status(e), e.to_string()),
        AppError::Web(WebError::InvalidAuth { message }) => {
            return unauthorized(message);
        }
        AppError::Web(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        AppError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", message),
        ),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

fn source_status(error: &SourceError) -> StatusCode {
    match error {
        SourceError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        SourceError::InvalidEncoding { .. } | SourceError::InvalidUrl { .. } => {
            StatusCode::BAD_REQUEST
        }
        SourceError::Http { .. } | SourceError::Fetch(_) => StatusCode::BAD_GATEWAY,
        SourceError::Io { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Success response helpers
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Error response helpers
pub fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

pub fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            format!("Basic realm=\"{}\"", ADMIN_REALM),
        )],
        Json(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub channels: usize,
    pub catalog_version: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    pub fn healthy(channels: usize, catalog_version: i64) -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            channels,
            catalog_version,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Current catalog version and the matching cache-busting query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogVersionResponse {
    pub version: i64,
    pub param: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub id: uuid::Uuid,
    pub is_favorite: bool,
}
