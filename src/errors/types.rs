//! Error type definitions for the IPTV catalog
//!
//! This module defines all error types used throughout the application,
//! providing a hierarchical error system that makes debugging and error
//! handling more straightforward.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the application.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog store errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Playlist source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Web layer errors
    #[error("Web error: {0}")]
    Web(#[from] WebError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Catalog store specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Reading or writing the catalog document failed
    #[error("Catalog I/O failed: {path} - {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Data serialization/deserialization failures
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound { table: String, field: String, value: String },
}

/// Playlist source specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Local playlist file could not be read
    #[error("Cannot read playlist {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Playlist bytes are not valid UTF-8 text
    #[error("Playlist is not valid UTF-8 text: {origin}")]
    InvalidEncoding { origin: String },

    /// Playlist exceeds the configured size bound
    #[error("Playlist too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    /// Source location is not a usable http(s) URL
    #[error("Invalid playlist URL: {url} - {message}")]
    InvalidUrl { url: String, message: String },

    /// Remote server answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Transport failure while downloading a playlist
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Web layer specific errors
#[derive(Error, Debug)]
pub enum WebError {
    /// Invalid request format
    #[error("Invalid request: {field} - {message}")]
    InvalidRequest { field: String, message: String },

    /// Missing or wrong admin credentials
    #[error("Invalid authentication: {message}")]
    InvalidAuth { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl RepositoryError {
    /// Create an I/O error tagged with the catalog path
    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a record not found error
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: Into<String>>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

impl SourceError {
    /// Create an I/O error tagged with the playlist path
    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl WebError {
    /// Create an invalid request error
    pub fn invalid_request<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn invalid_auth<M: Into<String>>(message: M) -> Self {
        Self::InvalidAuth {
            message: message.into(),
        }
    }
}
