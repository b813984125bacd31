//! Input validation for channel forms
//!
//! Admin-submitted channels go through [`ChannelValidator`] before they reach
//! the catalog. All failed rules are collected so a form can report every
//! problem at once.
//!
//! # Usage
//!
//! ```rust
//! use iptv_catalog::utils::validation::ChannelValidator;
//!
//! let result = ChannelValidator::new()
//!     .required("name", "TV Brasil")
//!     .http_url("stream_url", "https://example.com/live.m3u8")
//!     .optional_http_url("logo_url", None)
//!     .finish();
//! assert!(result.is_ok());
//! ```

use thiserror::Error;
use url::Url;

/// Longest accepted channel name
pub const MAX_NAME_LENGTH: usize = 200;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is required but missing or blank
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// Field value is too long
    #[error("Field '{field}' must be at most {max} characters long (got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Field value is not an absolute http(s) URL
    #[error("Field '{field}' must be an http:// or https:// URL")]
    InvalidUrl { field: String },
}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

#[derive(Debug, Default)]
pub struct ChannelValidator {
    errors: Vec<ValidationError>,
}

impl ChannelValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: field.to_string(),
            });
        }
        self
    }

    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let actual = value.chars().count();
        if actual > max {
            self.errors.push(ValidationError::TooLong {
                field: field.to_string(),
                max,
                actual,
            });
        }
        self
    }

    /// Non-blank values must be http(s) URLs; blank values are left to
    /// [`ChannelValidator::required`]
    pub fn http_url(mut self, field: &str, value: &str) -> Self {
        if !value.trim().is_empty() && !is_http_url(value) {
            self.errors.push(ValidationError::InvalidUrl {
                field: field.to_string(),
            });
        }
        self
    }

    pub fn optional_http_url(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.http_url(field, value),
            None => self,
        }
    }

    pub fn finish(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub fn is_http_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Join collected errors into a single message for API responses
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
