//! Centralized error handling for the IPTV catalog
//!
//! This module unifies error types across all application layers.
//!
//! # Error Categories
//!
//! - **Repository Errors**: catalog document reads and writes
//! - **Source Errors**: loading playlist text from files or URLs
//! - **Validation Errors**: input validation and business rule violations
//! - **Web Errors**: HTTP request handling and admin authentication
//!
//! The playlist parser itself never produces errors; malformed playlist
//! content degrades to fewer channel drafts.
//!
//! # Usage
//!
//! ```rust
//! use iptv_catalog::errors::{AppError, AppResult};
//!
//! fn example_function(name: &str) -> AppResult<String> {
//!     if name.trim().is_empty() {
//!         return Err(AppError::validation("channel name is required"));
//!     }
//!     Ok(name.trim().to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
