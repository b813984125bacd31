//! Utility modules
//!
//! - [`sample_data`]: seed channels and the demo playlist
//! - [`validation`]: channel form validation

pub mod sample_data;
pub mod validation;

pub use validation::{ChannelValidator, ValidationError};
