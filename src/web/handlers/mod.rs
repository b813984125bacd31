//! Web handlers module
//!
//! HTTP request handlers organized by audience: public browsing endpoints in
//! [`channels`], authenticated catalog management in [`admin`], and
//! [`health`] for monitoring. Handlers stay thin and delegate to
//! [`CatalogService`](crate::services::CatalogService).

use uuid::Uuid;

use crate::errors::{AppError, WebError};

pub mod admin;
pub mod channels;
pub mod health;

/// Parse a channel id path segment (hyphenated or simple form)
pub fn parse_channel_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| WebError::invalid_request("id", format!("invalid channel id '{}': {}", raw, e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_channel_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_channel_id(&id.simple().to_string()).unwrap(), id);
        assert!(matches!(
            parse_channel_id("42"),
            Err(AppError::Web(WebError::InvalidRequest { .. }))
        ));
    }
}
