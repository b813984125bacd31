//! Service layer for business logic
//!
//! Services sit between the web handlers (and CLI) and the repository layer.
//!
//! # Design Principles
//!
//! - **Dependency Injection**: services depend on the [`ChannelRepository`]
//!   trait, not on a storage backend
//! - **Validation**: input validation happens at the service layer
//! - **Notification**: every catalog mutation is announced through
//!   [`ChangeNotifier`]
//!
//! [`ChannelRepository`]: crate::repositories::ChannelRepository

pub mod catalog;
pub mod change_notifier;
pub mod sync_poller;

pub use catalog::{CatalogService, ImportSummary, PlaylistPreview, NO_VALID_CHANNELS};
pub use change_notifier::{CatalogEvent, ChangeNotifier};
pub use sync_poller::CatalogSyncPoller;
