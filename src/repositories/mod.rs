//! Repository pattern implementation for catalog storage
//!
//! Business logic in [`crate::services`] talks to the catalog through the
//! [`ChannelRepository`] trait; [`JsonChannelRepository`] is the storage
//! backend, persisting to a JSON document or living purely in memory.

pub mod channel;
pub mod traits;

pub use channel::JsonChannelRepository;
pub use traits::ChannelRepository;
