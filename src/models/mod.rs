//! Domain models shared by the playlist pipeline, the catalog store and the
//! web layer.

pub mod category;
pub mod channel;

pub use category::{CategoryFilter, CategoryInfo, ChannelCategory};
pub use channel::{Channel, ChannelCreateRequest, ChannelDraft, ChannelUpdateRequest};
