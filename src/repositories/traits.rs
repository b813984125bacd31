//! Repository trait definitions
//!
//! The catalog is accessed through [`ChannelRepository`] so the service layer
//! does not depend on how channels are stored.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepositoryResult;
use crate::models::{Channel, ChannelDraft, ChannelUpdateRequest};

/// Storage operations for catalog channels and the favorites set
///
/// # Examples
///
/// ```rust,ignore
/// use iptv_catalog::repositories::{ChannelRepository, JsonChannelRepository};
///
/// async fn example(repo: &JsonChannelRepository) -> anyhow::Result<()> {
///     for channel in repo.find_all().await? {
///         println!("{} {}", channel.channel_number, channel.name);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// All channels ordered by channel number, with `is_favorite` merged
    async fn find_all(&self) -> RepositoryResult<Vec<Channel>>;

    /// Find a channel by its id
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Channel))` - Channel found
    /// * `Ok(None)` - No channel with this id
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Channel>>;

    /// Insert drafts in order, assigning fresh ids and channel numbers
    /// continuing from the current maximum
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Channel>)` - The stored channels, in draft order
    /// * `Err(RepositoryError)` - Persistence failed; nothing was inserted
    async fn insert_many(&self, drafts: Vec<ChannelDraft>) -> RepositoryResult<Vec<Channel>>;

    /// Replace the editable fields of a channel, keeping id and number
    async fn update(&self, id: Uuid, request: ChannelUpdateRequest) -> RepositoryResult<Channel>;

    /// Remove a channel and its favorite mark
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Mark or unmark a channel as favorite
    async fn set_favorite(&self, id: Uuid, favorite: bool) -> RepositoryResult<()>;

    async fn count(&self) -> RepositoryResult<usize>;

    /// Millisecond stamp of the last write seen by this repository
    async fn version(&self) -> i64;

    /// Re-read the backing store
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Another writer stored a newer catalog, which is now loaded
    /// * `Ok(false)` - Nothing changed
    async fn reload(&self) -> RepositoryResult<bool>;
}
