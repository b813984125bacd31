//! JSON file backed channel repository
//!
//! The whole catalog (channels, favorites and the version stamp) lives in a
//! single JSON document. Every mutation rewrites the document through a
//! temporary file that is renamed into place, so readers never observe a
//! partially written catalog.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::traits::ChannelRepository;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Channel, ChannelDraft, ChannelUpdateRequest};

/// On-disk layout of the catalog
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    version: i64,
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    favorites: BTreeSet<Uuid>,
}

#[derive(Debug, Default)]
struct CatalogState {
    channels: BTreeMap<Uuid, Channel>,
    favorites: BTreeSet<Uuid>,
    version: i64,
}

impl CatalogState {
    fn from_document(document: CatalogDocument) -> Self {
        let channels: BTreeMap<Uuid, Channel> = document
            .channels
            .into_iter()
            .map(|channel| (channel.id, channel))
            .collect();
        // Favorites pointing at deleted channels are dropped on load
        let favorites = document
            .favorites
            .into_iter()
            .filter(|id| channels.contains_key(id))
            .collect();

        Self {
            channels,
            favorites,
            version: document.version,
        }
    }

    fn to_document(&self) -> CatalogDocument {
        let mut channels: Vec<Channel> = self.channels.values().cloned().collect();
        channels.sort_by_key(|channel| channel.channel_number);
        CatalogDocument {
            version: self.version,
            channels,
            favorites: self.favorites.clone(),
        }
    }

    fn with_favorite(&self, channel: &Channel) -> Channel {
        let mut channel = channel.clone();
        channel.is_favorite = self.favorites.contains(&channel.id);
        channel
    }

    fn max_channel_number(&self) -> u32 {
        self.channels
            .values()
            .map(|channel| channel.channel_number)
            .max()
            .unwrap_or(0)
    }

    fn bump_version(&mut self) {
        self.version = next_version(self.version);
    }
}

/// Millisecond timestamp strictly greater than `previous`
pub(crate) fn next_version(previous: i64) -> i64 {
    Utc::now().timestamp_millis().max(previous + 1)
}

pub struct JsonChannelRepository {
    path: Option<PathBuf>,
    state: RwLock<CatalogState>,
}

impl JsonChannelRepository {
    /// Open the catalog stored at `path`, starting empty when the file does
    /// not exist yet
    pub async fn open<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match read_document(&path).await? {
            Some(document) => {
                let state = CatalogState::from_document(document);
                info!(
                    "Loaded catalog from {} ({} channels, {} favorites)",
                    path.display(),
                    state.channels.len(),
                    state.favorites.len()
                );
                state
            }
            None => {
                info!("No catalog at {}, starting empty", path.display());
                CatalogState::default()
            }
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// Repository without a backing file
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(CatalogState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, state: &CatalogState) -> RepositoryResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = serde_json::to_vec_pretty(&state.to_document())?;
        let display = path.display().to_string();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::io(display.clone(), e))?;
        }

        let tmp_path = temp_path(path);
        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| RepositoryError::io(tmp_path.display().to_string(), e))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| RepositoryError::io(display, e))?;

        debug!("Persisted catalog version {}", state.version);
        Ok(())
    }

    /// Apply `mutate` to a copy of the state and swap it in only once the
    /// copy has been persisted
    ///
    /// A newer document written by another process is adopted first, so the
    /// mutation never overwrites it.
    async fn mutate<T, F>(&self, mutate: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut CatalogState) -> RepositoryResult<T> + Send,
        T: Send,
    {
        let mut state = self.state.write().await;
        if let Some(path) = &self.path {
            if let Some(document) = read_document(path).await? {
                if document.version > state.version {
                    debug!(
                        "Adopting catalog version {} from disk before write",
                        document.version
                    );
                    *state = CatalogState::from_document(document);
                }
            }
        }

        let mut next = CatalogState {
            channels: state.channels.clone(),
            favorites: state.favorites.clone(),
            version: state.version,
        };
        let result = mutate(&mut next)?;
        next.bump_version();
        self.persist(&next).await?;
        *state = next;
        Ok(result)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn read_document(path: &Path) -> RepositoryResult<Option<CatalogDocument>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RepositoryError::io(path.display().to_string(), e)),
    }
}

fn channel_not_found(id: Uuid) -> RepositoryError {
    RepositoryError::record_not_found("channels", "id", id.to_string())
}

#[async_trait]
impl ChannelRepository for JsonChannelRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Channel>> {
        let state = self.state.read().await;
        let mut channels: Vec<Channel> = state
            .channels
            .values()
            .map(|channel| state.with_favorite(channel))
            .collect();
        channels.sort_by_key(|channel| channel.channel_number);
        Ok(channels)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Channel>> {
        let state = self.state.read().await;
        Ok(state.channels.get(&id).map(|channel| state.with_favorite(channel)))
    }

    async fn insert_many(&self, drafts: Vec<ChannelDraft>) -> RepositoryResult<Vec<Channel>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        self.mutate(|state| {
            let mut next_number = state.max_channel_number();
            let mut inserted = Vec::with_capacity(drafts.len());
            for draft in drafts {
                next_number += 1;
                let channel = Channel::from_draft(draft, Uuid::new_v4(), next_number);
                state.channels.insert(channel.id, channel.clone());
                inserted.push(channel);
            }
            Ok(inserted)
        })
        .await
    }

    async fn update(&self, id: Uuid, request: ChannelUpdateRequest) -> RepositoryResult<Channel> {
        self.mutate(|state| {
            let is_favorite = state.favorites.contains(&id);
            let channel = state
                .channels
                .get_mut(&id)
                .ok_or_else(|| channel_not_found(id))?;
            request.apply_to(channel);
            let mut updated = channel.clone();
            updated.is_favorite = is_favorite;
            Ok(updated)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.mutate(|state| {
            state
                .channels
                .remove(&id)
                .ok_or_else(|| channel_not_found(id))?;
            state.favorites.remove(&id);
            Ok(())
        })
        .await
    }

    async fn set_favorite(&self, id: Uuid, favorite: bool) -> RepositoryResult<()> {
        self.mutate(|state| {
            if !state.channels.contains_key(&id) {
                return Err(channel_not_found(id));
            }
            if favorite {
                state.favorites.insert(id);
            } else {
                state.favorites.remove(&id);
            }
            Ok(())
        })
        .await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.state.read().await.channels.len())
    }

    async fn version(&self) -> i64 {
        self.state.read().await.version
    }

    async fn reload(&self) -> RepositoryResult<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        let Some(document) = read_document(path).await? else {
            return Ok(false);
        };

        let mut state = self.state.write().await;
        if document.version <= state.version {
            return Ok(false);
        }

        debug!(
            "Catalog changed on disk: version {} -> {}",
            state.version, document.version
        );
        *state = CatalogState::from_document(document);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChannelCategory;
    use tempfile::TempDir;

    fn draft(name: &str, url: &str) -> ChannelDraft {
        ChannelDraft {
            name: name.to_string(),
            stream_url: url.to_string(),
            thumbnail_url: None,
            logo_url: None,
            category: ChannelCategory::News,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_consecutive_numbers() {
        let repo = JsonChannelRepository::in_memory();
        let first = repo
            .insert_many(vec![draft("A", "http://a"), draft("B", "http://b")])
            .await
            .unwrap();
        assert_eq!(
            first.iter().map(|c| c.channel_number).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let second = repo.insert_many(vec![draft("C", "http://c")]).await.unwrap();
        assert_eq!(second[0].channel_number, 3);
    }

    #[tokio::test]
    async fn test_numbers_continue_from_max_after_delete() {
        let repo = JsonChannelRepository::in_memory();
        let inserted = repo
            .insert_many(vec![draft("A", "http://a"), draft("B", "http://b")])
            .await
            .unwrap();
        repo.delete(inserted[0].id).await.unwrap();

        let next = repo.insert_many(vec![draft("C", "http://c")]).await.unwrap();
        assert_eq!(next[0].channel_number, 3);
    }

    #[tokio::test]
    async fn test_favorites_merge_and_delete() {
        let repo = JsonChannelRepository::in_memory();
        let inserted = repo.insert_many(vec![draft("A", "http://a")]).await.unwrap();
        let id = inserted[0].id;

        repo.set_favorite(id, true).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().unwrap().is_favorite);

        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(repo.state.read().await.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_is_record_not_found() {
        let repo = JsonChannelRepository::in_memory();
        let err = repo.set_favorite(Uuid::new_v4(), true).await.unwrap_err();
        assert!(matches!(err, RepositoryError::RecordNotFound { .. }));
        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::RecordNotFound { .. }));
    }

    #[tokio::test]
    async fn test_version_increases_on_every_write() {
        let repo = JsonChannelRepository::in_memory();
        let v0 = repo.version().await;
        let inserted = repo.insert_many(vec![draft("A", "http://a")]).await.unwrap();
        let v1 = repo.version().await;
        repo.set_favorite(inserted[0].id, true).await.unwrap();
        let v2 = repo.version().await;
        assert!(v0 < v1 && v1 < v2);
    }

    #[tokio::test]
    async fn test_reopen_sees_same_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("catalog.json");

        let repo = JsonChannelRepository::open(&path).await.unwrap();
        let inserted = repo
            .insert_many(vec![draft("A", "http://a"), draft("B", "http://b")])
            .await
            .unwrap();
        repo.set_favorite(inserted[1].id, true).await.unwrap();
        assert!(path.exists());
        assert!(!temp_path(&path).exists());

        let reopened = JsonChannelRepository::open(&path).await.unwrap();
        let channels = reopened.find_all().await.unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "A");
        assert!(!channels[0].is_favorite);
        assert!(channels[1].is_favorite);
        assert_eq!(reopened.version().await, repo.version().await);
    }

    #[tokio::test]
    async fn test_reload_picks_up_other_writer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let reader = JsonChannelRepository::open(&path).await.unwrap();
        let writer = JsonChannelRepository::open(&path).await.unwrap();
        assert!(!reader.reload().await.unwrap());

        writer.insert_many(vec![draft("A", "http://a")]).await.unwrap();
        assert!(reader.reload().await.unwrap());
        assert_eq!(reader.count().await.unwrap(), 1);
        assert!(!reader.reload().await.unwrap());
    }

    #[tokio::test]
    async fn test_interleaved_writers_keep_each_others_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let server = JsonChannelRepository::open(&path).await.unwrap();
        let cli = JsonChannelRepository::open(&path).await.unwrap();

        let from_cli = cli.insert_many(vec![draft("FromCli", "http://cli")]).await.unwrap();
        let from_server = server
            .insert_many(vec![draft("FromServer", "http://server")])
            .await
            .unwrap();
        assert_eq!(from_cli[0].channel_number, 1);
        assert_eq!(from_server[0].channel_number, 2);

        cli.set_favorite(from_cli[0].id, true).await.unwrap();
        assert!(server.reload().await.unwrap());

        let reopened = JsonChannelRepository::open(&path).await.unwrap();
        let channels = reopened.find_all().await.unwrap();
        let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["FromCli", "FromServer"]);
        assert!(channels[0].is_favorite);
        assert_eq!(server.find_all().await.unwrap(), channels);
    }

    #[tokio::test]
    async fn test_in_memory_reload_is_noop() {
        let repo = JsonChannelRepository::in_memory();
        assert!(!repo.reload().await.unwrap());
        assert!(repo.path().is_none());
    }
}
