//! Catalog service
//!
//! Business logic on top of [`ChannelRepository`]: browsing and search,
//! favorites, admin edits and playlist imports. Every successful mutation is
//! followed by exactly one [`ChangeNotifier::notify`].

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::change_notifier::{CatalogEvent, ChangeNotifier};
use crate::config::ImportConfig;
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::ingestor::{parse_playlist_report, PlaylistWarning};
use crate::models::{
    CategoryFilter, CategoryInfo, Channel, ChannelCreateRequest, ChannelDraft,
    ChannelUpdateRequest,
};
use crate::repositories::ChannelRepository;
use crate::utils::sample_data;
use crate::utils::validation::{self, ChannelValidator, MAX_NAME_LENGTH};

/// Message of the validation error raised when a playlist yields no channels
pub const NO_VALID_CHANNELS: &str = "no valid channels found in playlist";

/// Parsed playlist shown to an admin before importing
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistPreview {
    pub channels: Vec<ChannelDraft>,
    pub warnings: Vec<PlaylistWarning>,
    /// Blocks skipped by the parser (incomplete, orphaned or unnamed)
    pub skipped_entries: usize,
}

/// Outcome of a playlist import
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    /// Drafts already present in the catalog or earlier in the playlist
    pub duplicates: usize,
    /// Drafts left out because the channel limit was reached
    pub rejected: usize,
    pub warnings: Vec<PlaylistWarning>,
    pub channels: Vec<Channel>,
}

pub struct CatalogService {
    repository: Arc<dyn ChannelRepository>,
    notifier: ChangeNotifier,
    max_channels: usize,
    // Serializes read-check-write sequences (limit, dedup, numbering)
    write_lock: Mutex<()>,
}

impl CatalogService {
    pub async fn new(repository: Arc<dyn ChannelRepository>, import: &ImportConfig) -> Self {
        let notifier = ChangeNotifier::new(repository.version().await);
        Self {
            repository,
            notifier,
            max_channels: import.max_channels,
            write_lock: Mutex::new(()),
        }
    }

    pub fn max_channels(&self) -> usize {
        self.max_channels
    }

    pub fn categories(&self) -> Vec<CategoryInfo> {
        CategoryInfo::catalog_entries()
    }

    /// Channels matching `filter`, ordered by channel number
    pub async fn list(&self, filter: CategoryFilter) -> AppResult<Vec<Channel>> {
        let channels = self.repository.find_all().await?;
        Ok(channels
            .into_iter()
            .filter(|channel| filter.matches(channel.category, channel.is_favorite))
            .collect())
    }

    /// Case-insensitive search over name, description and category id. A
    /// blank query returns the whole catalog.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Channel>> {
        self.search_in(query, CategoryFilter::All).await
    }

    pub async fn search_in(&self, query: &str, filter: CategoryFilter) -> AppResult<Vec<Channel>> {
        let channels = self.list(filter).await?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(channels);
        }
        Ok(channels
            .into_iter()
            .filter(|channel| channel.matches_query(&needle))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Channel> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("channel", id.to_string()))
    }

    /// Flip the favorite mark of a channel and return the new state
    pub async fn toggle_favorite(&self, id: Uuid) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let channel = self.get(id).await?;
        let favorite = !channel.is_favorite;
        self.repository
            .set_favorite(id, favorite)
            .await
            .map_err(|e| not_found_or(e, id))?;
        self.notifier.notify();

        debug!("Channel {} favorite = {}", channel.name, favorite);
        Ok(favorite)
    }

    pub async fn create(&self, request: ChannelCreateRequest) -> AppResult<Channel> {
        let draft = ChannelDraft::from(request);
        validate_channel(
            &draft.name,
            &draft.stream_url,
            draft.thumbnail_url.as_deref(),
            draft.logo_url.as_deref(),
        )?;

        let _guard = self.write_lock.lock().await;
        let count = self.repository.count().await?;
        if count >= self.max_channels {
            return Err(AppError::validation(format!(
                "channel limit reached ({} channels)",
                self.max_channels
            )));
        }

        let mut inserted = self.repository.insert_many(vec![draft]).await?;
        let channel = inserted
            .pop()
            .ok_or_else(|| AppError::internal("channel insert returned no record"))?;
        self.notifier.notify();

        info!(
            "Created channel {} '{}' ({})",
            channel.channel_number, channel.name, channel.id
        );
        Ok(channel)
    }

    pub async fn update(&self, id: Uuid, request: ChannelUpdateRequest) -> AppResult<Channel> {
        let request = request.normalized();
        validate_channel(
            &request.name,
            &request.stream_url,
            request.thumbnail_url.as_deref(),
            request.logo_url.as_deref(),
        )?;

        let _guard = self.write_lock.lock().await;
        let channel = self
            .repository
            .update(id, request)
            .await
            .map_err(|e| not_found_or(e, id))?;
        self.notifier.notify();

        info!("Updated channel {} '{}'", channel.channel_number, channel.name);
        Ok(channel)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.repository
            .delete(id)
            .await
            .map_err(|e| not_found_or(e, id))?;
        self.notifier.notify();

        info!("Deleted channel {}", id);
        Ok(())
    }

    /// Parse a playlist without touching the catalog
    pub fn preview_playlist(&self, text: &str) -> AppResult<PlaylistPreview> {
        let report = parse_playlist_report(text);
        if report.drafts.is_empty() {
            return Err(AppError::validation(NO_VALID_CHANNELS));
        }

        Ok(PlaylistPreview {
            skipped_entries: report.extraction.incomplete_blocks
                + report.extraction.orphaned_urls
                + report.entries_dropped,
            channels: report.drafts,
            warnings: report.warnings,
        })
    }

    /// Parse a playlist and append its channels to the catalog
    ///
    /// Drafts already in the catalog (same stream URL and name) are skipped,
    /// numbering continues from the current maximum, and the import stops at
    /// the channel limit.
    pub async fn import_playlist(&self, text: &str) -> AppResult<ImportSummary> {
        let report = parse_playlist_report(text);
        for warning in &report.warnings {
            warn!("{}", warning);
        }
        if report.drafts.is_empty() {
            return Err(AppError::validation(NO_VALID_CHANNELS));
        }

        let _guard = self.write_lock.lock().await;
        let existing = self.repository.find_all().await?;
        let mut seen: HashSet<(String, String)> =
            existing.iter().map(Channel::dedup_key).collect();

        let mut duplicates = 0;
        let mut fresh = Vec::with_capacity(report.drafts.len());
        for draft in report.drafts {
            if seen.insert(draft.dedup_key()) {
                fresh.push(draft);
            } else {
                duplicates += 1;
            }
        }

        let capacity = self.max_channels.saturating_sub(existing.len());
        let rejected = fresh.len().saturating_sub(capacity);
        fresh.truncate(capacity);

        let channels = self.repository.insert_many(fresh).await?;
        if !channels.is_empty() {
            self.notifier.notify();
        }
        if rejected > 0 {
            warn!(
                "Channel limit of {} reached, {} playlist entries not imported",
                self.max_channels, rejected
            );
        }

        info!(
            "Imported {} channels ({} duplicates, {} over limit)",
            channels.len(),
            duplicates,
            rejected
        );
        Ok(ImportSummary {
            imported: channels.len(),
            duplicates,
            rejected,
            warnings: report.warnings,
            channels,
        })
    }

    /// Pick up writes made to the store by another process. Returns true
    /// when the catalog changed.
    pub async fn sync_from_store(&self) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let changed = self.repository.reload().await?;
        if changed {
            let version = self.notifier.notify();
            info!("Catalog reloaded from store (version {})", version);
        }
        Ok(changed)
    }

    /// Insert the sample channels into an empty catalog. Returns how many
    /// channels were added.
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        let _guard = self.write_lock.lock().await;
        if self.repository.count().await? > 0 {
            return Ok(0);
        }

        let mut drafts = sample_data::default_channels();
        drafts.truncate(self.max_channels);
        let inserted = self.repository.insert_many(drafts).await?;
        if !inserted.is_empty() {
            self.notifier.notify();
        }

        info!("Seeded catalog with {} sample channels", inserted.len());
        Ok(inserted.len())
    }

    pub fn version(&self) -> i64 {
        self.notifier.version()
    }

    pub fn version_param(&self) -> String {
        self.notifier.version_param()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.notifier.subscribe()
    }
}

fn validate_channel(
    name: &str,
    stream_url: &str,
    thumbnail_url: Option<&str>,
    logo_url: Option<&str>,
) -> AppResult<()> {
    ChannelValidator::new()
        .required("name", name)
        .max_length("name", name, MAX_NAME_LENGTH)
        .required("stream_url", stream_url)
        .http_url("stream_url", stream_url)
        .optional_http_url("thumbnail_url", thumbnail_url)
        .optional_http_url("logo_url", logo_url)
        .finish()
        .map_err(|errors| AppError::validation(validation::describe(&errors)))
}

fn not_found_or(error: RepositoryError, id: Uuid) -> AppError {
    match error {
        RepositoryError::RecordNotFound { .. } => AppError::not_found("channel", id.to_string()),
        other => other.into(),
    }
}
