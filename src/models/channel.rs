use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChannelCategory;

/// Identity-less channel record awaiting insertion into the catalog.
///
/// Produced by the playlist pipeline and by the admin create form. The
/// catalog store assigns the id, channel number and favorite state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDraft {
    pub name: String,
    pub stream_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub category: ChannelCategory,
    pub description: String,
}

/// A channel owned by the catalog store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub channel_number: u32,
    pub name: String,
    pub stream_url: String,
    pub thumbnail_url: Option<String>,
    pub logo_url: Option<String>,
    pub category: ChannelCategory,
    pub description: String,
    /// Merged from the favorites set on read; ignored when loading a catalog
    #[serde(default, skip_deserializing)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Materialize a draft with the identity assigned by the store
    pub fn from_draft(draft: ChannelDraft, id: Uuid, channel_number: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_number,
            name: draft.name,
            stream_url: draft.stream_url,
            thumbnail_url: draft.thumbnail_url,
            logo_url: draft.logo_url,
            category: draft.category,
            description: draft.description,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Key used to detect the same channel imported twice
    pub fn dedup_key(&self) -> (String, String) {
        (self.stream_url.clone(), self.name.clone())
    }

    /// Case-insensitive match on name, description or category id.
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.id().contains(needle)
    }
}

impl ChannelDraft {
    pub fn dedup_key(&self) -> (String, String) {
        (self.stream_url.clone(), self.name.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelCreateRequest {
    pub name: String,
    pub stream_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub category: ChannelCategory,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelUpdateRequest {
    pub name: String,
    pub stream_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub category: ChannelCategory,
    #[serde(default)]
    pub description: String,
}

/// Blank optional URLs coming from forms are stored as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<ChannelCreateRequest> for ChannelDraft {
    fn from(request: ChannelCreateRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            stream_url: request.stream_url.trim().to_string(),
            thumbnail_url: non_blank(request.thumbnail_url),
            logo_url: non_blank(request.logo_url),
            category: request.category,
            description: request.description.trim().to_string(),
        }
    }
}

impl ChannelUpdateRequest {
    /// Trimmed copy with blank optional URLs collapsed to `None`
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            stream_url: self.stream_url.trim().to_string(),
            thumbnail_url: non_blank(self.thumbnail_url),
            logo_url: non_blank(self.logo_url),
            category: self.category,
            description: self.description.trim().to_string(),
        }
    }

    pub fn apply_to(self, channel: &mut Channel) {
        channel.name = self.name;
        channel.stream_url = self.stream_url;
        channel.thumbnail_url = self.thumbnail_url;
        channel.logo_url = self.logo_url;
        channel.category = self.category;
        channel.description = self.description;
        channel.updated_at = Utc::now();
    }
}
