//! Projection of extracted playlist entries into channel drafts.

use super::classifier::classify_group_label;
use super::m3u_parser::RawEntry;
use crate::models::ChannelDraft;

/// Placeholder used in the description when the entry carried no group label
pub const MISSING_GROUP_PLACEHOLDER: &str = "Sem categoria";

/// Description given to every channel created from a playlist import
pub fn imported_description(group_label: Option<&str>) -> String {
    format!(
        "Canal importado de lista IPTV ({})",
        group_label.unwrap_or(MISSING_GROUP_PLACEHOLDER)
    )
}

/// Turn a raw entry into a draft, or `None` when the name or the stream URL
/// is empty.
pub fn project_entry(entry: RawEntry) -> Option<ChannelDraft> {
    let name = entry.title.trim();
    let stream_url = entry.stream_url.trim();
    if name.is_empty() || stream_url.is_empty() {
        return None;
    }

    Some(ChannelDraft {
        name: name.to_string(),
        stream_url: stream_url.to_string(),
        thumbnail_url: entry.logo_url.clone(),
        logo_url: entry.logo_url,
        category: classify_group_label(entry.group_label.as_deref()),
        description: imported_description(entry.group_label.as_deref()),
    })
}
