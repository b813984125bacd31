//! Keyword classification of playlist group labels into catalog categories.

use crate::models::ChannelCategory;

/// Keyword groups checked in order; the first group with a hit wins.
///
/// The order resolves overlapping labels ("info-doc" is news) and must stay
/// as is for compatibility with previously imported catalogs.
const CATEGORY_KEYWORDS: &[(ChannelCategory, &[&str])] = &[
    (ChannelCategory::News, &["news", "information", "info"]),
    (ChannelCategory::Sports, &["sport"]),
    (ChannelCategory::Movies, &["movie", "film", "cinema"]),
    (ChannelCategory::Music, &["music", "musique"]),
    (ChannelCategory::Documentary, &["doc"]),
];

/// Map an optional `group-title` value to a catalog category.
///
/// Absent labels and labels without a known keyword fall back to
/// [`ChannelCategory::Entertainment`].
pub fn classify_group_label(label: Option<&str>) -> ChannelCategory {
    let Some(label) = label else {
        return ChannelCategory::default();
    };
    let label = label.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| label.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}
