use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of catalog categories a channel can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelCategory {
    News,
    #[default]
    Entertainment,
    Sports,
    Music,
    Documentary,
    Movies,
}

impl ChannelCategory {
    /// All categories in catalog display order
    pub fn all() -> &'static [ChannelCategory] {
        &[
            ChannelCategory::News,
            ChannelCategory::Entertainment,
            ChannelCategory::Sports,
            ChannelCategory::Music,
            ChannelCategory::Documentary,
            ChannelCategory::Movies,
        ]
    }

    /// Stable identifier used in URLs, config and the catalog document
    pub fn id(&self) -> &'static str {
        match self {
            ChannelCategory::News => "news",
            ChannelCategory::Entertainment => "entertainment",
            ChannelCategory::Sports => "sports",
            ChannelCategory::Music => "music",
            ChannelCategory::Documentary => "documentary",
            ChannelCategory::Movies => "movies",
        }
    }

    /// Label shown to viewers
    pub fn display_name(&self) -> &'static str {
        match self {
            ChannelCategory::News => "Notícias",
            ChannelCategory::Entertainment => "Entretenimento",
            ChannelCategory::Sports => "Esportes",
            ChannelCategory::Music => "Música",
            ChannelCategory::Documentary => "Documentários",
            ChannelCategory::Movies => "Filmes",
        }
    }
}

impl fmt::Display for ChannelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChannelCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ChannelCategory::all()
            .iter()
            .copied()
            .find(|category| category.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Selection applied when listing the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Favorites,
    Category(ChannelCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: ChannelCategory, is_favorite: bool) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Favorites => is_favorite,
            CategoryFilter::Category(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(CategoryFilter::All),
            "favorites" => Ok(CategoryFilter::Favorites),
            other => other.parse().map(CategoryFilter::Category),
        }
    }
}

/// Category entry as exposed to browsing clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
}

impl CategoryInfo {
    /// Browsable entries: the `all` and `favorites` pseudo-categories first,
    /// then every concrete category.
    pub fn catalog_entries() -> Vec<CategoryInfo> {
        let mut entries = vec![
            CategoryInfo {
                id: "all".to_string(),
                name: "Todos".to_string(),
            },
            CategoryInfo {
                id: "favorites".to_string(),
                name: "Favoritos".to_string(),
            },
        ];
        entries.extend(ChannelCategory::all().iter().map(|category| CategoryInfo {
            id: category.id().to_string(),
            name: category.display_name().to_string(),
        }));
        entries
    }
}
