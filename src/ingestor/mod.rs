//! M3U playlist ingestion pipeline.
//!
//! Raw playlist text flows through four stages:
//!
//! 1. [`tokenizer`] splits the text into trimmed lines and checks the header
//! 2. [`m3u_parser`] pairs `#EXTINF:` directives with their stream URL lines
//! 3. [`classifier`] maps the `group-title` label to a catalog category
//! 4. [`projector`] builds the [`ChannelDraft`] handed to the catalog store
//!
//! The pipeline is a pure function of its input: no I/O, no shared state, and
//! no errors for malformed content.

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::models::ChannelDraft;

pub mod classifier;
pub mod m3u_parser;
pub mod projector;
pub mod tokenizer;

pub use classifier::classify_group_label;
pub use m3u_parser::{EntryExtractor, ExtractionStats, RawEntry};
pub use projector::project_entry;
pub use tokenizer::{tokenize, HeaderStatus, PlaylistLines};

/// Non-fatal advisories raised while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistWarning {
    /// The first non-empty line is not `#EXTM3U`
    MissingHeader,
}

impl fmt::Display for PlaylistWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistWarning::MissingHeader => write!(
                f,
                "playlist does not start with {}; parsing anyway",
                tokenizer::PLAYLIST_HEADER
            ),
        }
    }
}

/// Full outcome of a parse, for callers that surface advisories
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistParse {
    pub drafts: Vec<ChannelDraft>,
    pub warnings: Vec<PlaylistWarning>,
    pub extraction: ExtractionStats,
    /// Complete entries rejected by the projector (blank name or URL)
    pub entries_dropped: usize,
}

/// Parse playlist text and report warnings and skip counters alongside the
/// drafts.
pub fn parse_playlist_report(raw: &str) -> PlaylistParse {
    let lines = tokenize(raw);

    let mut warnings = Vec::new();
    if lines.header() == HeaderStatus::Missing {
        warnings.push(PlaylistWarning::MissingHeader);
    }

    let mut extractor = EntryExtractor::new(lines);
    let mut drafts = Vec::new();
    let mut entries_dropped = 0;
    for entry in extractor.by_ref() {
        match project_entry(entry) {
            Some(draft) => drafts.push(draft),
            None => entries_dropped += 1,
        }
    }
    let extraction = extractor.stats();

    debug!(
        "Parsed playlist: {} drafts, {} incomplete blocks, {} orphaned URLs, {} unnamed entries",
        drafts.len(),
        extraction.incomplete_blocks,
        extraction.orphaned_urls,
        entries_dropped
    );

    PlaylistParse {
        drafts,
        warnings,
        extraction,
        entries_dropped,
    }
}

/// Parse playlist text into channel drafts, in source order.
///
/// Never fails: empty input, input without URLs and input without directives
/// all yield an empty list.
pub fn parse_playlist(raw: &str) -> Vec<ChannelDraft> {
    let report = parse_playlist_report(raw);
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    report.drafts
}
