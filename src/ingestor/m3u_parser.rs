//! Entry extraction for M3U playlists.
//!
//! Walks the tokenized lines with a two-state machine. A `#EXTINF:` directive
//! opens a pending entry; the next http(s) line completes it. Anything that
//! does not fit that shape is skipped without an error.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::tokenizer::{Lines, PlaylistLines};

/// Marker that opens a channel block
pub const DIRECTIVE_MARKER: &str = "#EXTINF:";

/// One channel block as found in the playlist, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub stream_url: String,
    pub logo_url: Option<String>,
    pub group_label: Option<String>,
}

/// Metadata parsed from a directive line, waiting for its URL line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct PendingEntry {
    pub(crate) title: String,
    pub(crate) logo_url: Option<String>,
    pub(crate) group_label: Option<String>,
}

impl PendingEntry {
    fn complete(self, stream_url: &str) -> RawEntry {
        RawEntry {
            title: self.title,
            stream_url: stream_url.to_string(),
            logo_url: self.logo_url,
            group_label: self.group_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ExtractorState {
    #[default]
    Idle,
    HaveTitle(PendingEntry),
}

/// Counters for blocks the extractor dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionStats {
    /// Directives replaced by another directive or cut off by end of input
    pub incomplete_blocks: usize,
    /// URL lines seen while no directive was pending
    pub orphaned_urls: usize,
}

enum LineKind<'a> {
    Directive(&'a str),
    StreamUrl(&'a str),
    Other,
}

fn classify_line(line: &str) -> LineKind<'_> {
    if line.starts_with(DIRECTIVE_MARKER) {
        LineKind::Directive(line)
    } else if is_stream_url(line) {
        LineKind::StreamUrl(line)
    } else {
        LineKind::Other
    }
}

/// True when the line begins with an http:// or https:// scheme
pub fn is_stream_url(line: &str) -> bool {
    let prefix = |scheme: &str| {
        line.get(..scheme.len())
            .map(|head| head.eq_ignore_ascii_case(scheme))
            .unwrap_or(false)
    };
    prefix("http://") || prefix("https://")
}

struct AttributePatterns {
    logo: Regex,
    group: Regex,
}

fn attribute_patterns() -> &'static AttributePatterns {
    static PATTERNS: OnceLock<AttributePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| AttributePatterns {
        logo: Regex::new(r#"tvg-logo="([^"]*)""#).expect("tvg-logo pattern is valid"),
        group: Regex::new(r#"group-title="([^"]*)""#).expect("group-title pattern is valid"),
    })
}

fn capture_attribute(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a directive line into its pending entry.
///
/// The title is the text after the last comma; without a comma the title is
/// left empty and the projector drops the entry later. Attributes are located
/// by pattern anywhere on the line, so their order does not matter.
pub(crate) fn parse_directive(line: &str) -> PendingEntry {
    let title = line
        .rfind(',')
        .map(|comma_pos| line[comma_pos + 1..].trim().to_string())
        .unwrap_or_default();

    let patterns = attribute_patterns();
    PendingEntry {
        title,
        logo_url: capture_attribute(&patterns.logo, line),
        group_label: capture_attribute(&patterns.group, line),
    }
}

/// Lazy iterator of [`RawEntry`] values over a playlist
pub struct EntryExtractor<'a> {
    lines: Lines<'a>,
    state: ExtractorState,
    stats: ExtractionStats,
}

impl<'a> EntryExtractor<'a> {
    pub fn new(lines: PlaylistLines<'a>) -> Self {
        Self {
            lines: lines.iter(),
            state: ExtractorState::Idle,
            stats: ExtractionStats::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &ExtractorState {
        &self.state
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    fn on_directive(&mut self, line: &str) {
        if let ExtractorState::HaveTitle(previous) = &self.state {
            debug!("Dropping channel block '{}' with no stream URL", previous.title);
            self.stats.incomplete_blocks += 1;
        }
        self.state = ExtractorState::HaveTitle(parse_directive(line));
    }

    fn on_stream_url(&mut self, url: &str) -> Option<RawEntry> {
        match std::mem::take(&mut self.state) {
            ExtractorState::HaveTitle(pending) => Some(pending.complete(url)),
            ExtractorState::Idle => {
                debug!("Ignoring stream URL without a preceding directive: {}", url);
                self.stats.orphaned_urls += 1;
                None
            }
        }
    }

    fn finish(&mut self) {
        if let ExtractorState::HaveTitle(pending) = std::mem::take(&mut self.state) {
            debug!("Playlist ended before a stream URL for '{}'", pending.title);
            self.stats.incomplete_blocks += 1;
        }
    }
}

impl Iterator for EntryExtractor<'_> {
    type Item = RawEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.lines.next() {
            match classify_line(line) {
                LineKind::Directive(directive) => self.on_directive(directive),
                LineKind::StreamUrl(url) => {
                    if let Some(entry) = self.on_stream_url(url) {
                        return Some(entry);
                    }
                }
                LineKind::Other => {}
            }
        }
        self.finish();
        None
    }
}

/// Collect every complete entry of a playlist
pub fn extract_entries(lines: PlaylistLines<'_>) -> Vec<RawEntry> {
    EntryExtractor::new(lines).collect()
}
