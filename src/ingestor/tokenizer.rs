//! Line tokenizer for M3U/M3U8 playlist text.
//!
//! The tokenizer never rejects input. Line order is preserved and blank lines
//! stay in the sequence, since the extractor pairs directives with the URL
//! lines that follow them.

/// Marker expected on the first non-empty line of an extended M3U playlist
pub const PLAYLIST_HEADER: &str = "#EXTM3U";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Outcome of the advisory header check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    /// First non-empty line starts with `#EXTM3U`
    Present,
    /// First non-empty line is something else; parsing still proceeds
    Missing,
    /// Input has no non-empty line at all
    Empty,
}

/// Restartable view over the lines of a playlist.
///
/// `PlaylistLines` is `Copy`; every call to [`PlaylistLines::iter`] starts a
/// fresh pass over the same text.
#[derive(Debug, Clone, Copy)]
pub struct PlaylistLines<'a> {
    raw: &'a str,
}

impl<'a> PlaylistLines<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw: raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw),
        }
    }

    /// Lazily yields every line, trimmed, in source order
    pub fn iter(&self) -> Lines<'a> {
        Lines {
            inner: self.raw.split('\n'),
        }
    }

    pub fn header(&self) -> HeaderStatus {
        match self.iter().find(|line| !line.is_empty()) {
            None => HeaderStatus::Empty,
            Some(line) if line.starts_with(PLAYLIST_HEADER) => HeaderStatus::Present,
            Some(_) => HeaderStatus::Missing,
        }
    }
}

impl<'a> IntoIterator for PlaylistLines<'a> {
    type Item = &'a str;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`PlaylistLines::iter`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::str::Split<'a, char>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(str::trim)
    }
}

/// Tokenize raw playlist text
pub fn tokenize(raw: &str) -> PlaylistLines<'_> {
    PlaylistLines::new(raw)
}
