//! Playlist sources: local files and remote URLs.

pub mod m3u;

pub use m3u::{validate_playlist_url, PlaylistLoader, PlaylistSource};
