//! IPTV channel catalog
//!
//! Parses M3U playlists into channel drafts ([`ingestor`]), stores them in a
//! numbered catalog with favorites ([`repositories`], [`services`]) and
//! serves the catalog over HTTP ([`web`]).

pub mod config;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod repositories;
pub mod services;
pub mod sources;
pub mod utils;
pub mod web;

pub use ingestor::{parse_playlist, parse_playlist_report, PlaylistParse, PlaylistWarning};
pub use models::{Channel, ChannelCategory, ChannelDraft};
