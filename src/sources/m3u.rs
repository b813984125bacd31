//! M3U playlist loading
//!
//! Playlists reach the catalog either as a local file or as an http(s) URL.
//! Both paths enforce the configured size bound and require UTF-8 text; the
//! content itself is handed untouched to the ingestion pipeline.

use futures::StreamExt;
use reqwest::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ImportConfig;
use crate::errors::{SourceError, SourceResult};

/// Where playlist text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for PlaylistSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistSource::File(path) => write!(f, "{}", path.display()),
            PlaylistSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetches playlist text from files and URLs
pub struct PlaylistLoader {
    client: Client,
    max_bytes: u64,
}

impl PlaylistLoader {
    /// Build a loader; fails when the HTTP client cannot be initialised
    pub fn new(max_bytes: u64, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("iptv-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, max_bytes })
    }

    pub fn from_config(config: &ImportConfig) -> SourceResult<Self> {
        Self::new(config.max_playlist_bytes, config.fetch_timeout())
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub async fn load(&self, source: &PlaylistSource) -> SourceResult<String> {
        let text = match source {
            PlaylistSource::File(path) => self.load_file(path).await?,
            PlaylistSource::Url(url) => self.load_url(url).await?,
        };
        info!("Loaded playlist from {} ({} bytes)", source, text.len());
        Ok(text)
    }

    async fn load_file(&self, path: &Path) -> SourceResult<String> {
        let display = path.display().to_string();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| SourceError::io(display.clone(), e))?;
        self.check_size(metadata.len())?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SourceError::io(display.clone(), e))?;
        self.check_size(bytes.len() as u64)?;

        decode_playlist(bytes, &display)
    }

    async fn load_url(&self, url: &str) -> SourceResult<String> {
        let parsed = validate_playlist_url(url)?;
        debug!("Fetching playlist from {}", parsed);

        let response = self.client.get(parsed.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(length) = response.content_length() {
            self.check_size(length)?;
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }

        decode_playlist(body, url)
    }

    fn check_size(&self, size: u64) -> SourceResult<()> {
        if size > self.max_bytes {
            return Err(SourceError::TooLarge {
                size,
                max_size: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Accept only absolute http(s) URLs
pub fn validate_playlist_url(url: &str) -> SourceResult<url::Url> {
    let parsed =
        url::Url::parse(url.trim()).map_err(|e| SourceError::invalid_url(url, e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SourceError::invalid_url(
            url,
            format!("unsupported scheme '{}'", other),
        )),
    }
}

fn decode_playlist(bytes: Vec<u8>, origin: &str) -> SourceResult<String> {
    String::from_utf8(bytes).map_err(|_| SourceError::InvalidEncoding {
        origin: origin.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader(max_bytes: u64) -> PlaylistLoader {
        PlaylistLoader::new(max_bytes, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_loader_from_config_builds_client() {
        let config = ImportConfig {
            max_playlist_bytes: 2048,
            ..ImportConfig::default()
        };
        let loader = PlaylistLoader::from_config(&config).unwrap();
        assert_eq!(loader.max_bytes(), 2048);
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.m3u");
        std::fs::write(&path, "#EXTM3U\n#EXTINF:-1,A\nhttp://a\n").unwrap();

        let text = loader(1024)
            .load(&PlaylistSource::File(path))
            .await
            .unwrap();
        assert!(text.starts_with("#EXTM3U"));
    }

    #[tokio::test]
    async fn test_file_over_limit_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.m3u");
        std::fs::write(&path, "x".repeat(64)).unwrap();

        let err = loader(16)
            .load(&PlaylistSource::File(path))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { size: 64, max_size: 16 }));
    }

    #[tokio::test]
    async fn test_non_utf8_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.m3u");
        std::fs::write(&path, [0x23, 0x45, 0xff, 0xfe]).unwrap();

        let err = loader(1024)
            .load(&PlaylistSource::File(path))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidEncoding { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = loader(1024)
            .load(&PlaylistSource::File(PathBuf::from("/nonexistent/list.m3u")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/list.m3u"));
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_playlist_url("https://example.com/list.m3u").is_ok());
        assert!(validate_playlist_url("http://example.com/list.m3u").is_ok());
        assert!(validate_playlist_url("ftp://example.com/list.m3u").is_err());
        assert!(validate_playlist_url("not a url").is_err());
    }
}
