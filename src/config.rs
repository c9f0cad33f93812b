use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The API key comes from the environment (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// YouTube Data API key. Only needed for network stages; cached
    /// channels can be re-analyzed without it.
    pub youtube_api_key: String,
    /// Data API base URL (defaults to the public endpoint).
    pub youtube_api_url: String,
    /// Caption gateway base URL for transcript retrieval.
    pub caption_api_url: String,
    /// Root directory for per-channel artifact directories.
    pub data_dir: PathBuf,
    /// Reference-frequency lexicon JSON path.
    pub lexicon_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the API key, which is only required
    /// once a command actually has to hit the network.
    pub fn load() -> Result<Self> {
        let lexicon_path = env::var("LEXISCOPE_LEXICON")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_lexicon_path());

        Ok(Self {
            youtube_api_key: env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            youtube_api_url: env::var("YOUTUBE_API_URL")
                .unwrap_or_else(|_| crate::youtube::client::DEFAULT_API_URL.to_string()),
            caption_api_url: env::var("CAPTION_API_URL")
                .unwrap_or_else(|_| crate::youtube::transcripts::DEFAULT_CAPTION_URL.to_string()),
            data_dir: env::var("LEXISCOPE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            lexicon_path,
        })
    }

    /// Check that the Data API key is configured.
    /// Call this before any operation that downloads from YouTube.
    pub fn require_youtube(&self) -> Result<()> {
        if self.youtube_api_key.is_empty() {
            anyhow::bail!(
                "YOUTUBE_API_KEY not set. Add it to your .env file.\n\
                 Cached channels can still be re-analyzed with the words/stems/phrases commands."
            );
        }
        Ok(())
    }
}

/// Platform data directory fallback for the reference lexicon,
/// e.g. ~/.local/share/lexiscope/reference_lexicon.json on Linux.
fn default_lexicon_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexiscope")
        .join("reference_lexicon.json")
}
