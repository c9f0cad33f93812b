// Channel artifact layout and JSON persistence.
//
// Every pipeline stage persists its output as a pretty-printed JSON file
// under <data_dir>/<channel_name>/, named <channel_name>_<stage>.json.
// Cached artifacts are plain data files — a viewer can read them directly,
// and a malformed one is treated as a cache miss, never a fatal error.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// File locations for one channel's artifacts.
pub struct ChannelPaths {
    pub dir: PathBuf,
    name: String,
}

impl ChannelPaths {
    pub fn new(data_dir: &Path, channel_name: &str) -> Self {
        Self {
            dir: data_dir.join(channel_name),
            name: channel_name.to_string(),
        }
    }

    fn file(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.json", self.name, suffix))
    }

    pub fn videos(&self) -> PathBuf {
        self.file("videos")
    }

    pub fn transcripts(&self) -> PathBuf {
        self.file("transcripts")
    }

    pub fn words(&self) -> PathBuf {
        self.file("words")
    }

    pub fn stems(&self) -> PathBuf {
        self.file("stems")
    }

    /// Per-length phrase table, e.g. `<name>_phrases3.json`.
    pub fn phrases(&self, phrase_len: usize) -> PathBuf {
        self.file(&format!("phrases{phrase_len}"))
    }

    /// Aggregated phrase table across all lengths.
    pub fn phrases_aggregate(&self) -> PathBuf {
        self.file("phrases")
    }
}

/// Load a cached artifact, or None when it is absent or unreadable.
///
/// A file that exists but fails to parse gets a warning and counts as a
/// cache miss — the stage recomputes and overwrites it.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to open cached artifact");
            return None;
        }
    };
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Malformed cached artifact, recomputing");
            None
        }
    }
}

/// Persist an artifact as pretty-printed JSON, creating the channel
/// directory if needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))
}
