// Reference-frequency lexicon — the general-language rarity baseline.
//
// A flat JSON map of word -> frequency in [0,1], derived from a large
// general-language corpus. Loaded once at startup and injected read-only
// into the pipeline, so tests can substitute a tiny fake table.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Read-only word-frequency lookup against a general-language corpus.
pub struct ReferenceLexicon {
    frequencies: HashMap<String, f64>,
}

impl ReferenceLexicon {
    /// Load the lexicon from a JSON file of `{"word": frequency, ...}`.
    ///
    /// This is the one-time load — the table is immutable afterward and
    /// safe to share across threads by reference.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open reference lexicon at {}", path.display()))?;
        let frequencies: HashMap<String, f64> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse reference lexicon at {}", path.display()))?;

        info!(entries = frequencies.len(), "Loaded reference lexicon");

        Ok(Self { frequencies })
    }

    /// Build a lexicon directly from entries. Intended for tests and fakes.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            frequencies: entries.into_iter().map(|(w, f)| (w.into(), f)).collect(),
        }
    }

    /// Frequency of `word` in the reference corpus, or 0.0 if absent.
    ///
    /// 0.0 is the missing-value sentinel — callers route it through the
    /// rarity scorer's sentinel path rather than treating it as an error.
    pub fn lookup(&self, word: &str) -> f64 {
        self.frequencies.get(word).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_and_missing() {
        let lexicon = ReferenceLexicon::from_entries([("fox", 1e-5), ("castle", 2e-6)]);
        assert_eq!(lexicon.lookup("fox"), 1e-5);
        assert_eq!(lexicon.lookup("zorblax"), 0.0);
    }
}
