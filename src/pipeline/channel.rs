// Per-channel analysis driver — staged execution with artifact caching.
//
// Stage order: video list -> transcripts -> word table -> stem table ->
// phrase tables -> aggregated phrases. Each stage reuses its cached artifact
// unless a refresh was requested or any earlier stage recomputed this run;
// once one stage recomputes, everything after it does too, so a stale cache
// can never be mixed with fresh upstream data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::analysis::english_stopwords;
use crate::analysis::lexicon::ReferenceLexicon;
use crate::analysis::phrases::{aggregate_phrases, count_phrases, PhraseRecord};
use crate::analysis::stems::{collect_stems, StemRecord};
use crate::analysis::tokenize::{tokenize, Token};
use crate::analysis::words::{count_words, WordRecord};
use crate::youtube::transcripts::{process_transcript, TranscriptSet};
use crate::youtube::videos::VideoEntry;
use crate::youtube::VideoSource;

use super::artifacts::{self, ChannelPaths};

/// One line of the channels file: a channel id and the name used for its
/// artifact directory.
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
}

/// Parse a channels file of simple `id,name` lines. Blank lines and lines
/// starting with `#` are skipped.
pub fn read_channels_file(path: &Path) -> Result<Vec<ChannelSpec>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read channels file {}", path.display()))?;

    let mut channels = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (id, name) = line.split_once(',').with_context(|| {
            format!(
                "Malformed channels file line {} (expected 'id,name'): {line}",
                line_no + 1
            )
        })?;
        channels.push(ChannelSpec {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
        });
    }

    if channels.is_empty() {
        anyhow::bail!("Channels file {} lists no channels", path.display());
    }

    Ok(channels)
}

/// Knobs for one analysis run.
pub struct AnalysisOptions {
    /// Ignore every cached artifact and recompute from the network.
    pub refresh: bool,
    /// Phrase tables are built for lengths 2..=max_phrase_len.
    pub max_phrase_len: usize,
    /// Reference-zipf ceiling for the word table.
    pub max_reference_zipf: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            refresh: false,
            max_phrase_len: 4,
            max_reference_zipf: crate::analysis::words::DEFAULT_MAX_REFERENCE_ZIPF,
        }
    }
}

/// What one channel run produced, for the terminal summary.
#[derive(Debug)]
pub struct ChannelSummary {
    pub channel: String,
    pub videos: usize,
    pub transcripts: usize,
    pub words: usize,
    pub stems: usize,
    pub phrases: usize,
    pub unusuality_index: Option<f64>,
}

/// Run the full pipeline for one channel.
///
/// Fails when the channel yields zero transcripts — there is nothing to
/// analyze, and the caller decides whether to continue with other channels.
pub async fn run_channel(
    source: &dyn VideoSource,
    channel: &ChannelSpec,
    data_dir: &Path,
    lexicon: &ReferenceLexicon,
    options: &AnalysisOptions,
) -> Result<ChannelSummary> {
    let paths = ChannelPaths::new(data_dir, &channel.name);
    fs::create_dir_all(&paths.dir)
        .with_context(|| format!("Failed to create {}", paths.dir.display()))?;

    // Once any stage recomputes, every later stage must too.
    let mut recomputed = options.refresh;

    let videos: Vec<VideoEntry> = match cached(&paths.videos(), recomputed) {
        Some(videos) => videos,
        None => {
            info!(channel = %channel.name, "Fetching channel video list");
            let fetched = source.list_videos(&channel.id).await?;
            artifacts::write_json(&paths.videos(), &fetched)?;
            recomputed = true;
            fetched
        }
    };

    let transcripts: TranscriptSet = match cached(&paths.transcripts(), recomputed) {
        Some(transcripts) => transcripts,
        None => {
            info!(channel = %channel.name, videos = videos.len(), "Fetching transcripts");
            let ids: Vec<String> = videos.iter().map(|v| v.video_id.clone()).collect();
            let fetched = source.fetch_transcripts(&ids).await?;
            artifacts::write_json(&paths.transcripts(), &fetched)?;
            recomputed = true;
            fetched
        }
    };

    if transcripts.is_empty() {
        anyhow::bail!(
            "Channel {} has no transcripts to analyze — every video was skipped or the channel is empty",
            channel.name
        );
    }

    let stopwords = english_stopwords();
    let tokenized = tokenize_corpus(&transcripts);

    let words: Vec<WordRecord> = match cached(&paths.words(), recomputed) {
        Some(words) => words,
        None => {
            info!(channel = %channel.name, "Counting words");
            let words = count_words(
                &tokenized,
                lexicon,
                &stopwords,
                options.max_reference_zipf,
            );
            artifacts::write_json(&paths.words(), &words)?;
            recomputed = true;
            words
        }
    };

    let stems: Vec<StemRecord> = match cached(&paths.stems(), recomputed) {
        Some(stems) => stems,
        None => {
            info!(channel = %channel.name, "Collecting stems");
            let analysis = collect_stems(&words);
            artifacts::write_json(&paths.stems(), &analysis.records)?;
            recomputed = true;
            analysis.records
        }
    };

    // The index is a pure function of the stem table, so it can be derived
    // from a cached table just as well as a fresh one.
    let unusuality_index = if stems.is_empty() {
        None
    } else {
        Some(stems.iter().map(|r| r.freq_delta.abs()).sum::<f64>() / stems.len() as f64)
    };

    let mut phrase_tables: Vec<Vec<PhraseRecord>> = Vec::new();
    for phrase_len in 2..=options.max_phrase_len {
        let table = match cached(&paths.phrases(phrase_len), recomputed) {
            Some(table) => table,
            None => {
                info!(channel = %channel.name, phrase_len, "Counting phrases");
                let table = count_phrases(&tokenized, phrase_len, &stopwords);
                artifacts::write_json(&paths.phrases(phrase_len), &table)?;
                recomputed = true;
                table
            }
        };
        phrase_tables.push(table);
    }

    let aggregated: Vec<PhraseRecord> = match cached(&paths.phrases_aggregate(), recomputed) {
        Some(table) => table,
        None => {
            let table = aggregate_phrases(&phrase_tables);
            artifacts::write_json(&paths.phrases_aggregate(), &table)?;
            table
        }
    };

    Ok(ChannelSummary {
        channel: channel.name.clone(),
        videos: videos.len(),
        transcripts: transcripts.len(),
        words: words.len(),
        stems: stems.len(),
        phrases: aggregated.len(),
        unusuality_index,
    })
}

/// Tokenize every video's cleaned transcript, with a progress bar — this is
/// the slow part of a cached re-run.
fn tokenize_corpus(transcripts: &TranscriptSet) -> Vec<Vec<Token>> {
    let lines = process_transcript(transcripts);

    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Tokenizing [{bar:30}] {pos}/{len}")
            .unwrap(),
    );

    let tokenized = lines
        .iter()
        .map(|video| {
            pb.inc(1);
            tokenize(&video.join(" "))
        })
        .collect();
    pb.finish_and_clear();

    tokenized
}

fn cached<T: serde::de::DeserializeOwned>(path: &Path, recomputed: bool) -> Option<T> {
    if recomputed {
        return None;
    }
    artifacts::load_json(path)
}

/// Rebuild just the word table from the cached transcript artifact.
pub fn rebuild_words(
    paths: &ChannelPaths,
    lexicon: &ReferenceLexicon,
    max_reference_zipf: f64,
) -> Result<Vec<WordRecord>> {
    let transcripts: TranscriptSet = artifacts::load_json(&paths.transcripts())
        .with_context(|| format!("No cached transcripts at {}", paths.transcripts().display()))?;
    if transcripts.is_empty() {
        anyhow::bail!("Cached transcript set is empty — nothing to analyze");
    }

    let words = count_words(
        &tokenize_corpus(&transcripts),
        lexicon,
        &english_stopwords(),
        max_reference_zipf,
    );
    artifacts::write_json(&paths.words(), &words)?;
    Ok(words)
}

/// Rebuild just the stem table from the cached word table.
pub fn rebuild_stems(paths: &ChannelPaths) -> Result<crate::analysis::stems::StemAnalysis> {
    let words: Vec<WordRecord> = artifacts::load_json(&paths.words())
        .with_context(|| format!("No cached word table at {}", paths.words().display()))?;

    let analysis = collect_stems(&words);
    artifacts::write_json(&paths.stems(), &analysis.records)?;
    Ok(analysis)
}

/// Rebuild one phrase table from the cached transcript artifact.
pub fn rebuild_phrases(paths: &ChannelPaths, phrase_len: usize) -> Result<Vec<PhraseRecord>> {
    let transcripts: TranscriptSet = artifacts::load_json(&paths.transcripts())
        .with_context(|| format!("No cached transcripts at {}", paths.transcripts().display()))?;
    if transcripts.is_empty() {
        anyhow::bail!("Cached transcript set is empty — nothing to analyze");
    }

    let table = count_phrases(
        &tokenize_corpus(&transcripts),
        phrase_len,
        &english_stopwords(),
    );
    artifacts::write_json(&paths.phrases(phrase_len), &table)?;
    Ok(table)
}
