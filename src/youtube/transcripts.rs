// Transcript retrieval and line cleaning.
//
// Transcripts come from a self-hosted caption gateway (YouTube's timedtext
// endpoints are not part of the Data API), fetched with bounded concurrency.
// A video without captions is skipped with a warning — a channel's corpus
// is whatever subset of its videos actually has transcripts.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default caption gateway endpoint (see CAPTION_API_URL).
pub const DEFAULT_CAPTION_URL: &str = "http://localhost:8060";

/// All transcripts for one channel, keyed by video id. BTreeMap keeps the
/// persisted artifact deterministic across runs.
pub type TranscriptSet = BTreeMap<String, Vec<TranscriptLine>>;

/// One caption line. Only `text` feeds the pipeline; timing fields are
/// carried through the artifact for other consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Client for the caption gateway's transcript endpoint.
pub struct CaptionClient {
    client: reqwest::Client,
    base_url: String,
}

impl CaptionClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("lexiscope/0.1 (channel vocabulary analysis)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the transcript for one video as an ordered line array.
    pub async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptLine>> {
        let url = format!("{}/transcript", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("video_id", video_id)])
            .send()
            .await
            .with_context(|| format!("Transcript request failed for video {video_id}"))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Caption gateway returned {status} for video {video_id}");
        }

        response
            .json::<Vec<TranscriptLine>>()
            .await
            .with_context(|| format!("Failed to parse transcript for video {video_id}"))
    }
}

/// Fetch transcripts for many videos with bounded concurrency.
///
/// Failures are per-video: a missing or malformed transcript is logged and
/// skipped, and the remaining videos continue. The result maps video id to
/// its line array for every video that produced one.
pub async fn fetch_transcripts(
    client: &CaptionClient,
    video_ids: &[String],
    concurrency: usize,
) -> TranscriptSet {
    let results: Vec<(String, Result<Vec<TranscriptLine>>)> = stream::iter(video_ids.iter().cloned())
        .map(|video_id| async move {
            let lines = client.fetch(&video_id).await;
            (video_id, lines)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut transcripts = TranscriptSet::new();
    for (video_id, result) in results {
        match result {
            Ok(lines) => {
                transcripts.insert(video_id, lines);
            }
            Err(e) => {
                warn!(video = %video_id, error = %e, "Skipping video without transcript");
            }
        }
    }

    info!(
        transcripts = transcripts.len(),
        requested = video_ids.len(),
        "Transcript retrieval complete"
    );

    transcripts
}

/// Adapter between raw transcript storage and the tokenizer: one cleaned
/// line sequence per video, in the set's (deterministic) video order.
///
/// Non-breaking spaces, embedded newlines, and curly apostrophes all become
/// plain spaces before tokenization sees the text.
pub fn process_transcript(transcripts: &TranscriptSet) -> Vec<Vec<String>> {
    transcripts
        .values()
        .map(|lines| lines.iter().map(|line| clean_line(&line.text)).collect())
        .collect()
}

fn clean_line(text: &str) -> String {
    text.replace(['\u{a0}', '\n', '\u{2019}'], " ")
}
