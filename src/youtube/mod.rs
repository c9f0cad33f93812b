// YouTube access — video listing, transcript retrieval, line cleaning.
//
// Each submodule handles one area of the retrieval surface. The pipeline
// driver only sees the VideoSource trait, so tests can run it against a
// fixture source with no network.

pub mod client;
pub mod transcripts;
pub mod videos;

use anyhow::Result;
use async_trait::async_trait;

use client::YouTubeClient;
use transcripts::{CaptionClient, TranscriptSet};
use videos::VideoEntry;

/// Where channel videos and their transcripts come from.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// List a channel's videos, newest first.
    async fn list_videos(&self, channel_id: &str) -> Result<Vec<VideoEntry>>;

    /// Fetch transcripts for the given videos, skipping videos that have
    /// none. Keys of the result are video ids.
    async fn fetch_transcripts(&self, video_ids: &[String]) -> Result<TranscriptSet>;
}

/// The real source: Data API for listings, caption gateway for transcripts.
pub struct YouTubeSource {
    api: YouTubeClient,
    captions: CaptionClient,
    concurrency: usize,
}

impl YouTubeSource {
    pub fn new(api: YouTubeClient, captions: CaptionClient, concurrency: usize) -> Self {
        Self {
            api,
            captions,
            concurrency,
        }
    }
}

#[async_trait]
impl VideoSource for YouTubeSource {
    async fn list_videos(&self, channel_id: &str) -> Result<Vec<VideoEntry>> {
        videos::fetch_channel_videos(&self.api, channel_id).await
    }

    async fn fetch_transcripts(&self, video_ids: &[String]) -> Result<TranscriptSet> {
        Ok(transcripts::fetch_transcripts(&self.captions, video_ids, self.concurrency).await)
    }
}
