// Channel video listing — paginated Data API search retrieval.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::YouTubeClient;

/// A channel video — just the fields the pipeline and its artifacts need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// List all videos of a channel, newest first, following page tokens until
/// the API runs out. Non-video search results (playlists, channels) are
/// filtered out.
pub async fn fetch_channel_videos(
    client: &YouTubeClient,
    channel_id: &str,
) -> Result<Vec<VideoEntry>> {
    let mut videos = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let mut params: Vec<(&str, &str)> = vec![
            ("part", "id,snippet"),
            ("channelId", channel_id),
            ("order", "date"),
            ("maxResults", "50"),
        ];
        if let Some(ref token) = page_token {
            params.push(("pageToken", token));
        }

        let page: SearchResponse = client
            .api_get("search", &params)
            .await
            .with_context(|| format!("Failed to list videos for channel {channel_id}"))?;

        for item in &page.items {
            if item.id.kind != "youtube#video" {
                continue;
            }
            let Some(ref video_id) = item.id.video_id else {
                continue;
            };
            videos.push(VideoEntry {
                video_id: video_id.clone(),
                title: item.snippet.as_ref().and_then(|s| s.title.clone()),
                published_at: item.snippet.as_ref().and_then(|s| s.published_at.clone()),
            });
        }

        debug!(
            page_items = page.items.len(),
            total_collected = videos.len(),
            "Fetched page of channel videos"
        );

        page_token = page.next_page_token;
        if page_token.is_none() || page.items.is_empty() {
            break;
        }
    }

    info!(
        count = videos.len(),
        channel = channel_id,
        "Collected channel video list"
    );

    Ok(videos)
}

// -- Serde types for the search endpoint --

#[derive(Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<SearchSnippet>,
}

#[derive(Deserialize)]
struct SearchItemId {
    kind: String,
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct SearchSnippet {
    title: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}
