//! Comment and metadata retrieval from the YouTube Data API v3.
//!
//! The network boundary sits behind the [`CommentSource`] trait so the fetch
//! loop (pagination, cap, retries, backoff) is testable against a scripted
//! source. Retries only happen here; everything downstream is pure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::config::{Config, FetchPolicy};

/// One top-level comment as returned by the comment source.
#[derive(Debug, Clone)]
pub struct RawComment {
    pub id: String,
    pub author: String,
    /// Display text; may contain HTML entities and tags.
    pub text: String,
    pub published_at: String,
    pub like_count: u64,
}

/// One page of comments plus the continuation token, if any.
#[derive(Debug, Default)]
pub struct CommentPage {
    pub comments: Vec<RawComment>,
    pub next_page: Option<String>,
}

/// Video metadata. Every field is optional; lookup failures downgrade to
/// absent fields instead of failing the analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub channel: Option<String>,
    pub views: Option<u64>,
}

/// A paginated, fallible provider of comments and video metadata.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_page(&self, video_id: &str, page_token: Option<&str>) -> Result<CommentPage>;
    async fn video_info(&self, video_id: &str) -> Result<VideoInfo>;
}

// ============================================================================
// YouTube Data API v3 client
// ============================================================================

pub struct YoutubeClient {
    client: Client,
    api_key: String,
    page_size: usize,
}

impl YoutubeClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            page_size: cfg.page_size.min(100), // API maximum
        })
    }
}

#[derive(Debug, Deserialize)]
struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<ThreadItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThreadItem {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    id: String,
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    text_display: String,
    #[serde(default)]
    author_display_name: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    like_count: u64,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    title: String,
    channel_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    // The API returns counters as strings.
    view_count: Option<String>,
}

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn fetch_page(&self, video_id: &str, page_token: Option<&str>) -> Result<CommentPage> {
        let mut url = format!(
            "https://www.googleapis.com/youtube/v3/commentThreads?part=snippet&videoId={}&maxResults={}&key={}",
            video_id, self.page_size, self.api_key
        );
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(token);
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("commentThreads request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("YouTube API returned status {}", response.status());
        }

        let data: CommentThreadsResponse = response
            .json()
            .await
            .context("failed to parse commentThreads response")?;

        let comments = data
            .items
            .into_iter()
            .map(|item| {
                let top = item.snippet.top_level_comment;
                RawComment {
                    id: top.id,
                    author: top.snippet.author_display_name,
                    text: top.snippet.text_display,
                    published_at: top.snippet.published_at,
                    like_count: top.snippet.like_count,
                }
            })
            .collect();

        Ok(CommentPage {
            comments,
            next_page: data.next_page_token,
        })
    }

    async fn video_info(&self, video_id: &str) -> Result<VideoInfo> {
        let url = format!(
            "https://www.googleapis.com/youtube/v3/videos?part=snippet,statistics&id={}&key={}",
            video_id, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("videos request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("YouTube API returned status {}", response.status());
        }

        let data: VideosResponse = response
            .json()
            .await
            .context("failed to parse videos response")?;

        let Some(item) = data.items.into_iter().next() else {
            anyhow::bail!("video {} not found", video_id);
        };

        let views = item
            .statistics
            .and_then(|s| s.view_count)
            .and_then(|v| v.parse().ok());

        Ok(VideoInfo {
            title: Some(item.snippet.title),
            channel: Some(item.snippet.channel_title),
            views,
        })
    }
}

// ============================================================================
// Fetch loop: pagination + cap + retries
// ============================================================================

/// Retrieve up to `cfg.max_comments` comments for a video.
///
/// Pages until the cap is hit or the source runs out. Each page request gets
/// `cfg.max_retries` attempts with exponential backoff and jitter. On retry
/// exhaustion the whole fetch fails, unless the policy is
/// [`FetchPolicy::BestEffort`] and something was already retrieved. Comments
/// with a blank author or text are dropped here, before any scoring.
pub async fn fetch_comments(
    source: &dyn CommentSource,
    video_id: &str,
    cfg: &Config,
) -> Result<Vec<RawComment>> {
    let mut comments: Vec<RawComment> = Vec::new();
    let mut page_token: Option<String> = None;
    let mut dropped = 0usize;

    loop {
        if comments.len() >= cfg.max_comments {
            debug!(cap = cfg.max_comments, "comment cap reached");
            break;
        }

        let page = match fetch_page_with_retry(source, video_id, page_token.as_deref(), cfg).await {
            Ok(page) => page,
            Err(e) => {
                if cfg.fetch_policy == FetchPolicy::BestEffort && !comments.is_empty() {
                    warn!(
                        error = %e,
                        fetched = comments.len(),
                        "page fetch failed, keeping partial set (best-effort policy)"
                    );
                    break;
                }
                return Err(e);
            }
        };

        let page_len = page.comments.len();
        for comment in page.comments {
            if comments.len() >= cfg.max_comments {
                break;
            }
            if comment.text.trim().is_empty() || comment.author.trim().is_empty() {
                dropped += 1;
                continue;
            }
            comments.push(comment);
        }

        if page.next_page.is_none() || page_len == 0 {
            break;
        }
        page_token = page.next_page;
    }

    if dropped > 0 {
        debug!(dropped, "dropped comments with missing author/text");
    }
    info!(video_id, count = comments.len(), "comment fetch complete");
    Ok(comments)
}

async fn fetch_page_with_retry(
    source: &dyn CommentSource,
    video_id: &str,
    page_token: Option<&str>,
    cfg: &Config,
) -> Result<CommentPage> {
    let mut last_err = anyhow::anyhow!("no fetch attempts made");

    for attempt in 1..=cfg.max_retries.max(1) {
        match source.fetch_page(video_id, page_token).await {
            Ok(page) => return Ok(page),
            Err(e) => {
                warn!(attempt, max = cfg.max_retries, error = %e, "comment page request failed");
                last_err = e;
                if attempt < cfg.max_retries {
                    let backoff = cfg.backoff_base * 2u32.pow(attempt - 1);
                    let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
                    sleep(backoff + jitter).await;
                }
            }
        }
    }

    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays a fixed script of page results, counting calls.
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<CommentPage>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<CommentPage>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommentSource for ScriptedSource {
        async fn fetch_page(&self, _video_id: &str, _token: Option<&str>) -> Result<CommentPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(CommentPage::default()))
        }

        async fn video_info(&self, _video_id: &str) -> Result<VideoInfo> {
            Ok(VideoInfo::default())
        }
    }

    fn comment(n: usize) -> RawComment {
        RawComment {
            id: format!("c{n}"),
            author: format!("user{n}"),
            text: format!("comment number {n}"),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            like_count: 0,
        }
    }

    fn page(ids: std::ops::Range<usize>, next: Option<&str>) -> CommentPage {
        CommentPage {
            comments: ids.map(comment).collect(),
            next_page: next.map(str::to_string),
        }
    }

    fn fast_config() -> Config {
        Config {
            backoff_base: Duration::from_millis(1),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_paginates_until_exhausted() {
        let source = ScriptedSource::new(vec![
            Ok(page(0..3, Some("t1"))),
            Ok(page(3..5, None)),
        ]);
        let comments = fetch_comments(&source, "vid", &fast_config()).await.unwrap();
        assert_eq!(comments.len(), 5);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_honors_comment_cap() {
        let source = ScriptedSource::new(vec![
            Ok(page(0..4, Some("t1"))),
            Ok(page(4..8, Some("t2"))),
            Ok(page(8..12, Some("t3"))),
        ]);
        let cfg = Config {
            max_comments: 6,
            ..fast_config()
        };
        let comments = fetch_comments(&source, "vid", &cfg).await.unwrap();
        assert_eq!(comments.len(), 6);
        // Third page never requested.
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retries_then_fails_whole() {
        let source = ScriptedSource::new(vec![
            Err(anyhow::anyhow!("quota exceeded")),
            Err(anyhow::anyhow!("quota exceeded")),
            Err(anyhow::anyhow!("quota exceeded")),
        ]);
        let cfg = fast_config();
        let result = fetch_comments(&source, "vid", &cfg).await;
        assert!(result.is_err());
        assert_eq!(source.call_count(), cfg.max_retries as usize);
    }

    #[tokio::test]
    async fn test_transient_failure_recovers() {
        let source = ScriptedSource::new(vec![
            Err(anyhow::anyhow!("connection reset")),
            Ok(page(0..2, None)),
        ]);
        let comments = fetch_comments(&source, "vid", &fast_config()).await.unwrap();
        assert_eq!(comments.len(), 2);
    }

    #[tokio::test]
    async fn test_best_effort_keeps_partial() {
        let source = ScriptedSource::new(vec![
            Ok(page(0..3, Some("t1"))),
            Err(anyhow::anyhow!("boom")),
            Err(anyhow::anyhow!("boom")),
            Err(anyhow::anyhow!("boom")),
        ]);
        let cfg = Config {
            fetch_policy: FetchPolicy::BestEffort,
            ..fast_config()
        };
        let comments = fetch_comments(&source, "vid", &cfg).await.unwrap();
        assert_eq!(comments.len(), 3);
    }

    #[tokio::test]
    async fn test_best_effort_with_nothing_fetched_still_fails() {
        let source = ScriptedSource::new(vec![
            Err(anyhow::anyhow!("boom")),
            Err(anyhow::anyhow!("boom")),
            Err(anyhow::anyhow!("boom")),
        ]);
        let cfg = Config {
            fetch_policy: FetchPolicy::BestEffort,
            ..fast_config()
        };
        assert!(fetch_comments(&source, "vid", &cfg).await.is_err());
    }

    #[tokio::test]
    async fn test_drops_blank_author_or_text() {
        let mut bad_page = page(0..2, None);
        bad_page.comments.push(RawComment {
            id: "blank-text".to_string(),
            author: "someone".to_string(),
            text: "   ".to_string(),
            published_at: String::new(),
            like_count: 0,
        });
        bad_page.comments.push(RawComment {
            id: "blank-author".to_string(),
            author: String::new(),
            text: "hello".to_string(),
            published_at: String::new(),
            like_count: 0,
        });
        let source = ScriptedSource::new(vec![Ok(bad_page)]);
        let comments = fetch_comments(&source, "vid", &fast_config()).await.unwrap();
        assert_eq!(comments.len(), 2);
    }
}
