//! Runtime configuration loaded from environment variables.
//!
//! Everything has a working default so the service starts with nothing but
//! `YOUTUBE_API_KEY` set. Values are parsed once at startup and shared
//! read-only through `AppState`.

use std::env;
use std::time::Duration;

/// What to do when a comment page fails after all retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Fail the whole analysis (default). Partial comment sets would skew
    /// the percentages, so nothing is returned once fetching breaks.
    FailWhole,
    /// Keep whatever was fetched before the failure, if anything.
    BestEffort,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// YouTube Data API v3 key.
    pub api_key: String,
    /// Hard cap on comments processed per request.
    pub max_comments: usize,
    /// Comments requested per API page (YouTube caps this at 100).
    pub page_size: usize,
    /// Attempts per page request before giving up.
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries.
    pub backoff_base: Duration,
    /// Timeout for a single HTTP request to the comment source.
    pub request_timeout: Duration,
    /// Entries kept in the top-words table.
    pub top_words: usize,
    /// Analyzed comments included as a sample in the response.
    pub sample_size: usize,
    pub fetch_policy: FetchPolicy,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let policy = match env::var("FETCH_POLICY").unwrap_or_default().to_lowercase().as_str() {
            "best_effort" | "besteffort" | "partial" => FetchPolicy::BestEffort,
            _ => FetchPolicy::FailWhole,
        };

        Self {
            api_key: env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            max_comments: env_parse("MAX_COMMENTS", 800),
            page_size: env_parse("PAGE_SIZE", 100),
            max_retries: env_parse("MAX_RETRIES", 3),
            backoff_base: Duration::from_millis(env_parse("BACKOFF_BASE_MS", 500)),
            request_timeout: Duration::from_secs(env_parse("REQUEST_TIMEOUT_SECS", 15)),
            top_words: env_parse("TOP_WORDS", 20),
            sample_size: env_parse("SAMPLE_COMMENTS", 20),
            fetch_policy: policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_comments: 800,
            page_size: 100,
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
            request_timeout: Duration::from_secs(15),
            top_words: 20,
            sample_size: 20,
            fetch_policy: FetchPolicy::FailWhole,
        }
    }
}
