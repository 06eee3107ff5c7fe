//! Video ID extraction from the YouTube URL shapes people actually paste.

use once_cell::sync::Lazy;
use regex::Regex;

static YOUTU_BE: Lazy<Regex> = Lazy::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]{6,})").unwrap());
static WATCH_V: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]{6,})").unwrap());
static SHORTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"shorts/([A-Za-z0-9_-]{6,})").unwrap());
// Last resort: anything shaped like a standard 11-char video ID.
static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z0-9_-]{11})").unwrap());

/// Extract a video identifier from a raw URL string.
///
/// Tries the known URL shapes in order: `youtu.be/<id>`, `?v=<id>` / `&v=<id>`,
/// `shorts/<id>`, then falls back to any bare 11-character ID-shaped token.
/// Returns `None` when nothing matches; callers decide whether that is fatal.
pub fn extract_video_id(raw_url: &str) -> Option<String> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return None;
    }

    for re in [&*YOUTU_BE, &*WATCH_V, &*SHORTS] {
        if let Some(caps) = re.captures(raw_url) {
            return Some(caps[1].to_string());
        }
    }

    // Only fall back to a bare token for strings that look YouTube-ish at
    // all, otherwise arbitrary 11-char words in random URLs would match.
    if raw_url.contains("youtube.com") || raw_url.contains("youtu.be") || !raw_url.contains('/') {
        if let Some(caps) = BARE_ID.captures(raw_url) {
            return Some(caps[1].to_string());
        }
    }

    None
}
