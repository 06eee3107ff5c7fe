//! Comment text cleanup before scoring.
//!
//! Comments come back from the API as display HTML: entities, `<br>` tags,
//! anchor-wrapped links. Normalization strips all of that plus raw URLs and
//! control characters, then collapses whitespace. Casing and punctuation are
//! deliberately preserved since both carry sentiment signal (ALL CAPS, "!!!").
//! Pure and deterministic; operates on chars so emoji and non-Latin scripts
//! pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(https?://|www\.)\S+").unwrap());

/// Entities YouTube actually emits in `textDisplay`.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
];

/// Normalize raw comment text. Returns an empty string for comments that
/// are nothing but markup/links; callers drop those.
pub fn clean_text(raw: &str) -> String {
    // <br> and friends become whitespace before tag stripping so words on
    // either side don't get glued together.
    let mut text = raw.replace("<br>", " ").replace("<br/>", " ").replace("<br />", " ");

    for (entity, plain) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, plain);
        }
    }

    let text = TAG.replace_all(&text, " ");
    let text = URL.replace_all(&text, " ");

    let filtered: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_entities() {
        assert_eq!(
            clean_text("this is <b>bold</b> &amp; that&#39;s it"),
            "this is bold & that's it"
        );
    }

    #[test]
    fn test_strips_urls() {
        assert_eq!(
            clean_text("check https://example.com/watch?v=123 out"),
            "check out"
        );
        assert_eq!(clean_text("see www.example.com now"), "see now");
    }

    #[test]
    fn test_preserves_case_and_punctuation() {
        assert_eq!(
            clean_text("This is AMAZING!!!  really..."),
            "This is AMAZING!!! really..."
        );
    }

    #[test]
    fn test_unicode_safe() {
        assert_eq!(clean_text("so good 😍😍"), "so good 😍😍");
        assert_eq!(clean_text("すごい！ 最高"), "すごい！ 最高");
        // Combining marks survive.
        assert_eq!(clean_text("cafe\u{301}"), "cafe\u{301}");
    }

    #[test]
    fn test_control_chars_removed() {
        assert_eq!(clean_text("a\u{0000}b\tc\r\nd"), "a b c d");
    }

    #[test]
    fn test_markup_only_comment_is_empty() {
        assert_eq!(clean_text("<a href=\"https://x.com\">https://x.com</a>"), "");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let once = clean_text("Hello <br> world &amp; https://a.b more");
        assert_eq!(clean_text(&once), once);
    }
}
