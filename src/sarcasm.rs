//! Heuristic sarcasm detection.
//!
//! Three independent rules, OR-combined: any one firing flags the comment.
//! Each rule is a pure predicate over the normalized text plus the sentiment
//! label, so they can be unit-tested in isolation. This is deliberately
//! heuristic; false positives are acceptable and expected.

use crate::sentiment::Sentiment;

/// Explicit sarcasm cues, matched case-insensitively as substrings.
const MARKERS: &[&str] = &[
    "/s", "yeah right", "as if", "sure buddy", "what a joke", "yeah sure",
    "of course it", "oh wow", "how original", "shocker", "who knew",
    "big surprise", "slow clap", "10/10",
];

/// Strong praise words; suspicious when the overall score isn't positive.
const PRAISE: &[&str] = &[
    "amazing", "great", "love", "perfect", "best", "awesome", "wonderful",
    "brilliant", "genius", "fantastic",
];

/// Complaint-context words that make exaggerated punctuation read as irony.
const GRIPE_CONTEXT: &[&str] = &[
    "ad", "ads", "another", "again", "always", "every time", "buffering",
    "clickbait", "sponsor", "midroll", "interrupt", "algorithm", "reupload",
    "paywall",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SarcasmRule {
    /// A known sarcasm marker appears anywhere in the text.
    ExplicitMarker,
    /// Strong praise vocabulary without a positive overall score.
    PraiseWithoutPositivity,
    /// `!!!` or `...` next to complaint-context vocabulary.
    ExaggeratedPunctuation,
}

impl SarcasmRule {
    pub const ALL: [SarcasmRule; 3] = [
        SarcasmRule::ExplicitMarker,
        SarcasmRule::PraiseWithoutPositivity,
        SarcasmRule::ExaggeratedPunctuation,
    ];

    /// Pure predicate: does this rule fire for the given comment?
    pub fn applies(&self, text: &str, sentiment: Sentiment) -> bool {
        let lower = text.to_lowercase();
        match self {
            SarcasmRule::ExplicitMarker => MARKERS.iter().any(|m| lower.contains(m)),
            SarcasmRule::PraiseWithoutPositivity => {
                sentiment != Sentiment::Positive
                    && PRAISE.iter().any(|w| contains_word(&lower, w))
            }
            SarcasmRule::ExaggeratedPunctuation => {
                (lower.contains("!!!") || lower.contains("..."))
                    && GRIPE_CONTEXT.iter().any(|w| contains_word(&lower, w))
            }
        }
    }
}

/// Whole-word containment so "ad" doesn't match inside "bad" or "road".
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric() && c != '/')
        .any(|w| w == needle)
        || (needle.contains(' ') && haystack.contains(needle))
}

/// OR-combine every rule.
pub fn is_sarcastic(text: &str, sentiment: Sentiment) -> bool {
    SarcasmRule::ALL.iter().any(|r| r.applies(text, sentiment))
}
