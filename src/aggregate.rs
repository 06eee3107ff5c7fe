//! Statistics over a batch of analyzed comments: label tallies, percentage
//! breakdown, and the top-words frequency table.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

use crate::pipeline::AnalyzedComment;
use crate::sentiment::Sentiment;

/// Tokens shorter than this never make the word table.
pub const MIN_TOKEN_LEN: usize = 3;

/// Stopword set, v1. Plain static list so tokenization behaves identically
/// offline and in tests; extend deliberately, never at runtime.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "all", "any", "can",
        "her", "was", "one", "our", "out", "day", "get", "has", "him", "his",
        "how", "man", "new", "now", "old", "see", "two", "way", "who", "did",
        "its", "let", "put", "say", "she", "too", "use", "that", "this",
        "with", "have", "from", "they", "will", "what", "when", "your",
        "there", "their", "would", "about", "which", "were", "been", "them",
        "then", "than", "some", "into", "just", "like", "over", "also",
        "because", "very", "really", "much", "more", "most", "only", "even",
        "here", "video", "videos", "youtube",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Totals {
    pub total_comments: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub sarcastic: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Percentages {
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub sarcastic_pct: f64,
}

/// Lowercase and split normalized text into countable tokens, dropping
/// stopwords and anything shorter than [`MIN_TOKEN_LEN`]. Idempotent:
/// feeding its own output back yields the same token multiset.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN && !STOPWORDS.contains(*w))
        .map(str::to_string)
        .collect()
}

/// Count word frequencies across comments. Ties are broken by first-seen
/// order, tracked with an explicit index so a parallel merge + re-sort would
/// produce the same ordering.
pub fn top_words<'a, I: IntoIterator<Item = &'a str>>(texts: I, cap: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, (u64, usize)> = HashMap::new();
    let mut next_idx = 0usize;

    for text in texts {
        for word in tokenize_words(text) {
            let entry = counts.entry(word).or_insert_with(|| {
                let idx = next_idx;
                next_idx += 1;
                (0, idx)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(String, u64, usize)> =
        counts.into_iter().map(|(w, (c, i))| (w, c, i)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(cap)
        .map(|(word, count, _)| WordCount { word, count })
        .collect()
}

/// Tally sentiment labels and the independent sarcasm flag.
pub fn tally(comments: &[AnalyzedComment]) -> Totals {
    let mut totals = Totals::default();
    for c in comments {
        totals.total_comments += 1;
        match c.sentiment {
            Sentiment::Positive => totals.positive += 1,
            Sentiment::Negative => totals.negative += 1,
            Sentiment::Neutral => totals.neutral += 1,
        }
        if c.sarcastic {
            totals.sarcastic += 1;
        }
    }
    totals
}

fn pct(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0 / total as f64 * 10.0).round() / 10.0
}

/// Percentage breakdown, one decimal place. All zeros when there are no
/// comments rather than dividing by zero.
pub fn percentages(totals: &Totals) -> Percentages {
    Percentages {
        positive_pct: pct(totals.positive, totals.total_comments),
        negative_pct: pct(totals.negative, totals.total_comments),
        neutral_pct: pct(totals.neutral, totals.total_comments),
        sarcastic_pct: pct(totals.sarcastic, totals.total_comments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(sentiment: Sentiment, sarcastic: bool) -> AnalyzedComment {
        AnalyzedComment {
            original: String::new(),
            author: Some("a".to_string()),
            sentiment,
            compound: 0.0,
            sarcastic,
            needs_review: false,
        }
    }

    #[test]
    fn test_tokenize_filters_short_and_stopwords() {
        let tokens = tokenize_words("The camera work in this video is so good");
        assert_eq!(tokens, vec!["camera", "work", "good"]);
    }

    #[test]
    fn test_tokenize_case_insensitive_and_idempotent() {
        let first = tokenize_words("Camera CAMERA camera!");
        assert_eq!(first, vec!["camera", "camera", "camera"]);
        let rejoined = first.join(" ");
        assert_eq!(tokenize_words(&rejoined), first);
    }

    #[test]
    fn test_top_words_ordering_and_ties() {
        let texts = ["editing editing music", "music editing intro"];
        let words = top_words(texts, 20);
        assert_eq!(words[0].word, "editing");
        assert_eq!(words[0].count, 3);
        // "music" (count 2) before "intro" (count 1).
        assert_eq!(words[1].word, "music");
        assert_eq!(words[2].word, "intro");
    }

    #[test]
    fn test_top_words_tie_broken_by_first_seen() {
        let words = top_words(["alpha beta", "beta alpha"], 20);
        assert_eq!(words[0].word, "alpha");
        assert_eq!(words[1].word, "beta");
        assert_eq!(words[0].count, 2);
        assert_eq!(words[1].count, 2);
    }

    #[test]
    fn test_top_words_respects_cap() {
        let words = top_words(["one1 two2 three3 four4 five5"], 3);
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_totals_identity() {
        let comments = vec![
            comment(Sentiment::Positive, false),
            comment(Sentiment::Positive, true),
            comment(Sentiment::Negative, true),
            comment(Sentiment::Neutral, false),
        ];
        let totals = tally(&comments);
        assert_eq!(totals.total_comments, 4);
        assert_eq!(
            totals.positive + totals.negative + totals.neutral,
            totals.total_comments
        );
        assert_eq!(totals.sarcastic, 2);
    }

    #[test]
    fn test_percentages_sum_within_tolerance() {
        let totals = Totals {
            total_comments: 3,
            positive: 1,
            negative: 1,
            neutral: 1,
            sarcastic: 0,
        };
        let p = percentages(&totals);
        let sum = p.positive_pct + p.negative_pct + p.neutral_pct;
        assert!((sum - 100.0).abs() <= 0.3, "sum was {sum}");
    }

    #[test]
    fn test_percentages_zero_when_empty() {
        let p = percentages(&Totals::default());
        assert_eq!(p.positive_pct, 0.0);
        assert_eq!(p.negative_pct, 0.0);
        assert_eq!(p.neutral_pct, 0.0);
        assert_eq!(p.sarcastic_pct, 0.0);
    }
}
