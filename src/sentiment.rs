//! Lexicon-based sentiment scoring.
//!
//! A lightweight VADER-style model: each known word carries a valence in
//! [-4, +4], contextual rules adjust it (negation flips, degree adverbs
//! boost or dampen, ALL-CAPS and trailing exclamation marks amplify), and
//! the summed valence is squashed through `x / sqrt(x^2 + alpha)` so the
//! compound score stays inside [-1, 1] no matter how long the comment is.
//! No bundled lexicon files, no external calls; everything is a static table.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

/// Compound at or above this is classified Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound at or below this is classified Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Multiplier applied to a word's valence when a negator precedes it.
const NEGATION_SCALAR: f64 = -0.74;
/// Valence bump for an ALL-CAPS sentiment word (when the whole text isn't caps).
const CAPS_BOOST: f64 = 0.733;
/// Per-exclamation-mark emphasis, counted up to four marks.
const EXCLAIM_BOOST: f64 = 0.292;
const MAX_EXCLAIM: usize = 4;
/// Normalization constant for the compound squash.
const NORM_ALPHA: f64 = 15.0;
/// How many preceding tokens a negator or booster can reach across.
const CONTEXT_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // Positive
        ("amazing", 2.8), ("awesome", 3.1), ("great", 3.1), ("good", 1.9),
        ("best", 3.2), ("better", 1.9), ("love", 3.2), ("loved", 2.9),
        ("like", 1.5), ("liked", 1.8), ("excellent", 2.7), ("perfect", 2.7),
        ("wonderful", 2.7), ("fantastic", 2.6), ("brilliant", 2.8),
        ("beautiful", 2.9), ("incredible", 2.4), ("outstanding", 2.9),
        ("superb", 3.0), ("enjoy", 2.2), ("enjoyed", 2.3), ("fun", 2.3),
        ("funny", 1.9), ("hilarious", 2.0), ("happy", 2.7), ("glad", 2.0),
        ("thanks", 1.9), ("thank", 1.9), ("helpful", 1.8), ("useful", 1.9),
        ("interesting", 1.7), ("impressive", 2.3), ("win", 2.8), ("winner", 2.8),
        ("cool", 1.3), ("nice", 1.8), ("sweet", 2.0), ("solid", 1.5),
        ("underrated", 1.4), ("legend", 2.4), ("masterpiece", 3.1),
        ("recommend", 1.6), ("favorite", 2.0), ("gem", 1.9), ("quality", 1.4),
        ("clear", 1.2), ("informative", 1.9), ("inspiring", 2.3), ("wow", 2.1),
        ("yes", 1.1), ("right", 1.0), ("agree", 1.5), ("agreed", 1.4),
        // Negative
        ("bad", -2.5), ("terrible", -2.1), ("awful", -2.0), ("horrible", -2.5),
        ("worst", -3.1), ("worse", -2.1), ("hate", -2.7), ("hated", -2.8),
        ("dislike", -1.6), ("disappointing", -2.2), ("disappointed", -2.1),
        ("boring", -1.3), ("annoying", -1.8), ("dumb", -2.3), ("stupid", -2.4),
        ("useless", -1.8), ("trash", -2.2), ("garbage", -2.3), ("cringe", -1.9),
        ("fake", -1.8), ("scam", -2.6), ("clickbait", -1.9), ("lame", -1.8),
        ("waste", -1.8), ("wasted", -2.0), ("wrong", -2.1), ("fail", -2.3),
        ("failed", -2.1), ("broken", -1.6), ("sad", -2.1), ("angry", -2.3),
        ("mad", -2.0), ("upset", -1.9), ("pathetic", -2.5), ("mediocre", -0.8),
        ("misleading", -1.9), ("overrated", -1.5), ("unwatchable", -2.6),
        ("lies", -2.2), ("lying", -2.2), ("toxic", -2.4), ("ugly", -2.4),
        ("poor", -1.9), ("problem", -1.4), ("problems", -1.5), ("issue", -0.8),
        ("no", -1.2), ("ruined", -2.4), ("disaster", -2.5), ("nonsense", -1.7),
    ]
    .into_iter()
    .collect()
});

/// Degree modifiers. Positive values intensify the following sentiment word,
/// negative values dampen it.
static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 0.293), ("really", 0.293), ("extremely", 0.293),
        ("absolutely", 0.293), ("completely", 0.293), ("totally", 0.293),
        ("incredibly", 0.293), ("super", 0.293), ("insanely", 0.293),
        ("highly", 0.293), ("truly", 0.293), ("utterly", 0.293), ("so", 0.293),
        ("slightly", -0.293), ("somewhat", -0.293), ("kinda", -0.293),
        ("kind", -0.293), ("sort", -0.293), ("marginally", -0.293),
        ("almost", -0.293), ("partly", -0.293),
    ]
    .into_iter()
    .collect()
});

static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "never", "none", "neither", "nor", "cannot", "cant", "can't",
        "dont", "don't", "didnt", "didn't", "doesnt", "doesn't", "isnt",
        "isn't", "wasnt", "wasn't", "wont", "won't", "wouldnt", "wouldn't",
        "aint", "ain't", "hardly", "barely", "nothing", "nobody",
    ]
    .into_iter()
    .collect()
});

/// Token with its lookup form and original surface form.
struct Token<'a> {
    lower: String,
    surface: &'a str,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|surface| {
            let lower: String = surface
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '\'')
                .flat_map(|c| c.to_lowercase())
                .collect();
            Token { lower, surface }
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    let mut has_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_alpha
}

/// Compute the compound polarity score for normalized text.
///
/// Always in [-1.0, 1.0]; 0.0 for empty or signal-free input.
pub fn compound_score(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    // When the entire comment is shouted, caps carry no extra emphasis.
    let text_all_caps = {
        let with_alpha: Vec<_> = tokens.iter().filter(|t| !t.lower.is_empty()).collect();
        !with_alpha.is_empty() && with_alpha.iter().all(|t| is_all_caps(t.surface))
    };

    let mut sum = 0.0;
    for (i, token) in tokens.iter().enumerate() {
        let Some(&base) = LEXICON.get(token.lower.as_str()) else {
            continue;
        };
        let mut valence = base;

        if is_all_caps(token.surface) && !text_all_caps {
            valence += CAPS_BOOST * valence.signum();
        }

        let window_start = i.saturating_sub(CONTEXT_WINDOW);
        let mut negated = false;
        for (dist, prev) in tokens[window_start..i].iter().rev().enumerate() {
            if NEGATORS.contains(prev.lower.as_str()) {
                negated = true;
            }
            if let Some(&boost) = BOOSTERS.get(prev.lower.as_str()) {
                // Boosters further from the word count a little less.
                let damp = 1.0 - 0.05 * dist as f64;
                valence += boost * damp * valence.signum();
            }
        }
        if negated {
            valence *= NEGATION_SCALAR;
        }

        sum += valence;
    }

    // Exclamation emphasis pushes the total further in its own direction.
    let exclaims = text.chars().filter(|c| *c == '!').count().min(MAX_EXCLAIM);
    if exclaims > 0 && sum != 0.0 {
        sum += exclaims as f64 * EXCLAIM_BOOST * sum.signum();
    }

    let compound = sum / (sum * sum + NORM_ALPHA).sqrt();
    compound.clamp(-1.0, 1.0)
}

/// Map a compound score to its sentiment label.
///
/// Exactly `POSITIVE_THRESHOLD` is Positive and exactly `NEGATIVE_THRESHOLD`
/// is Negative; the open interval between them is Neutral.
pub fn classify(compound: f64) -> Sentiment {
    if compound >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Score and label in one step.
pub fn analyze(text: &str) -> (f64, Sentiment) {
    let compound = compound_score(text);
    (compound, classify(compound))
}
