//! The analysis pipeline: resolve → fetch → score each comment → aggregate.
//!
//! One run per request, no state shared between runs. Per-comment problems
//! (markup-only text, encoding junk) drop that comment and continue; only a
//! missing video ID or an exhausted comment source fails the whole run.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::aggregate::{self, Percentages, Totals, WordCount};
use crate::config::Config;
use crate::normalize::clean_text;
use crate::resolver;
use crate::sarcasm;
use crate::sentiment::{self, Sentiment};
use crate::youtube::{fetch_comments, CommentSource, VideoInfo};

/// |compound| below this marks a comment as worth a human look.
const REVIEW_BAND: f64 = 0.1;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no video id could be extracted from the supplied URL")]
    InvalidInput,
    #[error("comments unavailable: {0}")]
    SourceUnavailable(String),
}

/// One comment after normalization, scoring and sarcasm classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzedComment {
    pub original: String,
    pub author: Option<String>,
    pub sentiment: Sentiment,
    pub compound: f64,
    pub sarcastic: bool,
    /// Sarcastic or too close to neutral to trust the label.
    pub needs_review: bool,
}

/// The complete output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub video_info: VideoInfo,
    pub totals: Totals,
    pub percentages: Percentages,
    pub top_words: Vec<WordCount>,
    pub sample_comments: Vec<AnalyzedComment>,
}

/// Run the full pipeline for one video URL.
///
/// Metadata lookup is soft: a failure there logs a warning and leaves the
/// fields absent. Zero retrievable comments is a valid outcome and yields an
/// all-zero result, not an error.
pub async fn analyze(
    source: &dyn CommentSource,
    cfg: &Config,
    video_url: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let video_id = resolver::extract_video_id(video_url).ok_or(AnalysisError::InvalidInput)?;
    info!(video_id = %video_id, "starting analysis");

    let video_info = match source.video_info(&video_id).await {
        Ok(info) => info,
        Err(e) => {
            warn!(error = %e, "video metadata lookup failed, continuing without it");
            VideoInfo::default()
        }
    };

    let raw_comments = fetch_comments(source, &video_id, cfg)
        .await
        .map_err(|e| AnalysisError::SourceUnavailable(e.to_string()))?;

    let mut analyzed: Vec<AnalyzedComment> = Vec::with_capacity(raw_comments.len());
    let mut cleaned_texts: Vec<String> = Vec::with_capacity(raw_comments.len());

    for raw in raw_comments {
        let cleaned = clean_text(&raw.text);
        if cleaned.is_empty() {
            // Nothing left to score once markup and links are gone.
            continue;
        }

        let (compound, label) = sentiment::analyze(&cleaned);
        let sarcastic = sarcasm::is_sarcastic(&cleaned, label);

        analyzed.push(AnalyzedComment {
            original: raw.text,
            author: Some(raw.author),
            sentiment: label,
            compound,
            sarcastic,
            needs_review: sarcastic || compound.abs() < REVIEW_BAND,
        });
        cleaned_texts.push(cleaned);
    }

    let totals = aggregate::tally(&analyzed);
    let percentages = aggregate::percentages(&totals);
    let top_words = aggregate::top_words(cleaned_texts.iter().map(String::as_str), cfg.top_words);

    let mut sample_comments = analyzed;
    sample_comments.truncate(cfg.sample_size);

    info!(
        total = totals.total_comments,
        positive = totals.positive,
        negative = totals.negative,
        neutral = totals.neutral,
        sarcastic = totals.sarcastic,
        "analysis complete"
    );

    Ok(AnalysisResult {
        video_info,
        totals,
        percentages,
        top_words,
        sample_comments,
    })
}
