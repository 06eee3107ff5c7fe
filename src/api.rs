//! HTTP surface: request/response envelopes and the analyze handler.
//!
//! Matches the original service contract: HTTP 200 either way, failures
//! carried as an `error` field instead of statistics.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::config::Config;
use crate::pipeline::{self, AnalysisResult};
use crate::youtube::YoutubeClient;

pub struct AppState {
    pub cfg: Config,
    pub youtube: YoutubeClient,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub video_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Ok(Box<AnalysisResult>),
    Err(ErrorResponse),
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Liveness check")),
    tag = "analysis"
)]
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Comment Checker API is running" }))
}

#[utoipa::path(
    post,
    path = "/analyze_video",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result, or an error envelope", body = AnalysisResult)
    ),
    tag = "analysis"
)]
pub async fn analyze_video(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    match pipeline::analyze(&state.youtube, &state.cfg, &req.video_url).await {
        Ok(result) => Json(AnalyzeResponse::Ok(Box::new(result))),
        Err(e) => {
            error!(error = %e, url = %req.video_url, "analysis failed");
            Json(AnalyzeResponse::Err(ErrorResponse {
                error: e.to_string(),
            }))
        }
    }
}
