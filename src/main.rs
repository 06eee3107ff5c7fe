mod aggregate;
mod api;
mod config;
mod normalize;
mod pipeline;
mod resolver;
mod sarcasm;
mod sentiment;
mod youtube;

use axum::{
    routing::{get, post},
    Router,
};
use dotenv::dotenv;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(api::root, api::analyze_video),
    components(
        schemas(
            api::AnalyzeRequest,
            api::ErrorResponse,
            pipeline::AnalysisResult,
            pipeline::AnalyzedComment,
            aggregate::Totals,
            aggregate::Percentages,
            aggregate::WordCount,
            sentiment::Sentiment,
            youtube::VideoInfo
        )
    ),
    tags(
        (name = "analysis", description = "YouTube comment sentiment analysis")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cfg = Config::from_env();
    if cfg.api_key.is_empty() {
        warn!("YOUTUBE_API_KEY is not set; comment fetching will fail");
    }

    let youtube = youtube::YoutubeClient::new(&cfg)?;
    let state = Arc::new(api::AppState { cfg, youtube });

    let app = Router::new()
        .merge(SwaggerUi::new("/comment-checker-swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::root))
        .route("/analyze_video", post(api::analyze_video))
        // Open CORS so a local frontend can call us during dev.
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
