//! Standalone API server (without Dioxus frontend)
//! Use this for API-only testing or backend development.
//!
//! Run with: PORT=3003 cargo run --bin server --features server

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use mediquery_hub::config::Config;
use mediquery_hub::handlers::{
    // Streaming ask endpoint
    ask_handler,
    AnswerServiceState,
    // Guideline lookup proxies
    search_guidelines_handler,
    summarize_guideline_handler,
    guideline_followup_handler,
    GuidelineProxy,
    // Drug lookup proxy
    search_drugs_handler,
    DrugProxy,
    // Question suggestions
    suggestions_handler,
    SuggestionProxy,
    // Status endpoint
    status_handler,
};
use mediquery_hub::infrastructure::database::init_database;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting MediQuery Hub API Server (standalone)...");

    let config = Config::from_env();

    // The standalone server is useless without persistence, so a failed
    // open is fatal here (unlike the fullstack entrypoint).
    if let Err(e) = init_database().await {
        tracing::error!("Failed to open database: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Embedded database ready");

    // Build the application with routes
    let app = Router::new()
        // Streaming ask endpoint (NDJSON passthrough)
        .route("/api/ask", post(ask_handler))
        // Guideline lookup routes
        .route("/api/guidelines/search", post(search_guidelines_handler))
        .route("/api/guidelines/summarize", post(summarize_guideline_handler))
        .route("/api/guidelines/followup", post(guideline_followup_handler))
        // Drug lookup route
        .route("/api/drugs/search", get(search_drugs_handler))
        // Personalized question suggestions
        .route("/api/suggestions", post(suggestions_handler))
        // Upstream reachability report
        .route("/api/status", get(status_handler))
        // Add upstream state as Extensions (NOT with_state)
        .layer(Extension(AnswerServiceState::new(
            &config.answer_api_url,
            config.medsearch_api_key.clone(),
        )))
        .layer(Extension(GuidelineProxy::new(
            config.guideline_api_url.clone(),
            config.medsearch_api_key.clone(),
        )))
        .layer(Extension(DrugProxy::new(
            config.drug_api_url.clone(),
            config.medsearch_api_key.clone(),
        )))
        .layer(Extension(SuggestionProxy::new(
            config.suggestion_api_url.clone(),
            config.medsearch_api_key.clone(),
        )))
        .layer(Extension(config.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Run the server
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server running on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
