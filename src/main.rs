//! MediQuery Hub - Main Entry Point
//!
//! This file configures the server with Axum routes and the Dioxus application.
//! Uses dioxus::serve() pattern for dx serve compatibility.

use mediquery_hub::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    // IMPORTANT: Use dioxus::server::axum, NOT axum directly
    use dioxus::server::axum::{routing::{get, post}, Extension};

    // Set panic hook to print full backtrace
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("\n=== PANIC CAUGHT ===");
        eprintln!("Panic info: {}", panic_info);
        eprintln!("Backtrace:\n{}", backtrace);
        eprintln!("=== END PANIC ===\n");
    }));

    // Initialize tracing BEFORE dioxus::serve
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting MediQuery Hub...");

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

    // NO #[tokio::main] - dioxus::serve creates its own runtime
    dioxus::serve(|| {
        async move {
            let config = Config::from_env();

            // Open the embedded database before accepting traffic. A failed
            // open disables persistence; the ask and lookup proxies still work.
            match init_database().await {
                Ok(_) => tracing::info!("Embedded database ready"),
                Err(e) => tracing::warn!(
                    "Failed to open database: {}. Conversations and profiles will not persist.",
                    e
                ),
            }

            // Get the base Dioxus router, then mount the thin proxy API.
            // Extensions are layered after all routes so every handler sees them.
            let router = dioxus::server::router(App)
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
                .layer(Extension(config));

            Ok(router)
        }
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    // Log to browser console to confirm WASM loaded
    web_sys::console::log_1(&"[WASM] MediQuery Hub - WASM initialized!".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
