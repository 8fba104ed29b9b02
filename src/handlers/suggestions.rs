//! Question suggestion proxy
//!
//! Failures are forwarded unchanged; the dashboard falls back to its static
//! suggestion list when this endpoint does not answer 200.

use axum::{
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::Response,
    Extension,
};
use serde::Deserialize;

use super::auth::require_bearer;
use super::proxy::{forward_post, UpstreamService};

/// Suggestion service proxy state
#[derive(Clone)]
pub struct SuggestionProxy(pub UpstreamService);

impl SuggestionProxy {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self(UpstreamService::new("suggestion", base_url, api_key))
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionBody {
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// POST /api/suggestions
pub async fn suggestions_handler(
    Extension(proxy): Extension<SuggestionProxy>,
    headers: HeaderMap,
    Json(body): Json<SuggestionBody>,
) -> Result<Response, (StatusCode, String)> {
    require_bearer(&headers)
        .map_err(|status| (status, "Missing bearer identity".to_string()))?;

    forward_post(
        &proxy.0,
        "questions",
        serde_json::json!({ "specialties": body.specialties }),
    )
    .await
}
