//! Guideline lookup proxies
//!
//! Three thin POST proxies onto the guideline service: search, summarize,
//! and follow-up generation. Validation happens here; the upstream response
//! is forwarded verbatim.

use axum::{
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::Response,
    Extension,
};
use serde::Deserialize;

use super::auth::require_bearer;
use super::proxy::{forward_post, UpstreamService};
use super::require_field;
use crate::shared::logging::log_guideline_search;

/// Guideline service proxy state
#[derive(Clone)]
pub struct GuidelineProxy(pub UpstreamService);

impl GuidelineProxy {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self(UpstreamService::new("guideline", base_url, api_key))
    }
}

#[derive(Debug, Deserialize)]
pub struct GuidelineSearchBody {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub year_from: Option<u16>,
}

/// POST /api/guidelines/search
pub async fn search_guidelines_handler(
    Extension(proxy): Extension<GuidelineProxy>,
    headers: HeaderMap,
    Json(body): Json<GuidelineSearchBody>,
) -> Result<Response, (StatusCode, String)> {
    require_bearer(&headers)
        .map_err(|status| (status, "Missing bearer identity".to_string()))?;
    let query = require_field(body.query, "query")?;

    log_guideline_search(query.chars().count());

    let mut payload = serde_json::json!({ "query": query });
    if let Some(organization) = body.organization {
        payload["organization"] = serde_json::json!(organization);
    }
    if let Some(year_from) = body.year_from {
        payload["year_from"] = serde_json::json!(year_from);
    }

    forward_post(&proxy.0, "search", payload).await
}

#[derive(Debug, Deserialize)]
pub struct GuidelineSummarizeBody {
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /api/guidelines/summarize
pub async fn summarize_guideline_handler(
    Extension(proxy): Extension<GuidelineProxy>,
    headers: HeaderMap,
    Json(body): Json<GuidelineSummarizeBody>,
) -> Result<Response, (StatusCode, String)> {
    require_bearer(&headers)
        .map_err(|status| (status, "Missing bearer identity".to_string()))?;
    let url = require_field(body.url, "url")?;

    forward_post(&proxy.0, "summarize", serde_json::json!({ "url": url })).await
}

#[derive(Debug, Deserialize)]
pub struct GuidelineFollowupBody {
    #[serde(default)]
    pub summary: Option<String>,
}

/// POST /api/guidelines/followup
pub async fn guideline_followup_handler(
    Extension(proxy): Extension<GuidelineProxy>,
    headers: HeaderMap,
    Json(body): Json<GuidelineFollowupBody>,
) -> Result<Response, (StatusCode, String)> {
    require_bearer(&headers)
        .map_err(|status| (status, "Missing bearer identity".to_string()))?;
    let summary = require_field(body.summary, "summary")?;

    forward_post(&proxy.0, "followup", serde_json::json!({ "summary": summary })).await
}
