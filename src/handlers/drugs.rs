//! Drug lookup proxy

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::Response,
    Extension,
};
use serde::Deserialize;

use super::auth::require_bearer;
use super::proxy::{forward_get, UpstreamService};
use super::require_field;
use crate::shared::logging::log_drug_lookup;

/// Drug service proxy state
#[derive(Clone)]
pub struct DrugProxy(pub UpstreamService);

impl DrugProxy {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self(UpstreamService::new("drug", base_url, api_key))
    }
}

#[derive(Debug, Deserialize)]
pub struct DrugSearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/drugs/search?q=…
pub async fn search_drugs_handler(
    Extension(proxy): Extension<DrugProxy>,
    headers: HeaderMap,
    Query(params): Query<DrugSearchParams>,
) -> Result<Response, (StatusCode, String)> {
    require_bearer(&headers)
        .map_err(|status| (status, "Missing bearer identity".to_string()))?;
    let query = require_field(params.q, "q")?;

    log_drug_lookup(query.chars().count());

    forward_get(&proxy.0, "search", &[("q", query.as_str())]).await
}
