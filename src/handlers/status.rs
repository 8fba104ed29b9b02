//! Status endpoint reporting configured upstreams

use axum::{extract::Json, Extension};
use serde::Serialize;

use crate::config::Config;
use crate::infrastructure::database::try_get_database;

/// GET /api/status
#[derive(Serialize)]
pub struct StatusResponse {
    pub available: bool,
    pub answer_api: String,
    pub guideline_api: String,
    pub drug_api: String,
    pub suggestion_api: String,
    pub database_ready: bool,
}

pub async fn status_handler(Extension(config): Extension<Config>) -> Json<StatusResponse> {
    Json(StatusResponse {
        available: true,
        answer_api: config.answer_api_url.clone(),
        guideline_api: config.guideline_api_url.clone(),
        drug_api: config.drug_api_url.clone(),
        suggestion_api: config.suggestion_api_url.clone(),
        database_ready: try_get_database().is_some(),
    })
}
