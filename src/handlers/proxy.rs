//! Shared forwarding helpers for the thin JSON proxies
//!
//! Upstream non-success statuses and bodies are forwarded verbatim so the
//! client sees exactly what the service returned. Only transport failures
//! are translated (502 Bad Gateway).

use axum::{body::Body, http::StatusCode, response::Response};
use reqwest::Client;

use crate::shared::logging::{log_proxy_error, log_proxy_forward};

/// One configured upstream service
#[derive(Clone)]
pub struct UpstreamService {
    pub name: &'static str,
    pub base_url: String,
    pub api_key: Option<String>,
    pub client: Client,
}

impl UpstreamService {
    pub fn new(name: &'static str, base_url: String, api_key: Option<String>) -> Self {
        Self {
            name,
            base_url,
            api_key,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

/// POST a JSON body upstream and forward the response
pub async fn forward_post(
    service: &UpstreamService,
    path: &str,
    body: serde_json::Value,
) -> Result<Response, (StatusCode, String)> {
    let mut builder = service.client.post(service.endpoint(path)).json(&body);
    if let Some(key) = &service.api_key {
        builder = builder.bearer_auth(key);
    }

    let upstream = builder.send().await.map_err(|e| {
        log_proxy_error(service.name, &e.to_string());
        (
            StatusCode::BAD_GATEWAY,
            format!("{} service unreachable", service.name),
        )
    })?;

    forward_response(service, upstream).await
}

/// GET with query parameters upstream and forward the response
pub async fn forward_get(
    service: &UpstreamService,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Response, (StatusCode, String)> {
    let mut builder = service.client.get(service.endpoint(path)).query(query);
    if let Some(key) = &service.api_key {
        builder = builder.bearer_auth(key);
    }

    let upstream = builder.send().await.map_err(|e| {
        log_proxy_error(service.name, &e.to_string());
        (
            StatusCode::BAD_GATEWAY,
            format!("{} service unreachable", service.name),
        )
    })?;

    forward_response(service, upstream).await
}

async fn forward_response(
    service: &UpstreamService,
    upstream: reqwest::Response,
) -> Result<Response, (StatusCode, String)> {
    let status = upstream.status();
    log_proxy_forward(service.name, status.as_u16());

    let bytes = upstream.bytes().await.map_err(|e| {
        log_proxy_error(service.name, &e.to_string());
        (
            StatusCode::BAD_GATEWAY,
            format!("{} service read failed", service.name),
        )
    })?;

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("Failed to build proxy response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build response".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let service = UpstreamService::new("guideline", "https://api.example.org/".to_string(), None);
        assert_eq!(service.endpoint("/search"), "https://api.example.org/search");
        assert_eq!(service.endpoint("search"), "https://api.example.org/search");
    }
}
