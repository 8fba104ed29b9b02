use reqwasm::http::Request;

use crate::domain::models::{
    DrugSearchResponse, FollowupResponse, GuidelineSearchResponse, GuidelineSummaryResponse,
    SuggestionRequest, SuggestionResponse,
};
use crate::shared::hooks::read_session_marker;
use serde::de::DeserializeOwned;

// API Service for centralized HTTP requests
pub struct ApiService {
    base_url: String,
}

impl ApiService {
    pub fn new() -> Self {
        Self {
            // Empty base means same-origin requests against the serving host
            base_url: String::new(),
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Bearer token for the signed-in user, read from the session marker
    fn auth_header() -> Option<String> {
        read_session_marker().map(|user_id| format!("Bearer {}", user_id))
    }

    // Generic GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, Box<dyn std::error::Error>> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut request = Request::get(&url);
        if let Some(auth) = Self::auth_header() {
            request = request.header("Authorization", &auth);
        }
        let response = request.send().await?;

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()).into());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    // Generic POST request
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Box<dyn std::error::Error>> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut request = Request::post(&url).header("Content-Type", "application/json");
        if let Some(auth) = Self::auth_header() {
            request = request.header("Authorization", &auth);
        }
        let response = request.body(serde_json::to_string(body)?).send().await?;

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()).into());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    // Specific API methods
    pub async fn search_guidelines(
        &self,
        query: &str,
    ) -> Result<GuidelineSearchResponse, Box<dyn std::error::Error>> {
        self.post("/api/guidelines/search", &serde_json::json!({ "query": query }))
            .await
    }

    pub async fn summarize_guideline(
        &self,
        url: &str,
    ) -> Result<GuidelineSummaryResponse, Box<dyn std::error::Error>> {
        self.post("/api/guidelines/summarize", &serde_json::json!({ "url": url }))
            .await
    }

    pub async fn guideline_followups(
        &self,
        summary: &str,
    ) -> Result<FollowupResponse, Box<dyn std::error::Error>> {
        self.post("/api/guidelines/followup", &serde_json::json!({ "summary": summary }))
            .await
    }

    pub async fn search_drugs(
        &self,
        query: &str,
    ) -> Result<DrugSearchResponse, Box<dyn std::error::Error>> {
        self.get(&format!("/api/drugs/search?q={}", urlencoding::encode(query)))
            .await
    }

    pub async fn fetch_suggestions(
        &self,
        specialties: Vec<String>,
    ) -> Result<SuggestionResponse, Box<dyn std::error::Error>> {
        self.post("/api/suggestions", &SuggestionRequest { specialties })
            .await
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}
