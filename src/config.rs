//! Server configuration from environment variables.

/// Upstream service endpoints and server settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Streaming answer service base URL
    pub answer_api_url: String,
    /// Guideline search/summarize/followup service base URL
    pub guideline_api_url: String,
    /// Drug lookup service base URL
    pub drug_api_url: String,
    /// Question suggestion service base URL
    pub suggestion_api_url: String,
    /// Optional API key forwarded as a bearer to the upstream services
    pub medsearch_api_key: Option<String>,
    /// HTTP listen port
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            answer_api_url: env_or("ANSWER_API_URL", "https://api.medsearch.example/answer"),
            guideline_api_url: env_or("GUIDELINE_API_URL", "https://api.medsearch.example/guidelines"),
            drug_api_url: env_or("DRUG_API_URL", "https://api.medsearch.example/drugs"),
            suggestion_api_url: env_or("SUGGESTION_API_URL", "https://api.medsearch.example/suggest"),
            medsearch_api_key: std::env::var("MEDSEARCH_API_KEY").ok().filter(|k| !k.is_empty()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            answer_api_url: "https://api.medsearch.example/answer".to_string(),
            guideline_api_url: "https://api.medsearch.example/guidelines".to_string(),
            drug_api_url: "https://api.medsearch.example/drugs".to_string(),
            suggestion_api_url: "https://api.medsearch.example/suggest".to_string(),
            medsearch_api_key: None,
            port: 3001,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_all_upstreams() {
        let config = Config::default();
        assert!(config.answer_api_url.starts_with("https://"));
        assert!(config.guideline_api_url.starts_with("https://"));
        assert!(config.drug_api_url.starts_with("https://"));
        assert!(config.suggestion_api_url.starts_with("https://"));
        assert_eq!(config.port, 3001);
    }
}
