use serde::{Deserialize, Serialize};

use super::citation::Citation;

/// One guideline returned by the medical search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineHit {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidelineSearchResponse {
    #[serde(default)]
    pub results: Vec<GuidelineHit>,
}

/// Condensed guideline text with its supporting sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineSummaryResponse {
    pub summary: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowupResponse {
    #[serde(default)]
    pub questions: Vec<String>,
}

/// One drug monograph entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugHit {
    pub name: String,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub drug_class: Option<String>,
    #[serde(default)]
    pub indications: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugSearchResponse {
    #[serde(default)]
    pub results: Vec<DrugHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guideline_search_parses_sparse_results() {
        let json = r#"{"results":[{"title":"2023 AHA AF Guideline","url":"https://example.org/af"}]}"#;
        let response: GuidelineSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert!(response.results[0].organization.is_none());
    }

    #[test]
    fn test_drug_search_parses_empty_body() {
        let response: DrugSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
