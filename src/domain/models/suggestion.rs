use serde::{Deserialize, Serialize};

/// Request body for the suggestion proxy
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SuggestionRequest {
    /// Specialties from the user profile; empty means general suggestions
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Starter questions shown on an empty chat dashboard
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}
