/// Bearer identity extraction for protected routes
pub mod auth;

/// Streaming ask handler
pub mod ask;

/// Guideline lookup proxies (search / summarize / followup)
pub mod guidelines;

/// Drug lookup proxy
pub mod drugs;

/// Question suggestion proxy
pub mod suggestions;

/// Status endpoint
pub mod status;

/// Shared upstream forwarding helpers
pub mod proxy;

use axum::http::StatusCode;

pub use ask::{ask_handler, AnswerServiceState};
pub use auth::require_bearer;
pub use drugs::{search_drugs_handler, DrugProxy};
pub use guidelines::{
    guideline_followup_handler, search_guidelines_handler, summarize_guideline_handler,
    GuidelineProxy,
};
pub use status::status_handler;
pub use suggestions::{suggestions_handler, SuggestionProxy};

/// Reject missing or blank required fields with 400
pub fn require_field(value: Option<String>, name: &str) -> Result<String, (StatusCode, String)> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err((
            StatusCode::BAD_REQUEST,
            format!("Missing required field: {}", name),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_field_passes() {
        assert_eq!(require_field(Some("hi".to_string()), "question").unwrap(), "hi");
    }

    #[test]
    fn test_missing_field_is_bad_request() {
        let (status, message) = require_field(None, "question").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("question"));
    }

    #[test]
    fn test_blank_field_is_bad_request() {
        let (status, _) = require_field(Some("   ".to_string()), "query").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
