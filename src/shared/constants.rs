//! Application-wide constants shared between client and server code.

/// Trailing debounce applied to lookup inputs before firing a search
pub const DEBOUNCE_MS: u32 = 300;

/// Delay before a cross-tab logout event is acted on. Transient auth-state
/// blips clear and restore the session marker within this window.
pub const LOGOUT_SYNC_GRACE_MS: u32 = 4_000;

/// localStorage key holding the session marker shared across tabs
pub const SESSION_STORAGE_KEY: &str = "mediquery_session";

/// localStorage key for the persisted theme choice
pub const THEME_STORAGE_KEY: &str = "theme";

/// Most recent conversation turns forwarded to the answer service
pub const MAX_HISTORY_MESSAGES: usize = 12;

/// Shown on the dashboard when the suggestion service is unavailable
pub const FALLBACK_SUGGESTIONS: &[&str] = &[
    "What is the first-line treatment for newly diagnosed hypertension?",
    "When should anticoagulation be started in atrial fibrillation?",
    "What are the red flags for acute low back pain?",
    "How should metformin be dosed in chronic kidney disease?",
    "What is the recommended workup for unexplained weight loss?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_suggestions_are_nonempty() {
        assert!(!FALLBACK_SUGGESTIONS.is_empty());
        assert!(FALLBACK_SUGGESTIONS.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_grace_window_exceeds_debounce() {
        assert!(LOGOUT_SYNC_GRACE_MS > DEBOUNCE_MS);
    }
}
