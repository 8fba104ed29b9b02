use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinician profile used to personalize answers and suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,

    pub email: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// e.g. "physician", "pharmacist", "nurse practitioner"
    #[serde(default)]
    pub occupation: Option<String>,

    #[serde(default)]
    pub specialties: Vec<String>,

    #[serde(default)]
    pub institution: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name: None,
            occupation: None,
            specialties: Vec::new(),
            institution: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Up to two letters for the navbar avatar
    pub fn initials(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or(&self.email);
        name.split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_from_display_name() {
        let mut profile = UserProfile::new("user-1", "sg@example.org");
        profile.display_name = Some("Sarah Gonzalez".to_string());
        assert_eq!(profile.initials(), "SG");
    }

    #[test]
    fn test_initials_fall_back_to_email() {
        let profile = UserProfile::new("user-1", "sarah@example.org");
        assert_eq!(profile.initials(), "S");
    }

    #[test]
    fn test_profile_parses_without_optional_fields() {
        let json = r#"{
            "user_id": "user-1",
            "email": "a@b.org",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.display_name.is_none());
        assert!(profile.specialties.is_empty());
    }
}
