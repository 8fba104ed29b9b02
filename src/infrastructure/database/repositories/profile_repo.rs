//! Profile repository for database operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use surrealdb::Surreal;

use crate::domain::models::UserProfile;

/// Profile record in database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: Option<Thing>,
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub occupation: Option<String>,
    pub specialties: Vec<String>,
    pub institution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            email: self.email,
            display_name: self.display_name,
            occupation: self.occupation,
            specialties: self.specialties,
            institution: self.institution,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Profile repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// Get profile by user id
    pub async fn find_by_user(
        db: &Surreal<Db>,
        user_id: &str,
    ) -> Result<Option<ProfileRecord>, String> {
        let user_id_owned = user_id.to_string();
        let mut result = db
            .query("SELECT * FROM profile WHERE user_id = $user_id LIMIT 1")
            .bind(("user_id", user_id_owned))
            .await
            .map_err(|e| format!("Failed to query profile: {}", e))?;

        let profile: Option<ProfileRecord> = result
            .take(0)
            .map_err(|e| format!("Failed to get profile: {}", e))?;

        Ok(profile)
    }

    /// Create or update a profile (upsert by user_id)
    pub async fn upsert(db: &Surreal<Db>, profile: UserProfile) -> Result<ProfileRecord, String> {
        // Try to update first
        let result: Option<ProfileRecord> = db
            .query(
                r#"
                UPDATE profile SET
                    email = $email,
                    display_name = $display_name,
                    occupation = $occupation,
                    specialties = $specialties,
                    institution = $institution,
                    updated_at = time::now()
                WHERE user_id = $user_id
                RETURN AFTER
            "#,
            )
            .bind(("user_id", profile.user_id.clone()))
            .bind(("email", profile.email.clone()))
            .bind(("display_name", profile.display_name.clone()))
            .bind(("occupation", profile.occupation.clone()))
            .bind(("specialties", profile.specialties.clone()))
            .bind(("institution", profile.institution.clone()))
            .await
            .map_err(|e| format!("Failed to upsert profile: {}", e))?
            .take(0)
            .map_err(|e| format!("Failed to get upsert result: {}", e))?;

        if let Some(record) = result {
            return Ok(record);
        }

        // If no update happened, insert new record
        let created: Option<ProfileRecord> = db
            .create("profile")
            .content(ProfileRecord {
                id: None,
                user_id: profile.user_id,
                email: profile.email,
                display_name: profile.display_name,
                occupation: profile.occupation,
                specialties: profile.specialties,
                institution: profile.institution,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await
            .map_err(|e| format!("Failed to create profile: {}", e))?;

        created.ok_or_else(|| "Failed to create profile".to_string())
    }
}
