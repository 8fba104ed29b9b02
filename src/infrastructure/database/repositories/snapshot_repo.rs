//! Snapshot repository for database operations
//!
//! Snapshots are immutable once published; share ids derive from content,
//! so republishing unchanged content returns the existing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use surrealdb::Surreal;

use crate::domain::models::{PublicChatSnapshot, SnapshotThread};

/// Snapshot record in database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: Option<Thing>,
    pub share_id: String,
    pub title: String,
    pub owner_id: String,
    pub threads: Vec<SnapshotThread>,
    pub created_at: DateTime<Utc>,
}

impl SnapshotRecord {
    pub fn into_snapshot(self) -> PublicChatSnapshot {
        PublicChatSnapshot {
            share_id: self.share_id,
            title: self.title,
            owner_id: self.owner_id,
            created_at: self.created_at,
            threads: self.threads,
        }
    }
}

/// Snapshot repository
pub struct SnapshotRepository;

impl SnapshotRepository {
    /// Publish a snapshot; idempotent for identical content
    pub async fn create(
        db: &Surreal<Db>,
        snapshot: PublicChatSnapshot,
    ) -> Result<SnapshotRecord, String> {
        if let Some(existing) = Self::find_by_share_id(db, &snapshot.share_id).await? {
            return Ok(existing);
        }

        let created: Option<SnapshotRecord> = db
            .create("snapshot")
            .content(SnapshotRecord {
                id: None,
                share_id: snapshot.share_id,
                title: snapshot.title,
                owner_id: snapshot.owner_id,
                threads: snapshot.threads,
                created_at: Utc::now(),
            })
            .await
            .map_err(|e| format!("Failed to create snapshot: {}", e))?;

        created.ok_or_else(|| "Failed to create snapshot".to_string())
    }

    /// Get snapshot by its public share id
    pub async fn find_by_share_id(
        db: &Surreal<Db>,
        share_id: &str,
    ) -> Result<Option<SnapshotRecord>, String> {
        let share_id_owned = share_id.to_string();
        let mut result = db
            .query("SELECT * FROM snapshot WHERE share_id = $share_id LIMIT 1")
            .bind(("share_id", share_id_owned))
            .await
            .map_err(|e| format!("Failed to query snapshot: {}", e))?;

        let snapshot: Option<SnapshotRecord> = result
            .take(0)
            .map_err(|e| format!("Failed to get snapshot: {}", e))?;

        Ok(snapshot)
    }
}
