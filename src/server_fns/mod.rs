//! Server functions for Dioxus Fullstack
//! These functions run on the server and are callable from the client

use dioxus::prelude::*;

use crate::domain::models::{Conversation, ConversationSummary, PublicChatSnapshot, UserProfile};

// ============================================================
// Snapshot Cache (server-side only)
// ============================================================
mod cache {
    use dashmap::DashMap;
    use once_cell::sync::Lazy;
    use std::time::{Duration, Instant};

    /// Cached snapshot with timestamp for TTL
    pub struct CachedSnapshot {
        pub snapshot: crate::domain::models::PublicChatSnapshot,
        pub cached_at: Instant,
    }

    /// Global cache for published snapshots (thread-safe)
    /// TTL: 5 minutes - snapshots are immutable, this only bounds memory
    pub static SNAPSHOT_CACHE: Lazy<DashMap<String, CachedSnapshot>> = Lazy::new(DashMap::new);

    /// Cache TTL: 5 minutes
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Get from cache if not expired
    #[allow(dead_code)]
    pub fn get_cached(share_id: &str) -> Option<crate::domain::models::PublicChatSnapshot> {
        if let Some(entry) = SNAPSHOT_CACHE.get(share_id) {
            if entry.cached_at.elapsed() < CACHE_TTL {
                return Some(entry.snapshot.clone());
            } else {
                // Expired, remove from cache
                drop(entry);
                SNAPSHOT_CACHE.remove(share_id);
            }
        }
        None
    }

    /// Insert into cache
    #[allow(dead_code)]
    pub fn set_cached(share_id: &str, snapshot: crate::domain::models::PublicChatSnapshot) {
        SNAPSHOT_CACHE.insert(
            share_id.to_string(),
            CachedSnapshot {
                snapshot,
                cached_at: Instant::now(),
            },
        );
    }
}

/// List conversation summaries for a user, most recently updated first
#[server]
pub async fn list_conversations(user_id: String) -> Result<Vec<ConversationSummary>, ServerFnError> {
    use crate::infrastructure::database::{init_database, ConversationRepository};

    tracing::info!("list_conversations called for user");

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let records = ConversationRepository::find_by_owner(&db, &user_id)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    Ok(records.into_iter().map(|r| r.into_summary()).collect())
}

/// Get a single conversation with its full message list.
/// Returns None when the conversation does not exist or belongs to
/// another user.
#[server]
pub async fn get_conversation(
    user_id: String,
    conversation_id: String,
) -> Result<Option<Conversation>, ServerFnError> {
    use crate::infrastructure::database::{init_database, ConversationRepository};

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let record = ConversationRepository::find_by_id(&db, &conversation_id)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    Ok(record
        .filter(|r| r.owner_id == user_id)
        .map(|r| r.into_conversation()))
}

/// Create or update a conversation, replacing its entire message list.
/// Returns the saved conversation with the server-set updated_at.
#[server]
pub async fn save_conversation(conversation: Conversation) -> Result<Conversation, ServerFnError> {
    use crate::infrastructure::database::{init_database, ConversationRepository};
    use crate::shared::logging::log_conversation_saved;

    if conversation.id.trim().is_empty() {
        return Err(ServerFnError::new("Conversation id cannot be empty"));
    }
    if conversation.owner_id.trim().is_empty() {
        return Err(ServerFnError::new("Conversation owner cannot be empty"));
    }

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let record = ConversationRepository::upsert(&db, conversation)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    log_conversation_saved(&record.conversation_id, record.messages.len());

    Ok(record.into_conversation())
}

/// Rename a conversation
#[server]
pub async fn rename_conversation(
    user_id: String,
    conversation_id: String,
    title: String,
) -> Result<(), ServerFnError> {
    use crate::infrastructure::database::{init_database, ConversationRepository};

    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(ServerFnError::new("Title cannot be empty"));
    }

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    ConversationRepository::rename(&db, &conversation_id, &user_id, &title)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    Ok(())
}

/// Delete a conversation. Snapshots published from it stay available.
#[server]
pub async fn delete_conversation(
    user_id: String,
    conversation_id: String,
) -> Result<(), ServerFnError> {
    use crate::infrastructure::database::{init_database, ConversationRepository};

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    ConversationRepository::delete(&db, &conversation_id, &user_id)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    Ok(())
}

/// Get a user's profile, or None if they have not saved one yet
#[server]
pub async fn get_profile(user_id: String) -> Result<Option<UserProfile>, ServerFnError> {
    use crate::infrastructure::database::{init_database, ProfileRepository};

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let record = ProfileRepository::find_by_user(&db, &user_id)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    Ok(record.map(|r| r.into_profile()))
}

/// Create or update a user's profile.
/// Returns the saved profile with the server-set updated_at.
#[server]
pub async fn update_profile(profile: UserProfile) -> Result<UserProfile, ServerFnError> {
    use crate::infrastructure::database::{init_database, ProfileRepository};
    use crate::shared::logging::log_profile_updated;

    if profile.user_id.trim().is_empty() {
        return Err(ServerFnError::new("Profile user id cannot be empty"));
    }
    if profile.email.trim().is_empty() {
        return Err(ServerFnError::new("Profile email cannot be empty"));
    }

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let record = ProfileRepository::upsert(&db, profile)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    log_profile_updated(&record.user_id);

    Ok(record.into_profile())
}

/// Publish a read-only snapshot of a conversation and return its share id.
/// Publishing the same conversation content twice returns the same id.
#[server]
pub async fn publish_snapshot(
    user_id: String,
    conversation_id: String,
) -> Result<String, ServerFnError> {
    use crate::infrastructure::database::{
        init_database, ConversationRepository, SnapshotRepository,
    };
    use crate::shared::logging::log_snapshot_published;

    tracing::info!("publish_snapshot called for conversation {}", conversation_id);

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let conversation = ConversationRepository::find_by_id(&db, &conversation_id)
        .await
        .map_err(|e| ServerFnError::new(e))?
        .filter(|r| r.owner_id == user_id)
        .map(|r| r.into_conversation())
        .ok_or_else(|| ServerFnError::new("Conversation not found"))?;

    let snapshot = PublicChatSnapshot::from_conversation(&conversation);
    if snapshot.threads.is_empty() {
        return Err(ServerFnError::new(
            "Conversation has no completed answers to share",
        ));
    }

    let record = SnapshotRepository::create(&db, snapshot)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    log_snapshot_published(&record.share_id, record.threads.len());

    Ok(record.share_id)
}

/// Get a published snapshot by share id. No user identity required;
/// share links are public.
#[server]
pub async fn get_public_snapshot(
    share_id: String,
) -> Result<Option<PublicChatSnapshot>, ServerFnError> {
    use crate::infrastructure::database::{init_database, SnapshotRepository};

    if let Some(cached) = cache::get_cached(&share_id) {
        return Ok(Some(cached));
    }

    let db = init_database().await.map_err(|e| ServerFnError::new(e))?;
    let record = SnapshotRepository::find_by_share_id(&db, &share_id)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    let snapshot = record.map(|r| r.into_snapshot());
    if let Some(ref snapshot) = snapshot {
        cache::set_cached(&share_id, snapshot.clone());
    }

    Ok(snapshot)
}
