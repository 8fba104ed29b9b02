//! Repository layer for database operations
//!
//! Provides type-safe CRUD operations for:
//! - Conversations
//! - Profiles
//! - Public chat snapshots

pub mod conversation_repo;
pub mod profile_repo;
pub mod snapshot_repo;

pub use conversation_repo::ConversationRepository;
pub use profile_repo::ProfileRepository;
pub use snapshot_repo::SnapshotRepository;
