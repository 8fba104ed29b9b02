//! SurrealDB database module for conversation persistence
//!
//! This module provides:
//! - Embedded SurrealDB connection (~/.mediquery-hub/surreal/)
//! - Schema definitions for conversations, profiles, and snapshots
//! - Repository layer for CRUD operations

pub mod connection;
pub mod repositories;
pub mod schema;

pub use connection::{init_database, try_get_database, Database};
pub use repositories::{ConversationRepository, ProfileRepository, SnapshotRepository};
pub use schema::run_migrations;
