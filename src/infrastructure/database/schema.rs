//! Database schema definitions and migrations
//!
//! Defines tables for: conversation, profile, snapshot
//! Uses SurrealQL for schema definitions

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

/// Run all database migrations
pub async fn run_migrations(db: &Surreal<Db>) -> Result<(), String> {
    tracing::info!("Running database migrations...");

    // Create conversation table
    create_conversation_table(db).await?;

    // Create profile table
    create_profile_table(db).await?;

    // Create snapshot table
    create_snapshot_table(db).await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

async fn create_conversation_table(db: &Surreal<Db>) -> Result<(), String> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS conversation SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS conversation_id ON conversation TYPE string;
        DEFINE FIELD IF NOT EXISTS owner_id ON conversation TYPE string;
        DEFINE FIELD IF NOT EXISTS title ON conversation TYPE string;
        DEFINE FIELD IF NOT EXISTS messages ON conversation FLEXIBLE TYPE array DEFAULT [];
        DEFINE FIELD IF NOT EXISTS created_at ON conversation TYPE datetime DEFAULT time::now();
        DEFINE FIELD IF NOT EXISTS updated_at ON conversation TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS idx_conv_id ON conversation FIELDS conversation_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_conv_owner ON conversation FIELDS owner_id;
    "#,
    )
    .await
    .map_err(|e| format!("Failed to create conversation table: {}", e))?;

    Ok(())
}

async fn create_profile_table(db: &Surreal<Db>) -> Result<(), String> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS profile SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS user_id ON profile TYPE string;
        DEFINE FIELD IF NOT EXISTS email ON profile TYPE string;
        DEFINE FIELD IF NOT EXISTS display_name ON profile TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS occupation ON profile TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS specialties ON profile TYPE array DEFAULT [];
        DEFINE FIELD IF NOT EXISTS institution ON profile TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS created_at ON profile TYPE datetime DEFAULT time::now();
        DEFINE FIELD IF NOT EXISTS updated_at ON profile TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS idx_profile_user ON profile FIELDS user_id UNIQUE;
    "#,
    )
    .await
    .map_err(|e| format!("Failed to create profile table: {}", e))?;

    Ok(())
}

async fn create_snapshot_table(db: &Surreal<Db>) -> Result<(), String> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS snapshot SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS share_id ON snapshot TYPE string;
        DEFINE FIELD IF NOT EXISTS title ON snapshot TYPE string;
        DEFINE FIELD IF NOT EXISTS owner_id ON snapshot TYPE string;
        DEFINE FIELD IF NOT EXISTS threads ON snapshot FLEXIBLE TYPE array DEFAULT [];
        DEFINE FIELD IF NOT EXISTS created_at ON snapshot TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS idx_snapshot_share ON snapshot FIELDS share_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_snapshot_owner ON snapshot FIELDS owner_id;
    "#,
    )
    .await
    .map_err(|e| format!("Failed to create snapshot table: {}", e))?;

    Ok(())
}
