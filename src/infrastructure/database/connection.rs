//! SurrealDB connection management
//!
//! Provides embedded database connection stored in ~/.mediquery-hub/surreal/

use std::path::PathBuf;
use std::sync::Arc;
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;
use tokio::sync::OnceCell;

use super::schema::run_migrations;

/// Database connection wrapper
pub type Database = Arc<Surreal<Db>>;

/// Global database instance (singleton)
static DB: OnceCell<Database> = OnceCell::const_new();

/// Get the database directory path.
/// `MEDIQUERY_DB_DIR` overrides the default ~/.mediquery-hub/surreal/
fn get_db_path() -> Result<PathBuf, String> {
    let db_path = match std::env::var("MEDIQUERY_DB_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME")
                .map_err(|_| "HOME environment variable not set".to_string())?;
            PathBuf::from(home).join(".mediquery-hub").join("surreal")
        }
    };

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&db_path)
        .map_err(|e| format!("Failed to create database directory: {}", e))?;

    Ok(db_path)
}

/// Initialize the database connection
/// This should be called once at application startup
pub async fn init_database() -> Result<Database, String> {
    // Return existing connection if already initialized
    if let Some(db) = DB.get() {
        return Ok(db.clone());
    }

    let db_path = get_db_path()?;

    tracing::info!("Initializing SurrealDB at {:?}", db_path);

    // Connect to embedded RocksDB
    let db = Surreal::new::<RocksDb>(db_path)
        .await
        .map_err(|e| format!("Failed to connect to SurrealDB: {}", e))?;

    // Select namespace and database
    db.use_ns("mediquery")
        .use_db("main")
        .await
        .map_err(|e| format!("Failed to select namespace/database: {}", e))?;

    // Run migrations
    run_migrations(&db).await?;

    let db = Arc::new(db);

    // Store in global singleton
    DB.set(db.clone())
        .map_err(|_| "Database already initialized".to_string())?;

    tracing::info!("SurrealDB initialized successfully");

    Ok(db)
}

/// Try to get the database connection (returns None if not initialized)
pub fn try_get_database() -> Option<Database> {
    DB.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_db_path() {
        let result = get_db_path();
        assert!(result.is_ok());
    }
}
