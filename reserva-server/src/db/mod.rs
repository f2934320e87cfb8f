//! Database Module
//!
//! Embedded SurrealDB storage: RocksDB-backed on disk for the server,
//! in-memory for tests.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Uniqueness constraints enforced by the store itself, as a backstop
/// behind the repository-level duplicate checks.
const DEFINE_INDEXES: &str = "
    DEFINE INDEX IF NOT EXISTS idx_restaurant_table_number
        ON TABLE restaurant_table COLUMNS number UNIQUE;
    DEFINE INDEX IF NOT EXISTS idx_user_email
        ON TABLE user COLUMNS email UNIQUE;
";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self::init(db).await?;
        tracing::info!(path = %db_path, "Database connection established");
        Ok(service)
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns("reserva")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(DEFINE_INDEXES)
            .await
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_a_database_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reserva.db");

        let service = DbService::new(&path.to_string_lossy()).await.unwrap();
        service.db.query("RETURN 1").await.unwrap();
    }
}
