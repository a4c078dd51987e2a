//! Database layer.
//!
//! SQLite-backed persistence for users and text-processing history.

mod history;
mod migrations;
mod models;
mod users;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

pub use history::HistoryOps;
pub use models::{OperationType, TextHistoryRecord, UserRecord};
pub use users::UserOps;

/// Handle to the application database.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if necessary) the database under `data_dir` and run
    /// pending migrations.
    pub async fn new(data_dir: &Path) -> Result<Self, sqlx::Error> {
        if !data_dir.exists() {
            std::fs::create_dir_all(data_dir).map_err(sqlx::Error::Io)?;
        }
        let db_path = data_dir.join("studykit.db");

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        info!("Database ready at {}", db_path.display());
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
