//! User database operations

use super::models::UserRecord;
use super::Database;

/// Extension trait for user-related database operations
pub trait UserOps {
    fn create_user(
        &self,
        username: &str,
        email: &str,
    ) -> impl std::future::Future<Output = Result<UserRecord, sqlx::Error>> + Send;
    fn get_user(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<UserRecord>, sqlx::Error>> + Send;
    fn get_user_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserRecord>, sqlx::Error>> + Send;
    /// Deletes the user and, via foreign-key cascade, their history rows.
    /// Returns whether a row was deleted.
    fn delete_user(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<bool, sqlx::Error>> + Send;
}

impl UserOps for Database {
    async fn create_user(&self, username: &str, email: &str) -> Result<UserRecord, sqlx::Error> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await?;

        Ok(UserRecord {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await
    }

    async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
