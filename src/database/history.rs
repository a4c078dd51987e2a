//! Text history database operations

use super::models::{OperationType, TextHistoryRecord};
use super::Database;

/// Extension trait for operation-history database operations
pub trait HistoryOps {
    /// Append one history row; the timestamp is assigned here.
    fn record_history(
        &self,
        user_id: Option<i64>,
        operation: OperationType,
        input_text: &str,
        output_result: Option<&str>,
    ) -> impl std::future::Future<Output = Result<i64, sqlx::Error>> + Send;
    fn list_history_for_user(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<TextHistoryRecord>, sqlx::Error>> + Send;
    fn count_history(
        &self,
    ) -> impl std::future::Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl HistoryOps for Database {
    async fn record_history(
        &self,
        user_id: Option<i64>,
        operation: OperationType,
        input_text: &str,
        output_result: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO text_histories (user_id, operation_type, input_text, output_result, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(operation.as_str())
        .bind(input_text)
        .bind(output_result)
        .bind(&now)
        .execute(self.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_history_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<TextHistoryRecord>, sqlx::Error> {
        sqlx::query_as::<_, TextHistoryRecord>(
            "SELECT * FROM text_histories WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
    }

    async fn count_history(&self) -> Result<i64, sqlx::Error> {
        use sqlx::Row;
        let row = sqlx::query("SELECT COUNT(*) as count FROM text_histories")
            .fetch_one(self.pool())
            .await?;
        row.try_get("count")
    }
}
