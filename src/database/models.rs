//! Database records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The three text operations that write history rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    GrammarCheck,
    Summarize,
    SynonymLookup,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::GrammarCheck => "grammar_check",
            OperationType::Summarize => "summarize",
            OperationType::SynonymLookup => "synonym_lookup",
        }
    }
}

/// User database record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Text history database record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TextHistoryRecord {
    pub id: i64,
    pub user_id: Option<i64>,
    pub operation_type: String,
    pub input_text: String,
    pub output_result: Option<String>,
    pub created_at: String,
}
