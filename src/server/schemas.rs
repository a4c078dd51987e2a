//! Request/response bodies for the API.

use serde::{Deserialize, Serialize};

use crate::core::grammar::Candidate;
use crate::database::{TextHistoryRecord, UserRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct GrammarCheckRequest {
    pub text: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrammarCheckResponse {
    pub errors: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynonymsRequest {
    pub word: String,
    /// Context text; stored in history when present.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynonymsResponse {
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<TextHistoryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
