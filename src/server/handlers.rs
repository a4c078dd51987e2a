//! HTTP handlers.
//!
//! Handler bodies stay thin: validate, call into the core, log history,
//! serialize. History-write failures are logged and never fail the request.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use super::error::{ApiError, AppJson};
use super::schemas::*;
use super::AppState;
use crate::database::{HistoryOps, OperationType, UserOps};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn check_grammar(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<GrammarCheckRequest>,
) -> Result<Json<GrammarCheckResponse>, ApiError> {
    let errors = state.grammar.check(&request.text).await;

    let output = serde_json::to_string(&errors).unwrap_or_default();
    log_history(
        &state,
        request.user_id,
        OperationType::GrammarCheck,
        &request.text,
        Some(&output),
    )
    .await;

    Ok(Json(GrammarCheckResponse { errors }))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let summary = state.summarizer.summarize(&request.text);

    log_history(
        &state,
        request.user_id,
        OperationType::Summarize,
        &request.text,
        Some(&summary),
    )
    .await;

    Ok(Json(SummarizeResponse { summary }))
}

pub async fn synonyms(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<SynonymsRequest>,
) -> Result<Json<SynonymsResponse>, ApiError> {
    if request.word.trim().is_empty() {
        return Err(ApiError::Validation("word must not be empty".to_string()));
    }

    let synonyms = state.thesaurus.lookup(&request.word);

    let input = request.text.as_deref().unwrap_or(&request.word);
    let output = serde_json::to_string(&synonyms).unwrap_or_default();
    log_history(
        &state,
        request.user_id,
        OperationType::SynonymLookup,
        input,
        Some(&output),
    )
    .await;

    Ok(Json(SynonymsResponse { synonyms }))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let username = request.username.trim();
    let email = request.email.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("username must not be empty".to_string()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("a valid email is required".to_string()));
    }

    let user = state
        .db
        .create_user(username, email)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("username or email already taken".to_string())
            }
            _ => ApiError::Database(e),
        })?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .db
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
    Ok(Json(user.into()))
}

pub async fn user_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<HistoryResponse>, ApiError> {
    if state.db.get_user(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("user {id} not found")));
    }
    let history = state.db.list_history_for_user(id).await?;
    Ok(Json(HistoryResponse { history }))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.db.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("user {id} not found")))
    }
}

async fn log_history(
    state: &AppState,
    user_id: Option<i64>,
    operation: OperationType,
    input: &str,
    output: Option<&str>,
) {
    if let Err(e) = state
        .db
        .record_history(user_id, operation, input, output)
        .await
    {
        warn!(operation = operation.as_str(), "Failed to record history: {e}");
    }
}
