//! API Integration Tests
//!
//! Exercises the full axum router in-process with `tower::ServiceExt`.
//! The grammar service runs with all remote sources inactive, so
//! check-grammar degrades to the documented empty-list behavior unless a
//! wiremock rule service is wired in.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::grammar::sources::{RuleClient, SpellCorrector};
use crate::core::grammar::GrammarService;
use crate::core::summarize::Summarizer;
use crate::core::synonyms::Thesaurus;
use crate::database::HistoryOps;
use crate::server::{build_router, AppState};
use crate::tests::common::{create_test_db, create_test_state};

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_health() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state)
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_grammar_all_sources_inactive() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state.clone())
        .oneshot(json_request(
            "/api/check-grammar",
            serde_json::json!({"text": "Their are many mistake."}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["errors"], serde_json::json!([]));

    // History row written even for anonymous requests.
    assert_eq!(state.db.count_history().await.unwrap(), 1);
}

#[tokio::test]
async fn test_check_grammar_with_rule_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "matches": [{
                "offset": 0,
                "length": 5,
                "message": "Possible spelling mistake found.",
                "replacements": [{ "value": "Hello" }],
                "rule": { "issueType": "misspelling" }
            }]
        })))
        .mount(&server)
        .await;

    let (db, _temp) = create_test_db().await;
    let state = Arc::new(AppState {
        db,
        grammar: Arc::new(GrammarService::new(
            RuleClient::new(&server.uri()),
            None,
            SpellCorrector::empty(),
        )),
        summarizer: Summarizer::default(),
        thesaurus: Arc::new(Thesaurus::bundled()),
    });

    let response = build_router(state)
        .oneshot(json_request(
            "/api/check-grammar",
            serde_json::json!({"text": "Helllo world"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["errors"],
        serde_json::json!([{
            "type": "spelling",
            "position": { "start": 0, "end": 5 },
            "suggestion": "Hello",
            "message": "Possible spelling mistake found."
        }])
    );
}

#[tokio::test]
async fn test_check_grammar_malformed_body_is_422() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state)
        .oneshot(json_request("/api/check-grammar", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "validation");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_summarize_short_text_unchanged() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state.clone())
        .oneshot(json_request(
            "/api/summarize",
            serde_json::json!({"text": "One sentence. Two sentences."}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["summary"], "One sentence. Two sentences.");
    assert_eq!(state.db.count_history().await.unwrap(), 1);
}

#[tokio::test]
async fn test_synonyms_known_word() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state.clone())
        .oneshot(json_request(
            "/api/synonyms",
            serde_json::json!({"word": "good"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let synonyms = body["synonyms"].as_array().expect("synonyms array");
    assert!(synonyms.contains(&serde_json::json!("excellent")));
    assert_eq!(state.db.count_history().await.unwrap(), 1);
}

#[tokio::test]
async fn test_synonyms_unknown_word_is_empty_200() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state)
        .oneshot(json_request(
            "/api/synonyms",
            serde_json::json!({"word": "zzyzx"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["synonyms"], serde_json::json!([]));
}

#[tokio::test]
async fn test_user_crud_and_history() {
    let (state, _temp) = create_test_state().await;
    let router = build_router(state.clone());

    // Create
    let response = router
        .clone()
        .oneshot(json_request(
            "/api/users",
            serde_json::json!({"username": "alice", "email": "alice@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = json_body(response).await;
    let id = user["id"].as_i64().expect("user id");
    assert_eq!(user["username"], "alice");

    // Duplicate is a conflict
    let response = router
        .clone()
        .oneshot(json_request(
            "/api/users",
            serde_json::json!({"username": "alice", "email": "alice@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Get
    let response = router
        .clone()
        .oneshot(Request::get(format!("/api/users/{id}")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Operation attributed to the user shows in their history
    let response = router
        .clone()
        .oneshot(json_request(
            "/api/summarize",
            serde_json::json!({"text": "Hello there.", "user_id": id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/api/users/{id}/history"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history = json_body(response).await;
    assert_eq!(history["history"].as_array().unwrap().len(), 1);
    assert_eq!(history["history"][0]["operation_type"], "summarize");

    // Delete cascades history
    let response = router
        .clone()
        .oneshot(
            Request::delete(format!("/api/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.db.count_history().await.unwrap(), 0);

    // Gone now
    let response = router
        .oneshot(Request::get(format!("/api/users/{id}")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_validation() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state)
        .oneshot(json_request(
            "/api/users",
            serde_json::json!({"username": "x", "email": "not-an-email"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_user_history_is_404() {
    let (state, _temp) = create_test_state().await;
    let response = build_router(state)
        .oneshot(
            Request::get("/api/users/424242/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
