//! Text History Database Tests

use crate::database::{HistoryOps, OperationType, UserOps};
use crate::tests::common::create_test_db;

#[tokio::test]
async fn test_record_and_list_history() {
    let (db, _temp) = create_test_db().await;
    let user = db.create_user("dave", "dave@example.com").await.unwrap();

    let id = db
        .record_history(
            Some(user.id),
            OperationType::GrammarCheck,
            "Helllo world",
            Some("[]"),
        )
        .await
        .expect("Failed to record history");
    assert!(id > 0);

    let history = db
        .list_history_for_user(user.id)
        .await
        .expect("Failed to list history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].operation_type, "grammar_check");
    assert_eq!(history[0].input_text, "Helllo world");
    assert_eq!(history[0].output_result.as_deref(), Some("[]"));
    assert!(!history[0].created_at.is_empty());
}

#[tokio::test]
async fn test_anonymous_history_allowed() {
    let (db, _temp) = create_test_db().await;

    db.record_history(None, OperationType::Summarize, "some text", Some("some text"))
        .await
        .expect("Anonymous history should be accepted");
    assert_eq!(db.count_history().await.unwrap(), 1);
}

#[tokio::test]
async fn test_deleting_user_cascades_history() {
    let (db, _temp) = create_test_db().await;
    let user = db.create_user("erin", "erin@example.com").await.unwrap();

    for operation in [
        OperationType::GrammarCheck,
        OperationType::Summarize,
        OperationType::SynonymLookup,
    ] {
        db.record_history(Some(user.id), operation, "input", None)
            .await
            .unwrap();
    }
    assert_eq!(db.count_history().await.unwrap(), 3);

    db.delete_user(user.id).await.unwrap();
    assert_eq!(db.count_history().await.unwrap(), 0);
}

#[tokio::test]
async fn test_history_ordered_newest_first() {
    let (db, _temp) = create_test_db().await;
    let user = db.create_user("finn", "finn@example.com").await.unwrap();

    db.record_history(Some(user.id), OperationType::Summarize, "first", None)
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    db.record_history(Some(user.id), OperationType::Summarize, "second", None)
        .await
        .unwrap();

    let history = db.list_history_for_user(user.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].input_text, "second");
    assert_eq!(history[1].input_text, "first");
}
