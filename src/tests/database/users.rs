//! User Database Tests

use crate::database::UserOps;
use crate::tests::common::create_test_db;

#[tokio::test]
async fn test_user_lifecycle() {
    let (db, _temp) = create_test_db().await;

    let user = db
        .create_user("alice", "alice@example.com")
        .await
        .expect("Failed to create user");
    assert!(user.id > 0);
    assert_eq!(user.username, "alice");

    let fetched = db
        .get_user(user.id)
        .await
        .expect("Failed to fetch")
        .expect("User should exist");
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, "alice@example.com");
    assert!(!fetched.created_at.is_empty());

    let by_name = db
        .get_user_by_username("alice")
        .await
        .expect("Failed to fetch by name");
    assert_eq!(by_name.map(|u| u.id), Some(user.id));

    assert!(db.delete_user(user.id).await.expect("Failed to delete"));
    assert!(db.get_user(user.id).await.expect("Failed to fetch").is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (db, _temp) = create_test_db().await;

    db.create_user("bob", "bob@example.com")
        .await
        .expect("Failed to create user");
    let result = db.create_user("bob", "other@example.com").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (db, _temp) = create_test_db().await;

    db.create_user("carol", "carol@example.com")
        .await
        .expect("Failed to create user");
    let result = db.create_user("carola", "carol@example.com").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_missing_user_returns_false() {
    let (db, _temp) = create_test_db().await;
    assert!(!db.delete_user(9999).await.expect("Delete should not error"));
}

#[tokio::test]
async fn test_ids_autoincrement() {
    let (db, _temp) = create_test_db().await;
    let first = db.create_user("u1", "u1@example.com").await.unwrap();
    let second = db.create_user("u2", "u2@example.com").await.unwrap();
    assert!(second.id > first.id);
}
