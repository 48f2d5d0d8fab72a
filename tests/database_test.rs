//! Integration tests for the SQLite layer.

use factshield::db::{self, Database};
use factshield::store::NewPost;
use tempfile::TempDir;

async fn open_db(dir: &TempDir) -> Database {
    Database::new(&dir.path().join("test.sqlite"))
        .await
        .expect("Failed to open test database")
}

fn new_post(title: &str, files: &[&str]) -> NewPost {
    NewPost {
        title: title.to_string(),
        author: "editor".to_string(),
        content: "Body".to_string(),
        files: files.iter().map(ToString::to_string).collect(),
    }
}

#[tokio::test]
async fn test_insert_and_get_post_with_files() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir).await;

    let created = db::insert_post(
        db.pool(),
        &new_post("With files", &["a.pdf", "b.png"]),
        "2026-01-01",
    )
    .await
    .unwrap();

    let fetched = db::get_post(db.pool(), created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "With files");
    assert_eq!(fetched.date, "2026-01-01");
    assert_eq!(fetched.files, vec!["a.pdf", "b.png"]);
}

#[tokio::test]
async fn test_list_posts_date_descending() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir).await;

    db::insert_post(db.pool(), &new_post("oldest", &[]), "2025-01-01")
        .await
        .unwrap();
    db::insert_post(db.pool(), &new_post("newest", &[]), "2026-06-01")
        .await
        .unwrap();
    db::insert_post(db.pool(), &new_post("middle", &[]), "2025-12-31")
        .await
        .unwrap();

    let posts = db::list_posts(db.pool()).await.unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_delete_post_cascades_files() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir).await;

    let created = db::insert_post(db.pool(), &new_post("Doomed", &["x.txt"]), "2026-01-01")
        .await
        .unwrap();

    assert!(db::delete_post(db.pool(), created.id).await.unwrap());
    assert!(db::get_post(db.pool(), created.id).await.unwrap().is_none());

    let file_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_files")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(file_count, 0);

    // Deleting again reports nothing removed
    assert!(!db::delete_post(db.pool(), created.id).await.unwrap());
}

#[tokio::test]
async fn test_sessions_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir).await;

    let user_id = db::create_user(db.pool(), "admin", "hash").await.unwrap();

    db::create_session(db.pool(), user_id, "live-token", "2099-01-01T00:00:00Z")
        .await
        .unwrap();
    db::create_session(db.pool(), user_id, "dead-token", "2000-01-01T00:00:00Z")
        .await
        .unwrap();

    let session = db::get_session_by_token(db.pool(), "live-token")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.user_id, user_id);

    let removed = db::delete_expired_sessions(db.pool(), "2026-01-01T00:00:00Z")
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(db::get_session_by_token(db.pool(), "dead-token")
        .await
        .unwrap()
        .is_none());
    assert!(db::get_session_by_token(db.pool(), "live-token")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir).await;

    db::create_user(db.pool(), "admin", "hash").await.unwrap();
    assert!(db::create_user(db.pool(), "admin", "other").await.is_err());
}
