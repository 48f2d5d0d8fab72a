//! Integration tests for the file-backed local store.

use factshield::constants::POSTS_STORE_FILE;
use factshield::store::{LocalStore, NewPost, Post, PostStore};
use tempfile::TempDir;

fn seed_json() -> &'static str {
    r#"[
        {"id": 1, "title": "seed one", "author": "seed", "content": "a", "date": "2026-01-01", "files": []},
        {"id": 2, "title": "seed two", "author": "seed", "content": "b", "date": "2026-01-20", "files": []}
    ]"#
}

async fn open(dir: &TempDir) -> LocalStore {
    LocalStore::open(&dir.path().join("store"), &dir.path().join("posts.json"))
        .await
        .expect("Failed to open local store")
}

fn write_seed(dir: &TempDir, json: &str) {
    std::fs::write(dir.path().join("posts.json"), json).unwrap();
}

fn write_cache(dir: &TempDir, json: &str) {
    let store_dir = dir.path().join("store");
    std::fs::create_dir_all(&store_dir).unwrap();
    std::fs::write(store_dir.join(POSTS_STORE_FILE), json).unwrap();
}

#[tokio::test]
async fn test_open_merges_seed_and_cache_local_wins() {
    let dir = TempDir::new().unwrap();
    write_seed(&dir, seed_json());
    write_cache(
        &dir,
        r#"[
            {"id": 1, "title": "local one", "author": "me", "content": "edited", "date": "2026-02-01", "files": []},
            {"id": 3, "title": "local three", "author": "me", "content": "c", "date": "2026-01-15", "files": []}
        ]"#,
    );

    let store = open(&dir).await;
    let posts = store.list().await.unwrap();

    assert_eq!(posts.len(), 3);
    // Sorted by date descending; the local version of id 1 wins
    assert_eq!(posts[0].id, 1);
    assert_eq!(posts[0].title, "local one");
    assert_eq!(posts[1].id, 2);
    assert_eq!(posts[2].id, 3);

    // The merged result was persisted back as the canonical list
    let raw = std::fs::read_to_string(dir.path().join("store").join(POSTS_STORE_FILE)).unwrap();
    let persisted: Vec<Post> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.len(), 3);
    assert_eq!(persisted[0].title, "local one");
}

#[tokio::test]
async fn test_malformed_cache_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    write_seed(&dir, seed_json());
    write_cache(&dir, "{not valid json");

    let store = open(&dir).await;
    let posts = store.list().await.unwrap();
    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn test_missing_seed_yields_cache_only() {
    let dir = TempDir::new().unwrap();
    write_cache(
        &dir,
        r#"[{"id": 5, "title": "only local", "author": "me", "content": "x", "date": "2026-01-01", "files": []}]"#,
    );

    let store = open(&dir).await;
    let posts = store.list().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 5);
}

#[tokio::test]
async fn test_create_assigns_next_id_and_persists() {
    let dir = TempDir::new().unwrap();
    write_seed(&dir, seed_json());

    let store = open(&dir).await;
    let created = store
        .create(NewPost {
            title: "new".to_string(),
            author: "me".to_string(),
            content: "fresh".to_string(),
            files: vec!["doc.pdf".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);
    assert!(!created.date.is_empty());
    drop(store);

    // Survives a reopen
    let store = open(&dir).await;
    let fetched = store.get(3).await.unwrap();
    assert_eq!(fetched.title, "new");
    assert_eq!(fetched.files, vec!["doc.pdf"]);
}

#[tokio::test]
async fn test_deleted_seed_post_does_not_resurface() {
    let dir = TempDir::new().unwrap();
    write_seed(&dir, seed_json());

    let store = open(&dir).await;
    store.delete(1).await.unwrap();
    assert!(store.get(1).await.is_err());
    drop(store);

    // The seed still contains id 1, but the tombstone keeps it out
    let store = open(&dir).await;
    let posts = store.list().await.unwrap();
    assert!(posts.iter().all(|p| p.id != 1));
    assert!(posts.iter().any(|p| p.id == 2));
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    write_seed(&dir, seed_json());

    let store = open(&dir).await;
    assert!(store.delete(99).await.is_err());
}

#[tokio::test]
async fn test_remembered_user_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;

    assert!(store.remembered_user().await.is_none());

    store.remember_user("admin").await;
    assert_eq!(store.remembered_user().await.as_deref(), Some("admin"));

    store.forget_user().await;
    assert!(store.remembered_user().await.is_none());
}
