//! Integration tests for web routes in database mode.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use factshield::auth::SessionCache;
use factshield::config::StoreMode;
use factshield::db;
use factshield::store::{FixedStore, NewPost};
use factshield::web::{create_app, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_home_lists_posts() {
    let dir = TempDir::new().unwrap();
    let (app, database) = common::database_app(dir.path()).await;

    let new = NewPost {
        title: "Visible on home".to_string(),
        author: "editor".to_string(),
        content: "Body text".to_string(),
        files: vec![],
    };
    db::insert_post(database.pool(), &new, "2026-02-01")
        .await
        .unwrap();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Case files"));
    assert!(body.contains("Visible on home"));
}

#[tokio::test]
async fn test_post_detail_and_not_found() {
    let dir = TempDir::new().unwrap();
    let (app, database) = common::database_app(dir.path()).await;

    let new = NewPost {
        title: "Detail page".to_string(),
        author: "editor".to_string(),
        content: "Full content".to_string(),
        files: vec!["notes.txt".to_string()],
    };
    let post = db::insert_post(database.pool(), &new, "2026-02-01")
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/post/{}", post.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Detail page"));
    assert!(body.contains("notes.txt"));

    let response = app.oneshot(get("/post/9999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_requires_login() {
    let dir = TempDir::new().unwrap();
    let (app, _database) = common::database_app(dir.path()).await;

    let response = app.oneshot(get("/admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn test_healthz() {
    let dir = TempDir::new().unwrap();
    let (app, _database) = common::database_app(dir.path()).await;

    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_api_posts_listing() {
    let dir = TempDir::new().unwrap();
    let (app, database) = common::database_app(dir.path()).await;

    let new = NewPost {
        title: "API post".to_string(),
        author: "editor".to_string(),
        content: "Body".to_string(),
        files: vec![],
    };
    db::insert_post(database.pool(), &new, "2026-02-01")
        .await
        .unwrap();

    let response = app.oneshot(get("/api/posts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let posts: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "API post");
}

#[tokio::test]
async fn test_api_mutation_requires_auth() {
    let dir = TempDir::new().unwrap();
    let (app, _database) = common::database_app(dir.path()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"title":"t","author":"a","content":"c","files":[]}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/posts/1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fixed_mode_hides_login_and_admin() {
    let dir = TempDir::new().unwrap();
    let config = common::test_config(StoreMode::Fixed, dir.path());

    let state = AppState {
        store: Arc::new(FixedStore::new()),
        db: None,
        local: None,
        remote: None,
        sessions: SessionCache::default(),
        config: Arc::new(config),
    };
    let app = create_app(state);

    // Static variant still renders content
    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Welcome to FactShield"));
    assert!(!body.contains(r#"href="/login""#));

    // Login redirects straight home
    let response = app.oneshot(get("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
}
