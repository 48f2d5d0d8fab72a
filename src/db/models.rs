use serde::{Deserialize, Serialize};

/// A post row, without its attachment names.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub date: String,
}

/// An attachment name belonging to a post. Display only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostFile {
    pub id: i64,
    pub post_id: i64,
    pub filename: String,
}

/// An account that can reach the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

/// A server-side login session.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
}
