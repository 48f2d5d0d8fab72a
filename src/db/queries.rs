use std::collections::HashMap;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use super::models::{PostFile, PostRow, Session, User};
use crate::store::{NewPost, Post};

// ========== Posts ==========

/// Get all posts with their attachment names, ordered by date descending.
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>> {
    let rows: Vec<PostRow> = sqlx::query_as("SELECT * FROM posts ORDER BY date DESC, id DESC")
        .fetch_all(pool)
        .await
        .context("Failed to fetch posts")?;

    let files: Vec<PostFile> = sqlx::query_as("SELECT * FROM post_files ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to fetch post files")?;

    let mut by_post: HashMap<i64, Vec<String>> = HashMap::new();
    for file in files {
        by_post.entry(file.post_id).or_default().push(file.filename);
    }

    Ok(rows
        .into_iter()
        .map(|row| assemble(row, &mut by_post))
        .collect())
}

/// Get a single post with its attachment names.
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>> {
    let row: Option<PostRow> = sqlx::query_as("SELECT * FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch post")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let files: Vec<PostFile> =
        sqlx::query_as("SELECT * FROM post_files WHERE post_id = ? ORDER BY id")
            .bind(id)
            .fetch_all(pool)
            .await
            .context("Failed to fetch post files")?;

    let mut post = to_post(row);
    post.files = files.into_iter().map(|f| f.filename).collect();
    Ok(Some(post))
}

/// Insert a post and its attachment names in one transaction, returning
/// the stored post.
pub async fn insert_post(pool: &SqlitePool, new: &NewPost, date: &str) -> Result<Post> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r"
        INSERT INTO posts (title, author, content, date)
        VALUES (?, ?, ?, ?)
        ",
    )
    .bind(&new.title)
    .bind(&new.author)
    .bind(&new.content)
    .bind(date)
    .execute(&mut *tx)
    .await
    .context("Failed to insert post")?;

    let id = result.last_insert_rowid();

    for filename in &new.files {
        sqlx::query("INSERT INTO post_files (post_id, filename) VALUES (?, ?)")
            .bind(id)
            .bind(filename)
            .execute(&mut *tx)
            .await
            .context("Failed to insert post file")?;
    }

    tx.commit().await.context("Failed to commit post insert")?;

    Ok(Post {
        id,
        title: new.title.clone(),
        author: new.author.clone(),
        content: new.content.clone(),
        date: date.to_string(),
        files: new.files.clone(),
    })
}

/// Delete a post by id. Attachment rows cascade. Returns whether a row
/// was deleted.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete post")?;

    Ok(result.rows_affected() > 0)
}

fn assemble(row: PostRow, files: &mut HashMap<i64, Vec<String>>) -> Post {
    let attached = files.remove(&row.id).unwrap_or_default();
    let mut post = to_post(row);
    post.files = attached;
    post
}

fn to_post(row: PostRow) -> Post {
    Post {
        id: row.id,
        title: row.title,
        author: row.author,
        content: row.content,
        date: row.date,
        files: Vec::new(),
    }
}

// ========== Users ==========

/// Get a user by username.
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch user")
}

/// Get a user by id.
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch user by id")
}

/// Count all users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .context("Failed to count users")
}

/// Create a user, returning its id.
pub async fn create_user(pool: &SqlitePool, username: &str, password_hash: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await
        .context("Failed to create user")?;

    Ok(result.last_insert_rowid())
}

// ========== Sessions ==========

/// Create a session for a user.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: i64,
    token: &str,
    expires_at: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO sessions (user_id, token, expires_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await
        .context("Failed to create session")?;
    Ok(())
}

/// Get a session by its token.
pub async fn get_session_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    sqlx::query_as("SELECT * FROM sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch session")
}

/// Delete a session by its token.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .context("Failed to delete session")?;
    Ok(())
}

/// Delete all expired sessions, returning how many were removed.
pub async fn delete_expired_sessions(pool: &SqlitePool, now: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to delete expired sessions")?;
    Ok(result.rows_affected())
}
