//! Post model and the interchangeable store backends.

pub mod db_store;
pub mod fixed;
pub mod local;
pub mod merge;
pub mod remote;

pub use db_store::DbStore;
pub use fixed::FixedStore;
pub use local::LocalStore;
pub use merge::{merge_posts, parse_posts};
pub use remote::RemoteStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A published post.
///
/// `date` is a plain display string compared lexically, not a calendar
/// value. `files` holds display-only attachment names; no binary content
/// is stored anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub date: String,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Data for creating a new post. The store assigns the id and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post {0} not found")]
    NotFound(i64),
    #[error("this store is read-only")]
    ReadOnly,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A source of posts. Listing is always a full reload of the collection;
/// there is no in-place edit, only create and delete by identifier.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, ordered by date descending.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// A single post by identifier.
    async fn get(&self, id: i64) -> Result<Post, StoreError>;

    /// Create a post, returning it with its assigned id and date.
    async fn create(&self, new: NewPost) -> Result<Post, StoreError>;

    /// Delete a post by identifier.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Whether this store accepts create/delete. The admin surface is
    /// hidden entirely when this is false.
    fn supports_mutation(&self) -> bool {
        true
    }
}

/// Stamp for posts created today, matching the seed data's date shape.
#[must_use]
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
