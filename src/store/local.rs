//! File-backed post store reconciled with bundled seed data.
//!
//! The store directory plays the role the original site gave to browser
//! local storage: one key for the post collection, one for the remembered
//! session user, and one for locally deleted identifiers. On open, the
//! cached collection is merged with the seed file (local wins) and the
//! merged result is persisted back so later reads see one canonical list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{merge_posts, parse_posts, today, NewPost, Post, PostStore, StoreError};
use crate::constants::{POSTS_STORE_FILE, TOMBSTONES_FILE, USER_STORE_FILE};

#[derive(Debug)]
struct Inner {
    posts: Vec<Post>,
    deleted: HashSet<i64>,
}

#[derive(Debug)]
pub struct LocalStore {
    posts_path: PathBuf,
    user_path: PathBuf,
    tombstones_path: PathBuf,
    inner: RwLock<Inner>,
}

impl LocalStore {
    /// Open the store, merging the cached collection with the seed file.
    ///
    /// A missing or malformed seed or cache yields an empty collection
    /// rather than an error. Seed entries whose ids were deleted locally
    /// are filtered out before the merge so they do not resurface.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store directory cannot be created.
    pub async fn open(store_dir: &Path, seed_path: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(store_dir)
            .await
            .with_context(|| format!("Failed to create store directory: {}", store_dir.display()))?;

        let posts_path = store_dir.join(POSTS_STORE_FILE);
        let user_path = store_dir.join(USER_STORE_FILE);
        let tombstones_path = store_dir.join(TOMBSTONES_FILE);

        let deleted = read_tombstones(&tombstones_path).await;

        let seed: Vec<serde_json::Value> = read_collection(seed_path)
            .await
            .into_iter()
            .filter(|v| {
                v.get("id")
                    .and_then(serde_json::Value::as_i64)
                    .map_or(true, |id| !deleted.contains(&id))
            })
            .collect();
        let local = read_collection(&posts_path).await;

        let posts = merge_posts(&seed, &local);
        debug!(
            seed = seed.len(),
            local = local.len(),
            merged = posts.len(),
            "Merged seed and local post collections"
        );

        let store = Self {
            posts_path,
            user_path,
            tombstones_path,
            inner: RwLock::new(Inner { posts, deleted }),
        };

        // Persist the canonical merged list. Failures are swallowed: the
        // site keeps rendering from memory (local storage quota analogue).
        store.persist_posts(&store.inner.read().await.posts).await;

        Ok(store)
    }

    async fn persist_posts(&self, posts: &[Post]) {
        match serde_json::to_string_pretty(posts) {
            Ok(json) => {
                if let Err(e) = tokio::fs::write(&self.posts_path, json).await {
                    warn!(path = %self.posts_path.display(), "Failed to persist posts: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize posts: {e}"),
        }
    }

    async fn persist_tombstones(&self, deleted: &HashSet<i64>) {
        let mut ids: Vec<i64> = deleted.iter().copied().collect();
        ids.sort_unstable();
        match serde_json::to_string(&ids) {
            Ok(json) => {
                if let Err(e) = tokio::fs::write(&self.tombstones_path, json).await {
                    warn!(path = %self.tombstones_path.display(), "Failed to persist tombstones: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize tombstones: {e}"),
        }
    }

    /// Remember the session user under its storage key.
    pub async fn remember_user(&self, username: &str) {
        match serde_json::to_string(&username) {
            Ok(json) => {
                if let Err(e) = tokio::fs::write(&self.user_path, json).await {
                    warn!(path = %self.user_path.display(), "Failed to remember user: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize username: {e}"),
        }
    }

    /// The remembered session user, if any.
    pub async fn remembered_user(&self) -> Option<String> {
        let raw = tokio::fs::read_to_string(&self.user_path).await.ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Clear the remembered session user.
    pub async fn forget_user(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.user_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.user_path.display(), "Failed to forget user: {e}");
            }
        }
    }
}

#[async_trait::async_trait]
impl PostStore for LocalStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        self.inner
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let post = Post {
            id,
            title: new.title,
            author: new.author,
            content: new.content,
            date: today(),
            files: new.files,
        };

        // A recreated id is live again.
        inner.deleted.remove(&id);
        inner.posts.push(post.clone());
        inner.posts.sort_by(|a, b| b.date.cmp(&a.date));

        self.persist_posts(&inner.posts).await;
        self.persist_tombstones(&inner.deleted).await;

        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        if inner.posts.len() == before {
            return Err(StoreError::NotFound(id));
        }
        inner.deleted.insert(id);

        self.persist_posts(&inner.posts).await;
        self.persist_tombstones(&inner.deleted).await;

        Ok(())
    }
}

async fn read_collection(path: &Path) -> Vec<serde_json::Value> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => parse_posts(&raw),
        Err(_) => Vec::new(),
    }
}

async fn read_tombstones(path: &Path) -> HashSet<i64> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => HashSet::new(),
    }
}
