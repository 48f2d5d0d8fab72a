//! [`PostStore`] backed by the SQLite database.

use super::{today, NewPost, Post, PostStore, StoreError};
use crate::db::{self, Database};

#[derive(Debug, Clone)]
pub struct DbStore {
    db: Database,
}

impl DbStore {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl PostStore for DbStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        Ok(db::list_posts(self.db.pool()).await?)
    }

    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        db::get_post(self.db.pool(), id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        Ok(db::insert_post(self.db.pool(), &new, &today()).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        if db::delete_post(self.db.pool(), id).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }
}
