//! Read-only post store with a hard-coded collection.
//!
//! The fully static variant of the site: navigation only, no login, no
//! mutation. Create and delete are rejected and the admin surface is
//! never shown.

use super::{NewPost, Post, PostStore, StoreError};

#[derive(Debug)]
pub struct FixedStore {
    posts: Vec<Post>,
}

impl FixedStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            posts: builtin_posts(),
        }
    }
}

impl Default for FixedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PostStore for FixedStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.clone())
    }

    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, _new: NewPost) -> Result<Post, StoreError> {
        Err(StoreError::ReadOnly)
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(StoreError::ReadOnly)
    }

    fn supports_mutation(&self) -> bool {
        false
    }
}

fn builtin_posts() -> Vec<Post> {
    vec![
        Post {
            id: 3,
            title: "Viral flood photo predates the storm by a decade".to_string(),
            author: "FactShield Team".to_string(),
            content: "A widely shared photo claimed to show last week's flooding. \
                      Reverse image search places the original in 2014, taken in a \
                      different country. Rating: misattributed."
                .to_string(),
            date: "2026-02-10".to_string(),
            files: vec!["reverse-search-results.pdf".to_string()],
        },
        Post {
            id: 2,
            title: "No, the city is not banning bicycles downtown".to_string(),
            author: "FactShield Team".to_string(),
            content: "The circulating screenshot quotes a draft that was never \
                      tabled. The council agenda for the cited session contains no \
                      such item. Rating: false."
                .to_string(),
            date: "2026-01-28".to_string(),
            files: vec![],
        },
        Post {
            id: 1,
            title: "Welcome to FactShield".to_string(),
            author: "FactShield Team".to_string(),
            content: "FactShield publishes short, sourced case files on claims \
                      circulating locally. Every verdict links the evidence we \
                      checked."
                .to_string(),
            date: "2026-01-15".to_string(),
            files: vec![],
        },
    ]
}
