//! Post store proxying to an external HTTP backend.
//!
//! Every operation is a single direct call against the backend API with a
//! request timeout and nothing else: no retries, no backoff, no caching.
//! Failures map to [`StoreError::Backend`] and surface to the user as a
//! transient notification.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{NewPost, Post, PostStore, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base: Url,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    username: String,
}

impl RemoteStore {
    /// Build a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot
    /// be constructed.
    pub fn new(api_base_url: &str) -> Result<Self> {
        let mut base = Url::parse(api_base_url).context("Invalid API base URL")?;
        // Url::join treats a base without a trailing slash as a file and
        // would drop its last path segment.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Invalid API path: {path}"))
    }

    /// Attempt a login against the backend.
    ///
    /// Returns the confirmed username on success and `None` when the
    /// backend rejects the credentials. Nothing beyond the username is
    /// retained from the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or responds with
    /// anything other than success or an auth rejection.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.endpoint("api/login")?)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .context("Login request failed")?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow!("login failed with status {}", response.status()));
        }

        let body: LoginResponse = response
            .json()
            .await
            .context("Failed to decode login response")?;
        Ok(Some(body.username))
    }
}

#[async_trait::async_trait]
impl PostStore for RemoteStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let response = self
            .client
            .get(self.endpoint("api/posts")?)
            .send()
            .await
            .context("Failed to fetch posts")?
            .error_for_status()
            .context("Backend rejected post listing")?;

        let posts = response
            .json()
            .await
            .context("Failed to decode post listing")?;
        Ok(posts)
    }

    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        // The backend has no single-post endpoint, so a detail view is a
        // full reload filtered by id.
        self.list()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        let response = self
            .client
            .post(self.endpoint("api/posts")?)
            .json(&new)
            .send()
            .await
            .context("Failed to create post")?
            .error_for_status()
            .context("Backend rejected post creation")?;

        let post = response
            .json()
            .await
            .context("Failed to decode created post")?;
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("api/posts/{id}"))?)
            .send()
            .await
            .context("Failed to delete post")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id));
        }
        response
            .error_for_status()
            .context("Backend rejected post deletion")?;
        Ok(())
    }
}
