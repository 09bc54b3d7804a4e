//! Hosted table store client speaking the PostgREST dialect (Supabase compatible).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};

use wall_core::domain::{NewPost, Post, PostChanges, PostId};
use wall_core::error::RepoError;
use wall_core::ports::PostStore;
use wall_shared::dto::{POST_COLUMNS, PostPatch, PostRow};

/// Connection parameters for the hosted store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

/// Post store backed by a hosted REST table.
pub struct RestPostStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RestPostStore {
    pub fn new(config: &RestStoreConfig) -> Result<Self, RepoError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Request that returns the affected rows.
    fn returning(&self, method: Method) -> RequestBuilder {
        self.request(method)
            .header("Prefer", "return=representation")
            .query(&[("select", POST_COLUMNS)])
    }

    fn by_id(builder: RequestBuilder, id: &PostId) -> RequestBuilder {
        builder.query(&[("id", format!("eq.{id}"))])
    }

    async fn send(builder: RequestBuilder) -> Result<Response, RepoError> {
        let response = builder
            .send()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RepoError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    async fn rows(builder: RequestBuilder) -> Result<Vec<Post>, RepoError> {
        let rows: Vec<PostRow> = Self::send(builder)
            .await?
            .json()
            .await
            .map_err(|e| RepoError::Decode(e.to_string()))?;
        Ok(rows.into_iter().map(into_post).collect())
    }
}

#[async_trait]
impl PostStore for RestPostStore {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let builder = self
            .request(Method::GET)
            .query(&[("select", POST_COLUMNS), ("order", "created_at.desc")]);
        let posts = Self::rows(builder).await?;
        tracing::debug!(endpoint = %self.endpoint, count = posts.len(), "Listed posts");
        Ok(posts)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let body = [PostPatch {
            message: post.message,
            image: post.image,
        }];
        let builder = self.returning(Method::POST).json(&body);
        let created = Self::rows(builder)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Decode("insert returned no rows".to_string()))?;
        tracing::debug!(post_id = %created.id, "Inserted post");
        Ok(created)
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let body = PostPatch {
            message: changes.message,
            image: changes.image,
        };
        let builder = Self::by_id(self.returning(Method::PATCH), id).json(&body);
        let updated = Self::rows(builder)
            .await?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)?;
        tracing::debug!(post_id = %id, "Updated post");
        Ok(updated)
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
        let builder = Self::by_id(self.returning(Method::DELETE), id);
        if Self::rows(builder).await?.is_empty() {
            return Err(RepoError::NotFound);
        }
        tracing::debug!(post_id = %id, "Deleted post");
        Ok(())
    }
}

fn into_post(row: PostRow) -> Post {
    Post {
        id: PostId::new(row.id.into_string()),
        message: row.message,
        image: row.image,
        created_at: row.created_at,
    }
}

/// Pull the `message` out of a PostgREST error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
