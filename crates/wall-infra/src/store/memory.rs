//! In-memory post store - used when no hosted store is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use wall_core::domain::{NewPost, Post, PostChanges, PostId};
use wall_core::error::RepoError;
use wall_core::ports::PostStore;

/// In-memory store keeping rows newest first.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    rows: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Seed the store with existing rows.
    pub fn with_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            rows: RwLock::new(posts),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.rows.read().await.clone())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = Post {
            id: PostId::new(Uuid::new_v4().to_string()),
            message: post.message,
            image: post.image,
            created_at: Utc::now(),
        };
        self.rows.write().await.insert(0, post.clone());
        Ok(post)
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let post = rows
            .iter_mut()
            .find(|post| &post.id == id)
            .ok_or(RepoError::NotFound)?;
        post.apply(&changes);
        Ok(post.clone())
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|post| &post.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
