use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Post store - abstraction over the hosted table store.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch every post, newest first.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert one post and return the stored row with its assigned id and timestamp.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace message and image of the post with `id`.
    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete the post with `id`.
    async fn delete(&self, id: &PostId) -> Result<(), RepoError>;
}
