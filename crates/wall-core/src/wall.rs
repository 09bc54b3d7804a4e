//! The wall orchestrator.
//!
//! Owns the canonical in-memory post collection and all transient UI state,
//! and mediates every mutation between the composer, the feed and the store.
//! The local collection only changes in response to a completed store call.
//! The state lock is never held across a store call, so remote operations
//! are neither queued nor serialised against each other.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::composer::Composer;
use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::DomainError;
use crate::feed::{EditDraft, EditState, FeedState};
use crate::notice::Notice;
use crate::ports::PostStore;

const BUSY_MESSAGE: &str = "Another post is still saving. Please try again.";

#[derive(Debug, Default)]
struct WallState {
    posts: Vec<Post>,
    posts_loading: bool,
    load_failed: bool,
    busy: bool,
    composer: Composer,
    edit: EditState,
    feed: FeedState,
    sidebar_open: bool,
    notices: Vec<Notice>,
}

/// Read-only copy of the wall state, taken for rendering.
#[derive(Debug, Clone)]
pub struct WallSnapshot {
    pub posts: Vec<Post>,
    pub posts_loading: bool,
    /// The last load failed; the collection may be stale.
    pub load_failed: bool,
    pub busy: bool,
    pub composer: Composer,
    pub edit: EditState,
    pub pending_delete: Option<PostId>,
    pub sidebar_open: bool,
}

/// Single-user wall: post collection plus composer, edit and feed state.
pub struct Wall {
    store: Arc<dyn PostStore>,
    state: RwLock<WallState>,
}

impl Wall {
    /// Create an empty wall. It reports `posts_loading` until the first [`Wall::load`] finishes.
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            state: RwLock::new(WallState {
                posts_loading: true,
                ..WallState::default()
            }),
        }
    }

    /// Fetch all posts, newest first, and replace the local collection.
    ///
    /// On failure the collection keeps its last-known contents and an alert is raised.
    pub async fn load(&self) {
        self.state.write().await.posts_loading = true;

        let result = self.store.list().await;

        let mut state = self.state.write().await;
        state.posts_loading = false;
        match result {
            Ok(posts) => {
                tracing::info!(count = posts.len(), "Posts loaded");
                state.posts = posts;
                state.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load posts");
                state.load_failed = true;
                state.notices.push(Notice::alert("Failed to load posts."));
            }
        }
    }

    /// Replace the composer text and, when given, stage a new image.
    pub async fn compose(&self, text: &str, image: Option<String>) {
        let mut state = self.state.write().await;
        state.composer.set_text(text);
        if let Some(image) = image {
            state.composer.stage_image(image);
        }
    }

    /// Share the composer draft.
    ///
    /// Does nothing when the trimmed draft is empty. While another save is in
    /// flight the draft is kept and an alert asks the user to retry.
    /// On failure the draft stays in the composer for resubmission.
    pub async fn share(&self) -> Option<Post> {
        let (new_post, submitted) = {
            let mut state = self.state.write().await;
            if state.busy {
                tracing::debug!("Share refused while busy");
                state.notices.push(Notice::alert(BUSY_MESSAGE));
                return None;
            }
            if !state.composer.can_submit(false) {
                return None;
            }
            let new_post = NewPost::new(
                state.composer.text(),
                state.composer.image().map(str::to_owned),
            )
            .ok()?;
            state.busy = true;
            (new_post, state.composer.clone())
        };

        let result = self.store.insert(new_post).await;

        let mut state = self.state.write().await;
        state.busy = false;
        match result {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post shared");
                state.posts.insert(0, post.clone());
                // A draft written while the insert was in flight belongs to a later share.
                if state.composer == submitted {
                    state.composer.clear();
                }
                state.notices.push(Notice::toast("Posted successfully!"));
                Some(post)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to share post");
                state.notices.push(Notice::alert("Failed to share post."));
                None
            }
        }
    }

    /// Delete a post remotely, then drop it from the local collection.
    ///
    /// Not gated by the busy flag.
    pub async fn delete_post(&self, id: &PostId) -> bool {
        let result = self.store.delete(id).await;

        let mut state = self.state.write().await;
        match result {
            Ok(()) => {
                tracing::info!(post_id = %id, "Post deleted");
                state.posts.retain(|post| &post.id != id);
                state.feed.forget(id);
                if state.edit.is_editing(id) {
                    state.edit = EditState::Idle;
                }
                state.notices.push(Notice::toast("Post deleted!"));
                true
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "Failed to delete post");
                state.notices.push(Notice::alert("Failed to delete post."));
                false
            }
        }
    }

    /// Open the delete confirmation for `id`. Nothing is deleted yet.
    pub async fn request_delete(&self, id: PostId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.posts.iter().any(|post| post.id == id) {
            return Err(DomainError::NotFound(id));
        }
        state.feed.request_delete(id);
        Ok(())
    }

    /// Delete the post awaiting confirmation, if any, and close the dialog.
    pub async fn confirm_delete(&self) -> bool {
        let pending = self.state.write().await.feed.take_confirmed();
        match pending {
            Some(id) => self.delete_post(&id).await,
            None => false,
        }
    }

    pub async fn cancel_delete(&self) {
        self.state.write().await.feed.cancel_delete();
    }

    /// Start editing `id`, discarding any other unsaved edit draft.
    pub async fn begin_edit(&self, id: &PostId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let draft = state
            .posts
            .iter()
            .find(|post| &post.id == id)
            .map(EditDraft::from_post)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        if let Some(previous) = state.edit.editing_id().filter(|prev| *prev != id) {
            tracing::debug!(post_id = %previous, "Discarding unsaved edit");
        }
        state.feed.forget(id);
        state.edit = EditState::Editing {
            id: id.clone(),
            draft,
        };
        Ok(())
    }

    /// Update the edit draft of `id`. Ignored when `id` is not being edited.
    pub async fn revise(&self, id: &PostId, text: &str, image: Option<String>) {
        let mut state = self.state.write().await;
        if !state.edit.is_editing(id) {
            return;
        }
        if let Some(draft) = state.edit.draft_mut() {
            draft.set_message(text);
            if let Some(image) = image {
                draft.image = Some(image);
            }
        }
    }

    /// Save the edit draft of `id` remotely, then update the post in place.
    pub async fn save_edit(&self, id: &PostId) -> bool {
        let changes = {
            let mut state = self.state.write().await;
            if state.busy {
                tracing::debug!(post_id = %id, "Save refused while busy");
                state.notices.push(Notice::alert(BUSY_MESSAGE));
                return false;
            }
            let draft = match &state.edit {
                EditState::Editing { id: editing, draft } if editing == id => draft.clone(),
                _ => return false,
            };
            match PostChanges::new(&draft.message, draft.image) {
                Ok(changes) => {
                    state.busy = true;
                    changes
                }
                Err(e) => {
                    state.notices.push(Notice::alert(e.to_string()));
                    return false;
                }
            }
        };

        let result = self.store.update(id, changes.clone()).await;

        let mut state = self.state.write().await;
        state.busy = false;
        match result {
            Ok(_) => {
                tracing::info!(post_id = %id, "Post updated");
                if let Some(post) = state.posts.iter_mut().find(|post| &post.id == id) {
                    post.apply(&changes);
                }
                if state.edit.is_editing(id) {
                    state.edit = EditState::Idle;
                }
                state.notices.push(Notice::toast("Post updated!"));
                true
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "Failed to update post");
                state.notices.push(Notice::alert("Failed to update post."));
                false
            }
        }
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.edit = EditState::Idle;
    }

    pub async fn set_sidebar_open(&self, open: bool) {
        self.state.write().await.sidebar_open = open;
    }

    /// Drain pending notifications.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().await.notices)
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn snapshot(&self) -> WallSnapshot {
        let state = self.state.read().await;
        WallSnapshot {
            posts: state.posts.clone(),
            posts_loading: state.posts_loading,
            load_failed: state.load_failed,
            busy: state.busy,
            composer: state.composer.clone(),
            edit: state.edit.clone(),
            pending_delete: state.feed.pending_delete().cloned(),
            sidebar_open: state.sidebar_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use tokio::sync::Notify;

    use super::*;
    use crate::domain::MAX_MESSAGE_LEN;
    use crate::error::RepoError;

    #[derive(Default)]
    struct TestStore {
        rows: Mutex<Vec<Post>>,
        next_id: AtomicUsize,
        inserts: AtomicUsize,
        failing: AtomicBool,
        gated: AtomicBool,
        gate: Notify,
    }

    impl TestStore {
        fn with_posts(count: usize) -> Self {
            let now = Utc::now();
            let rows = (0..count)
                .map(|i| Post {
                    id: PostId::new(format!("seed-{i}")),
                    message: format!("post {i}"),
                    image: None,
                    created_at: now - Duration::minutes(i as i64),
                })
                .collect();
            Self {
                rows: Mutex::new(rows),
                ..Self::default()
            }
        }

        fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(RepoError::Connection("store offline".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostStore for TestStore {
        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.gated.load(Ordering::SeqCst) {
                self.gate.notified().await;
            }
            self.check()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let post = Post {
                id: PostId::new(format!("new-{id}")),
                message: post.message,
                image: post.image,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().insert(0, post.clone());
            Ok(post)
        }

        async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let post = rows
                .iter_mut()
                .find(|post| &post.id == id)
                .ok_or(RepoError::NotFound)?;
            post.apply(&changes);
            Ok(post.clone())
        }

        async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
            self.check()?;
            self.rows.lock().unwrap().retain(|post| &post.id != id);
            Ok(())
        }
    }

    async fn loaded_wall(count: usize) -> (Arc<TestStore>, Wall) {
        let store = Arc::new(TestStore::with_posts(count));
        let wall = Wall::new(store.clone());
        wall.load().await;
        (store, wall)
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|post| post.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_load_keeps_store_order() {
        let store = Arc::new(TestStore::with_posts(3));
        let wall = Wall::new(store);
        assert!(wall.snapshot().await.posts_loading);

        wall.load().await;

        let snapshot = wall.snapshot().await;
        assert!(!snapshot.posts_loading);
        assert_eq!(ids(&snapshot.posts), ["seed-0", "seed-1", "seed-2"]);
    }

    #[tokio::test]
    async fn test_load_failure_raises_alert() {
        let store = Arc::new(TestStore::with_posts(3));
        store.fail(true);
        let wall = Wall::new(store.clone());

        wall.load().await;

        let snapshot = wall.snapshot().await;
        assert!(!snapshot.posts_loading);
        assert!(snapshot.load_failed);
        assert!(snapshot.posts.is_empty());
        assert_eq!(
            wall.take_notices().await,
            vec![Notice::alert("Failed to load posts.")]
        );

        store.fail(false);
        wall.load().await;

        let snapshot = wall.snapshot().await;
        assert!(!snapshot.load_failed);
        assert_eq!(snapshot.posts.len(), 3);
    }

    #[tokio::test]
    async fn test_share_prepends_and_clears_composer() {
        let (_store, wall) = loaded_wall(2).await;
        wall.compose("  hello wall  ", Some("data:image/png;base64,AA==".into()))
            .await;

        let post = wall.share().await.unwrap();

        assert_eq!(post.message, "hello wall");
        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.posts.len(), 3);
        assert_eq!(snapshot.posts[0].id, post.id);
        assert_eq!(snapshot.posts[0].image.as_deref(), Some("data:image/png;base64,AA=="));
        assert_eq!(snapshot.composer, Composer::default());
        assert!(!snapshot.busy);
        assert_eq!(
            wall.take_notices().await,
            vec![Notice::toast("Posted successfully!")]
        );
    }

    #[tokio::test]
    async fn test_share_blank_text_is_noop() {
        let (store, wall) = loaded_wall(1).await;
        wall.compose(" \n ", None).await;

        assert!(wall.share().await.is_none());

        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(wall.snapshot().await.posts.len(), 1);
        assert!(wall.take_notices().await.is_empty());
    }

    #[tokio::test]
    async fn test_share_truncates_long_text() {
        let (_store, wall) = loaded_wall(0).await;
        wall.compose(&"z".repeat(1000), None).await;

        let post = wall.share().await.unwrap();

        assert_eq!(post.message.chars().count(), MAX_MESSAGE_LEN);
    }

    #[tokio::test]
    async fn test_share_failure_keeps_draft() {
        let (store, wall) = loaded_wall(1).await;
        store.fail(true);
        wall.compose("try again", None).await;

        assert!(wall.share().await.is_none());

        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.composer.text(), "try again");
        assert!(!snapshot.busy);
        assert_eq!(snapshot.posts.len(), 1);
        assert_eq!(
            wall.take_notices().await,
            vec![Notice::alert("Failed to share post.")]
        );
    }

    #[tokio::test]
    async fn test_share_while_busy_keeps_later_draft() {
        let store = Arc::new(TestStore::default());
        store.gated.store(true, Ordering::SeqCst);
        let wall = Arc::new(Wall::new(store.clone()));
        wall.load().await;

        wall.compose("first", None).await;
        let first = tokio::spawn({
            let wall = wall.clone();
            async move { wall.share().await }
        });
        while !wall.snapshot().await.busy {
            tokio::task::yield_now().await;
        }

        wall.compose("second draft", None).await;
        assert!(wall.share().await.is_none());

        store.gate.notify_one();
        let shared = first.await.unwrap().unwrap();
        assert_eq!(shared.message, "first");

        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.composer.text(), "second draft");
        assert_eq!(snapshot.posts.len(), 1);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(
            wall.take_notices().await,
            vec![
                Notice::alert(BUSY_MESSAGE),
                Notice::toast("Posted successfully!")
            ]
        );

        store.gated.store(false, Ordering::SeqCst);
        let second = wall.share().await.unwrap();
        assert_eq!(second.message, "second draft");
        assert_eq!(ids(&wall.snapshot().await.posts)[0], second.id.as_str());
        assert_eq!(wall.snapshot().await.composer, Composer::default());
    }

    #[tokio::test]
    async fn test_begin_edit_closes_delete_confirmation() {
        let (_store, wall) = loaded_wall(2).await;
        let id = PostId::new("seed-1");

        wall.request_delete(id.clone()).await.unwrap();
        wall.begin_edit(&id).await.unwrap();
        wall.cancel_edit().await;

        assert_eq!(wall.snapshot().await.pending_delete, None);
        assert!(!wall.confirm_delete().await);
        assert_eq!(wall.snapshot().await.posts.len(), 2);
    }

    #[tokio::test]
    async fn test_save_edit_updates_in_place() {
        let (_store, wall) = loaded_wall(3).await;
        let before = wall.snapshot().await.posts;
        let target = before[1].id.clone();

        wall.begin_edit(&target).await.unwrap();
        wall.revise(&target, "edited", Some("https://example.com/cat.png".into()))
            .await;
        assert!(wall.save_edit(&target).await);

        let after = wall.snapshot().await;
        assert_eq!(ids(&after.posts), ids(&before));
        assert_eq!(after.posts[1].message, "edited");
        assert_eq!(after.posts[1].image.as_deref(), Some("https://example.com/cat.png"));
        assert_eq!(after.posts[1].created_at, before[1].created_at);
        assert_eq!(after.posts[0], before[0]);
        assert_eq!(after.posts[2], before[2]);
        assert_eq!(after.edit, EditState::Idle);
        assert_eq!(wall.take_notices().await, vec![Notice::toast("Post updated!")]);
    }

    #[tokio::test]
    async fn test_begin_edit_discards_previous_draft() {
        let (_store, wall) = loaded_wall(2).await;
        let a = PostId::new("seed-0");
        let b = PostId::new("seed-1");

        wall.begin_edit(&b).await.unwrap();
        wall.revise(&b, "unsaved change to b", None).await;
        wall.begin_edit(&a).await.unwrap();

        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.edit.editing_id(), Some(&a));
        assert_eq!(snapshot.edit.draft().unwrap().message, "post 0");
        assert_eq!(snapshot.posts[1].message, "post 1");

        // Saving b now does nothing: its draft is gone.
        assert!(!wall.save_edit(&b).await);
        assert_eq!(wall.snapshot().await.posts[1].message, "post 1");
    }

    #[tokio::test]
    async fn test_save_edit_failure_keeps_editing() {
        let (store, wall) = loaded_wall(1).await;
        let id = PostId::new("seed-0");
        wall.begin_edit(&id).await.unwrap();
        wall.revise(&id, "changed", None).await;
        store.fail(true);

        assert!(!wall.save_edit(&id).await);

        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.posts[0].message, "post 0");
        assert!(snapshot.edit.is_editing(&id));
        assert!(!snapshot.busy);
        assert_eq!(
            wall.take_notices().await,
            vec![Notice::alert("Failed to update post.")]
        );
    }

    #[tokio::test]
    async fn test_save_edit_rejects_blank_message() {
        let (_store, wall) = loaded_wall(1).await;
        let id = PostId::new("seed-0");
        wall.begin_edit(&id).await.unwrap();
        wall.revise(&id, "   ", None).await;

        assert!(!wall.save_edit(&id).await);
        assert_eq!(wall.snapshot().await.posts[0].message, "post 0");
        assert_eq!(wall.take_notices().await.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_edit_has_no_remote_effect() {
        let (_store, wall) = loaded_wall(1).await;
        let id = PostId::new("seed-0");
        wall.begin_edit(&id).await.unwrap();
        wall.revise(&id, "never saved", None).await;
        wall.cancel_edit().await;

        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.edit, EditState::Idle);
        assert_eq!(snapshot.posts[0].message, "post 0");
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_post() {
        let (_store, wall) = loaded_wall(1).await;
        assert!(matches!(
            wall.begin_edit(&PostId::new("missing")).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (_store, wall) = loaded_wall(3).await;
        let target = PostId::new("seed-1");

        wall.request_delete(target.clone()).await.unwrap();
        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.posts.len(), 3);
        assert_eq!(snapshot.pending_delete, Some(target.clone()));

        wall.cancel_delete().await;
        let snapshot = wall.snapshot().await;
        assert_eq!(snapshot.posts.len(), 3);
        assert_eq!(snapshot.pending_delete, None);
        assert!(!wall.confirm_delete().await);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_only_that_post() {
        let (store, wall) = loaded_wall(4).await;
        let before = wall.snapshot().await.posts;

        wall.request_delete(PostId::new("seed-2")).await.unwrap();
        assert!(wall.confirm_delete().await);

        let after = wall.snapshot().await;
        assert_eq!(ids(&after.posts), ["seed-0", "seed-1", "seed-3"]);
        assert_eq!(after.posts[0], before[0]);
        assert_eq!(after.posts[1], before[1]);
        assert_eq!(after.posts[2], before[3]);
        assert_eq!(after.pending_delete, None);
        assert_eq!(store.rows.lock().unwrap().len(), 3);
        assert_eq!(wall.take_notices().await, vec![Notice::toast("Post deleted!")]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_post() {
        let (store, wall) = loaded_wall(2).await;
        store.fail(true);

        assert!(!wall.delete_post(&PostId::new("seed-0")).await);

        assert_eq!(wall.snapshot().await.posts.len(), 2);
        assert_eq!(
            wall.take_notices().await,
            vec![Notice::alert("Failed to delete post.")]
        );
    }

    #[tokio::test]
    async fn test_request_delete_unknown_post() {
        let (_store, wall) = loaded_wall(1).await;
        assert!(wall.request_delete(PostId::new("nope")).await.is_err());
        assert_eq!(wall.snapshot().await.pending_delete, None);
    }
}
