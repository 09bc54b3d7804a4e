//! Feed UI state: the single inline edit and the single delete confirmation.

use crate::domain::{MAX_MESSAGE_LEN, Post, PostId, truncate_message};

/// Unsaved message and image of the post being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub message: String,
    pub image: Option<String>,
}

impl EditDraft {
    pub fn from_post(post: &Post) -> Self {
        Self {
            message: post.message.clone(),
            image: post.image.clone(),
        }
    }

    pub fn set_message(&mut self, text: &str) {
        self.message = truncate_message(text);
    }

    pub fn remaining(&self) -> usize {
        MAX_MESSAGE_LEN.saturating_sub(self.message.chars().count())
    }
}

/// At most one post is mid-edit at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: PostId, draft: EditDraft },
}

impl EditState {
    pub fn editing_id(&self) -> Option<&PostId> {
        match self {
            Self::Idle => None,
            Self::Editing { id, .. } => Some(id),
        }
    }

    pub fn is_editing(&self, post_id: &PostId) -> bool {
        self.editing_id() == Some(post_id)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        match self {
            Self::Idle => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        match self {
            Self::Idle => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }
}

/// Pending delete confirmation, tracked by post id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    confirm_delete: Option<PostId>,
}

impl FeedState {
    /// Open the confirmation dialog for `id`, replacing any other open one.
    pub fn request_delete(&mut self, id: PostId) {
        self.confirm_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Close the dialog and hand back the id that was awaiting confirmation.
    pub fn take_confirmed(&mut self) -> Option<PostId> {
        self.confirm_delete.take()
    }

    pub fn pending_delete(&self) -> Option<&PostId> {
        self.confirm_delete.as_ref()
    }

    /// Forget a pending confirmation for a post that no longer exists.
    pub fn forget(&mut self, id: &PostId) {
        if self.confirm_delete.as_ref() == Some(id) {
            self.confirm_delete = None;
        }
    }
}
