use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum message length, counted in characters.
pub const MAX_MESSAGE_LEN: usize = 280;

/// Opaque post identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Post entity - a single message shared on the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub message: String,
    /// Inline `data:` URL or external URL.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Apply saved changes. Identity and creation time never change.
    pub fn apply(&mut self, changes: &PostChanges) {
        self.message = changes.message.clone();
        self.image = changes.image.clone();
    }
}

/// Payload for creating a post. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub message: String,
    pub image: Option<String>,
}

impl NewPost {
    /// Build an insert payload from raw composer input.
    ///
    /// The message is truncated to [`MAX_MESSAGE_LEN`] and trimmed; an empty
    /// result is rejected.
    pub fn new(text: &str, image: Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            message: validated_message(text)?,
            image,
        })
    }
}

/// Replacement message and image for an existing post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostChanges {
    pub message: String,
    pub image: Option<String>,
}

impl PostChanges {
    /// Build an update payload from the edit draft.
    ///
    /// The message is truncated but kept as written otherwise. A blank
    /// message is rejected.
    pub fn new(text: &str, image: Option<String>) -> Result<Self, DomainError> {
        let message = truncate_message(text);
        if message.trim().is_empty() {
            return Err(empty_message());
        }
        Ok(Self { message, image })
    }
}

/// Cut `text` down to at most [`MAX_MESSAGE_LEN`] characters.
pub fn truncate_message(text: &str) -> String {
    match text.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

fn validated_message(text: &str) -> Result<String, DomainError> {
    let message = truncate_message(text).trim().to_string();
    if message.is_empty() {
        return Err(empty_message());
    }
    Ok(message)
}

fn empty_message() -> DomainError {
    DomainError::Validation("Message must not be empty".into())
}
