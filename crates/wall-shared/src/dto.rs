//! Data Transfer Objects - row and payload shapes of the hosted `posts` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Columns requested when listing posts.
pub const POST_COLUMNS: &str = "id,message,image,created_at";

/// Primary key as the store returns it: text (UUID) or an integer identity column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    pub fn into_string(self) -> String {
        match self {
            RowId::Text(id) => id,
            RowId::Number(id) => id.to_string(),
        }
    }
}

/// A row of the `posts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRow {
    pub id: RowId,
    pub message: String,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of an insert or update: the writable columns.
///
/// `image` is always sent, so an update without an image clears the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    pub message: String,
    pub image: Option<String>,
}
