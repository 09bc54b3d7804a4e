//! Domain entities - the core business objects.

mod post;

pub use post::{MAX_MESSAGE_LEN, NewPost, Post, PostChanges, PostId, truncate_message};
