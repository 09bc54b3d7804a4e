//! # Wall Core
//!
//! The domain layer of the wall.
//! Posts, the composer and feed UI state, the relative-time formatter and the
//! `Wall` orchestrator. Store access goes through the `PostStore` port; this
//! crate performs no I/O of its own.

pub mod composer;
pub mod domain;
pub mod error;
pub mod feed;
pub mod notice;
pub mod ports;
pub mod time;
pub mod wall;

pub use error::{DomainError, RepoError};
pub use wall::{Wall, WallSnapshot};
