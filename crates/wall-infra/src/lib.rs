//! # Wall Infrastructure
//!
//! Concrete implementations of the ports defined in `wall-core`.
//! This crate contains the hosted store client, the in-memory fallback store,
//! and image inlining.
//!
//! ## Feature Flags
//!
//! - `rest` (default) - PostgREST-dialect client for the hosted table store via reqwest
//! - without `rest` - no external services, in-memory store only

pub mod image;
pub mod store;

// Re-exports - In-Memory
pub use image::{ImageError, inline_image};
pub use store::InMemoryPostStore;

// Re-exports - Hosted store
#[cfg(feature = "rest")]
pub use store::{RestPostStore, RestStoreConfig};
