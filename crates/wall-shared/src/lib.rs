//! # Wall Shared
//!
//! Wire types shared between the server and the store adapter.

pub mod dto;
pub mod response;

pub use dto::{PostPatch, PostRow, RowId};
pub use response::{ApiResponse, ErrorResponse};
