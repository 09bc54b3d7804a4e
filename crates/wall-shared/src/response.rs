//! JSON bodies returned by the server: the post list envelope and RFC 7807 problems.

use serde::Serialize;

/// Envelope for successful JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// RFC 7807 problem body. Form actions that fail before redirecting answer with one of these.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub title: &'static str,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self {
            problem_type: "about:blank",
            title: title_for(status),
            status,
            detail,
        }
    }
}

fn title_for(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        404 => "Post Not Found",
        413 => "Upload Too Large",
        _ => "Internal Server Error",
    }
}
