//! User-facing notifications raised by the orchestrator.

/// A flash notification shown once on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Non-blocking success banner.
    Toast(String),
    /// Blocking error dialog.
    Alert(String),
}

impl Notice {
    pub fn toast(message: impl Into<String>) -> Self {
        Self::Toast(message.into())
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self::Alert(message.into())
    }
}
