//! Post composer form state.

use crate::domain::{MAX_MESSAGE_LEN, truncate_message};

/// Draft text and staged image of the post composer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composer {
    text: String,
    image: Option<String>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Replace the draft text, truncating anything past the limit.
    pub fn set_text(&mut self, text: &str) {
        self.text = truncate_message(text);
    }

    /// Stage an already-inlined image (`data:` URL).
    pub fn stage_image(&mut self, image: String) {
        self.image = Some(image);
    }

    /// Characters left before the limit.
    pub fn remaining(&self) -> usize {
        MAX_MESSAGE_LEN.saturating_sub(self.text.chars().count())
    }

    pub fn can_submit(&self, busy: bool) -> bool {
        !busy && !self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.image = None;
    }
}
