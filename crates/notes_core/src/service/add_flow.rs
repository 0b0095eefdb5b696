//! Add-note form state.
//!
//! The form is consumed by `submit` or `cancel`, so each form produces at
//! most one outcome.

/// Message handed from the add form back to the list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// User confirmed; carries the text exactly as typed (may be empty).
    Submitted(String),
    /// User backed out; nothing is inserted.
    Cancelled,
}

/// Single-field form for a new note title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    text: String,
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Removes the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// No validation: blank text is submitted as-is.
    pub fn submit(self) -> AddOutcome {
        AddOutcome::Submitted(self.text)
    }

    pub fn cancel(self) -> AddOutcome {
        AddOutcome::Cancelled
    }
}
