//! Title editing: the text field of the edit dialog, without the dialog.

use thiserror::Error;

pub const MIN_TITLE_LEN: usize = 3;
pub const MAX_TITLE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `length` is the trimmed length, in characters.
    #[error("Min length is 3. Now {length} symbols.")]
    TooShort { length: usize },

    /// `length` is the trimmed length, in characters.
    #[error("Max length is 64. Now {length} symbols.")]
    TooLong { length: usize },
}

/// Both bounds apply to the trimmed title; surrounding whitespace is kept
/// when the title is saved but never counted.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.trim().chars().count();
    if length < MIN_TITLE_LEN {
        return Err(ValidationError::TooShort { length });
    }
    if length > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong { length });
    }
    Ok(())
}

/// Edit state for one title. The field starts at the original value; `save`
/// hands back the raw text when it is long enough and `cancel` throws the
/// edits away.
#[derive(Debug, Clone)]
pub struct TitleEditor {
    original: String,
    text: String,
}

impl TitleEditor {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            text: original.clone(),
            original,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Replace the field contents. Input past `MAX_TITLE_LEN` characters is
    /// dropped, the way a length-limited text field refuses extra keystrokes.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = match text.char_indices().nth(MAX_TITLE_LEN) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text,
        };
    }

    /// The untrimmed text, if its trimmed length is at least `MIN_TITLE_LEN`.
    pub fn save(&self) -> Result<String, ValidationError> {
        validate_title(&self.text)?;
        Ok(self.text.clone())
    }

    /// Restore the original value and return it.
    pub fn cancel(&mut self) -> &str {
        self.text.clone_from(&self.original);
        &self.text
    }
}
