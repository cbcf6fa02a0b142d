//! Mood entry record and input validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identity of a mood entry.
pub type EntryId = i64;

/// One persisted mood record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: EntryId,
    pub text: String,
    /// Local time as `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
}

impl MoodEntry {
    /// Format for the history list: `"{created_at} - {text}"`
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.created_at, self.text)
    }
}

/// Rejection reasons for user-supplied mood text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyText,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "mood text cannot be empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// Trim surrounding whitespace and reject text that is empty afterwards.
pub fn normalize_text(raw: &str) -> Result<&str, EntryValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EntryValidationError::EmptyText);
    }
    Ok(trimmed)
}
