//! Data models for the mood tracker
//!
//! This module contains the core data structures:
//! - Mood entry records and text validation
//! - Enums for preferences and dialog state

pub mod entry;
pub mod enums;

// Re-exports for convenient access
pub use entry::{normalize_text, EntryId, EntryValidationError, MoodEntry};
pub use enums::{Dialog, ThemeMode};
