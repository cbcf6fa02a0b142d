//! Enums used throughout the mood tracker
//!
//! This module contains the enum types used for preferences and modal
//! UI state.

use serde::{Deserialize, Serialize};

/// Color scheme selection, persisted in the preferences file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

/// Modal dialog shown over the main screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Informational notice (validation, nothing selected). Any key dismisses.
    Notice { title: String, message: String },
    /// Storage failure. Any key dismisses.
    Error { title: String, message: String },
    /// "Clear all" confirmation: `y` confirms, `n`/Esc cancels.
    ConfirmClear,
}

impl Dialog {
    pub fn notice(title: &str, message: &str) -> Self {
        Dialog::Notice {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Dialog::Error {
            title: title.to_string(),
            message: message.into(),
        }
    }
}
