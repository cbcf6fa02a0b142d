//! Presentation preferences persisted as a small JSON document.
//!
//! Recognized keys are `theme`, `inputWordWrap` and `listWordWrap`. Missing
//! keys take their defaults, unknown keys are ignored, and a file that fails
//! to parse as a whole is replaced by the defaults.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::models::ThemeMode;

/// Preference file read/write failure. Never fatal to the app.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "preferences file I/O failed: {err}"),
            Self::Parse(err) => write!(f, "preferences file is malformed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

fn default_true() -> bool {
    true
}

/// User presentation preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_true", alias = "input_word_wrap")]
    pub input_word_wrap: bool,
    #[serde(default = "default_true", alias = "list_word_wrap")]
    pub list_word_wrap: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            input_word_wrap: true,
            list_word_wrap: true,
        }
    }
}

impl Preferences {
    /// Load preferences from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Load preferences, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(prefs) => {
                info!(
                    "event=prefs_load module=prefs status=ok theme={} input_wrap={} list_wrap={}",
                    prefs.theme.label(),
                    prefs.input_word_wrap,
                    prefs.list_word_wrap
                );
                prefs
            }
            Err(err) => {
                warn!(
                    "event=prefs_load module=prefs status=error fallback=defaults path={} error={}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Write preferences as pretty JSON, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
