//! Persisted sync settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "VAULT_SYNC_SETTINGS";

/// Settings file used when neither a flag nor the env var names one.
pub const DEFAULT_SETTINGS_PATH: &str = ".vault-sync/data.json";

/// The two user-editable sync settings.
///
/// Missing keys deserialize to the empty string; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shell command line to run.
    #[serde(rename = "sync_command")]
    pub command: String,
    /// Directory the command runs in. Empty means the current directory.
    pub working_directory: String,
}

impl Settings {
    /// Returns a copy with `field` set to `value` and the other field kept.
    #[must_use]
    pub fn with_field(&self, field: SettingField, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            SettingField::Command => next.command = value.to_string(),
            SettingField::WorkingDirectory => next.working_directory = value.to_string(),
        }
        next
    }

    /// Reads the current value of `field`.
    #[must_use]
    pub fn get(&self, field: SettingField) -> &str {
        match field {
            SettingField::Command => &self.command,
            SettingField::WorkingDirectory => &self.working_directory,
        }
    }
}

/// One editable settings field, with the text the settings surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    /// The sync command line.
    Command,
    /// The working directory.
    WorkingDirectory,
}

impl SettingField {
    /// All fields, in display order.
    pub const ALL: [Self; 2] = [Self::Command, Self::WorkingDirectory];

    /// Short label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Command => "Sync command",
            Self::WorkingDirectory => "Working directory",
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Command => "Custom command to run when you want to sync your vault.",
            Self::WorkingDirectory => "Working directory to run sync command in.",
        }
    }

    /// Placeholder shown when the field is empty.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Command => "Enter sync command",
            Self::WorkingDirectory => "Enter working directory",
        }
    }
}

/// Resolves the settings file: explicit path, then `VAULT_SYNC_SETTINGS`,
/// then [`DEFAULT_SETTINGS_PATH`].
#[must_use]
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::var(SETTINGS_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from),
    }
}
