//! Settings store: persistence layer for the sync settings.
//!
//! The settings live in a single JSON document read and written through
//! the `FileSystem` port:
//!
//! ```text
//! { "sync_command": "git pull && git push", "working_directory": "/home/me/vault" }
//! ```

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::settings::{SettingField, Settings};

/// Loads and persists [`Settings`].
///
/// All I/O goes through `ctx.fs`, so the store works unchanged against the
/// live disk and the in-memory filesystem.
pub struct SettingsStore<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> SettingsStore<'a> {
    /// Creates a store backed by the document at `path`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path) -> Self {
        Self { ctx, path: path.to_path_buf() }
    }

    /// Path of the settings document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted settings.
    ///
    /// Never fails: a missing document yields the defaults, and an
    /// unreadable or malformed one is logged and also yields the defaults.
    #[must_use]
    pub fn load(&self) -> Settings {
        if !self.ctx.fs.exists(&self.path) {
            return Settings::default();
        }
        let contents = match self.ctx.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read settings: {e}");
                return Settings::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "Failed to parse settings: {e}");
            Settings::default()
        })
    }

    /// Writes `settings` as the whole document, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, settings: &Settings) -> Result<(), String> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        self.ctx
            .fs
            .write(&self.path, &json)
            .map_err(|e| format!("Failed to write settings {}: {e}", self.path.display()))
    }

    /// Sets one field and persists the whole object.
    ///
    /// Returns the updated settings. A failed save is logged, not returned;
    /// the caller still gets the edited value.
    pub fn update(&self, field: SettingField, value: &str) -> Settings {
        let next = self.load().with_field(field, value);
        if let Err(e) = self.save(&next) {
            tracing::error!("{e}");
        }
        next
    }
}
