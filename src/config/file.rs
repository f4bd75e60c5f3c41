//! Reading settings from disk.

use std::path::Path;

use super::{
    ConfigError,
    WordDeltaSettings,
};

impl WordDeltaSettings {
    /// File looked up by [`WordDeltaSettings::discover`].
    pub const FILE_NAME: &'static str = ".word-delta.json";

    /// Settings from [`Self::FILE_NAME`] in `dir`, or the defaults when the
    /// directory has none.
    ///
    /// # Errors
    /// Read, parse and validation failures of an existing file.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(Self::FILE_NAME);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Settings from an explicit file; missing keys take their defaults.
    ///
    /// # Errors
    /// - [`ConfigError::IoError`] when the file cannot be read
    /// - [`ConfigError::ParseError`] on malformed JSON
    /// - [`ConfigError::ValidationErrors`] when a value is out of range
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        Ok(settings)
    }
}
