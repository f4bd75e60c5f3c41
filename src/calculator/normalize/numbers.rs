//! Standalone number removal.

use regex::Regex;

/// Removes digit runs that are not part of a word.
#[derive(Debug, Clone)]
pub(super) struct NumberRule {
    /// A digit run on word boundaries plus trailing whitespace
    standalone: Regex,
}

impl NumberRule {
    /// Compiles the number pattern.
    pub(super) fn new() -> Result<Self, regex::Error> {
        Ok(Self { standalone: Regex::new(r"\b\d+\b\s*")? })
    }

    /// Removes numbers that stand alone; digits inside words (`mp3`) stay.
    pub(super) fn apply(&self, text: &str) -> String {
        self.standalone.replace_all(text, "").into_owned()
    }
}
