//! Optional plural markers such as `word(s)` or `ami/e`.

use regex::Regex;

/// Folds optional plural suffixes into the bare word form.
#[derive(Debug, Clone)]
pub(super) struct PluralRule {
    /// `(s)`, `(es)`, ... directly after a letter run
    parenthesized: Regex,
    /// Italian-style `/i`, `/che` alternatives, also mid-word
    slashed: Regex,
}

impl PluralRule {
    /// Compiles the plural patterns.
    pub(super) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            parenthesized: Regex::new(r"(?i)\((s|es|aux|er|e|и|y|ات)\)")?,
            slashed: Regex::new(r"(?i)/(i|che)")?,
        })
    }

    /// Keeps the suffix and drops its brackets or slash.
    pub(super) fn apply(&self, text: &str) -> String {
        let text = self.parenthesized.replace_all(text, "$1");
        self.slashed.replace_all(&text, "$1").into_owned()
    }
}
