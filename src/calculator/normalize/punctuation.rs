//! Punctuation folding.

use regex::Regex;

/// Folds or strips punctuation depending on the script.
#[derive(Debug, Clone)]
pub(super) struct PunctuationRule {
    /// Separator run folded to one space (letter scripts)
    separators: Regex,
    /// Anything that is neither a letter nor a digit (ideogram scripts)
    non_word: Regex,
}

impl PunctuationRule {
    /// Compiles the punctuation patterns.
    pub(super) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            separators: Regex::new(r"[\s.,?!/\\*\-_+%$]+")?,
            non_word: Regex::new(r"[^\p{L}\p{N}]")?,
        })
    }

    /// Normalizes apostrophes, drops standalone ones and folds separator
    /// runs into one space.
    pub(super) fn fold(&self, text: &str) -> String {
        let text = text.replace(['\u{2019}', '\u{2018}', '`'], "'");
        let text = text.replace(" ' ", " ");
        self.separators.replace_all(&text, " ").into_owned()
    }

    /// Removes every character that is not a letter or a digit.
    pub(super) fn strip(&self, text: &str) -> String {
        self.non_word.replace_all(text, "").into_owned()
    }
}
