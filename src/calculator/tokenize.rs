//! Splitting normalized content into comparison tokens.

use unicode_segmentation::UnicodeSegmentation;

/// Splits normalized content into tokens.
pub trait Tokenizer {
    /// Tokens of `normalized` in order.
    fn tokenize(&self, normalized: &str) -> Vec<String>;
}

/// Whitespace-delimited words, for letter scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, normalized: &str) -> Vec<String> {
        normalized.split_whitespace().map(str::to_owned).collect()
    }
}

/// One token per extended grapheme cluster, for ideogram scripts.
///
/// Whitespace clusters are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphemeTokenizer;

impl Tokenizer for GraphemeTokenizer {
    fn tokenize(&self, normalized: &str) -> Vec<String> {
        normalized
            .graphemes(true)
            .filter(|grapheme| !grapheme.chars().all(char::is_whitespace))
            .map(str::to_owned)
            .collect()
    }
}

/// Writing system of a source language, selecting the rule set and tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Words separated by whitespace
    Letter,
    /// Characters counted individually
    Ideogram,
}

impl Script {
    /// Tokenizer used for this script.
    #[must_use]
    pub const fn tokenizer(self) -> &'static dyn Tokenizer {
        match self {
            Self::Letter => &WordTokenizer,
            Self::Ideogram => &GraphemeTokenizer,
        }
    }

    #[must_use]
    pub fn tokenize(self, normalized: &str) -> Vec<String> {
        self.tokenizer().tokenize(normalized)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::simple("hello world", &["hello", "world"])]
    #[case::padded("  hello \n\t world  ", &["hello", "world"])]
    #[case::empty("", &[])]
    #[case::blank("   ", &[])]
    #[case::apostrophe("don't stop", &["don't", "stop"])]
    fn word_tokenizer_splits_on_whitespace(#[case] input: &str, #[case] expected: &[&str]) {
        assert_that!(WordTokenizer.tokenize(input), eq(&expected.to_vec()));
    }

    #[rstest]
    #[case::japanese("日本語", &["日", "本", "語"])]
    #[case::spaces_skipped("中 文", &["中", "文"])]
    #[case::combining_mark("e\u{301}a", &["e\u{301}", "a"])]
    #[case::empty("", &[])]
    fn grapheme_tokenizer_splits_per_cluster(#[case] input: &str, #[case] expected: &[&str]) {
        assert_that!(GraphemeTokenizer.tokenize(input), eq(&expected.to_vec()));
    }

    #[rstest]
    fn script_selects_strategy() {
        assert_that!(Script::Letter.tokenize("東京 タワー"), len(eq(2)));
        assert_that!(Script::Ideogram.tokenize("東京 タワー"), len(eq(5)));
    }
}
