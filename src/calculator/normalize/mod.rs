//! Content normalization ahead of tokenizing.
//!
//! Each rule lives in its own module; [`ContentNormalizer`] runs them in a
//! fixed order per [`Script`]. Letter scripts keep word boundaries and fold
//! punctuation to spaces, ideogram scripts drop everything that is not a
//! letter or a digit.

mod form_fields;
mod html;
mod numbers;
mod plural;
mod punctuation;
mod shortcode;
mod unicode;

use std::sync::Arc;

pub use self::shortcode::BracketShortcodes;
use self::{
    form_fields::FormFieldRule,
    html::MarkupRule,
    numbers::NumberRule,
    plural::PluralRule,
    punctuation::PunctuationRule,
};
use super::tokenize::Script;
use crate::config::{
    ConfigError,
    WordDeltaSettings,
};
use crate::ports::ShortcodeRemover;

/// Ordered text-cleaning pipeline.
#[derive(Clone)]
pub struct ContentNormalizer {
    /// Hidden inputs, tags and translatable attributes
    markup: MarkupRule,
    /// Host-provided or bracket shortcode removal
    shortcodes: Arc<dyn ShortcodeRemover>,
    /// `word(s)` style suffixes
    plural: PluralRule,
    /// Form-builder merge tags
    form_fields: FormFieldRule,
    /// Separator folding and stripping
    punctuation: PunctuationRule,
    /// Standalone digit runs
    numbers: NumberRule,
}

impl std::fmt::Debug for ContentNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentNormalizer")
            .field("markup", &self.markup)
            .field("shortcodes", &"<dyn ShortcodeRemover>")
            .finish_non_exhaustive()
    }
}

impl ContentNormalizer {
    /// Builds the pipeline with [`BracketShortcodes`] as shortcode remover.
    ///
    /// # Errors
    /// Returns [`ConfigError::Pattern`] when an attribute name yields an
    /// invalid pattern.
    pub fn new(settings: &WordDeltaSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            markup: MarkupRule::new(&settings.translatable_attributes)?,
            shortcodes: Arc::new(BracketShortcodes::new()?),
            plural: PluralRule::new()?,
            form_fields: FormFieldRule::new()?,
            punctuation: PunctuationRule::new()?,
            numbers: NumberRule::new()?,
        })
    }

    /// Replaces the shortcode remover, e.g. with one that knows the host's
    /// registered shortcodes.
    #[must_use]
    pub fn with_shortcode_remover(mut self, remover: Arc<dyn ShortcodeRemover>) -> Self {
        self.shortcodes = remover;
        self
    }

    /// Normalizes `raw` with the rule set of `script`.
    ///
    /// Never fails; the empty string normalizes to a whitespace-only string.
    #[must_use]
    pub fn normalize(&self, raw: &str, script: Script) -> String {
        let normalized = match script {
            Script::Letter => self.normalize_letter(raw),
            Script::Ideogram => self.normalize_ideogram(raw),
        };
        tracing::trace!(
            ?script,
            raw_len = raw.len(),
            normalized_len = normalized.len(),
            "Normalized content"
        );
        normalized
    }

    /// Markup, shortcodes, plurals, merge tags, punctuation, numbers,
    /// invisible characters, then lowercase.
    fn normalize_letter(&self, raw: &str) -> String {
        let text = self.markup.apply(raw);
        let text = self.shortcodes.strip(&text);
        let text = self.plural.apply(&text);
        let text = self.form_fields.apply(&text);
        let text = self.punctuation.fold(&text);
        let text = self.numbers.apply(&text);
        unicode::clean(&text).to_lowercase()
    }

    /// Markup, merge tags, shortcodes, non-word characters, numbers, then
    /// invisible characters. No plural folding and no case change.
    fn normalize_ideogram(&self, raw: &str) -> String {
        let text = self.markup.apply(raw);
        let text = self.form_fields.apply(&text);
        let text = self.shortcodes.strip(&text);
        let text = self.punctuation.strip(&text);
        let text = self.numbers.apply(&text);
        unicode::clean(&text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn normalizer() -> ContentNormalizer {
        ContentNormalizer::new(&WordDeltaSettings::default()).unwrap()
    }

    #[rstest]
    fn letter_markup_numbers_and_punctuation(normalizer: ContentNormalizer) {
        assert_that!(
            normalizer.normalize("<p>Hello <b>world</b> 123!</p>", Script::Letter),
            eq("hello world ")
        );
    }

    #[rstest]
    #[case::plural("Select file(s).", "select files ")]
    #[case::shortcode(r#"[caption id="7"]A Photo[/caption]"#, "a photo ")]
    #[case::form_field("Dear {field:name}, thanks!", "dear thanks ")]
    #[case::attribute(r#"<img alt="Red Car">"#, " red car")]
    #[case::unicode_lowercase("\u{feff}ÉCOLE\u{a0}Straße", "école straße ")]
    #[case::hidden_input(r#"<input type="hidden" value="token">Send"#, "send ")]
    #[case::empty("", " ")]
    fn letter_pipeline(
        normalizer: ContentNormalizer,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_that!(normalizer.normalize(raw, Script::Letter), eq(expected));
    }

    #[rstest]
    #[case::punctuation("<p>東京、タワー。</p>", "東京タワー")]
    #[case::keeps_case("<b>Tokyo</b> タワー", "Tokyoタワー")]
    #[case::brackets_dropped("file(s)", "files")]
    #[case::attribute(r#"<img alt="写真">"#, "写真")]
    #[case::shortcode("[b]日本[/b]", "日本")]
    fn ideogram_pipeline(
        normalizer: ContentNormalizer,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_that!(normalizer.normalize(raw, Script::Ideogram), eq(expected));
    }

    #[derive(Debug)]
    struct DropAll;

    impl ShortcodeRemover for DropAll {
        fn strip(&self, _content: &str) -> String {
            String::new()
        }
    }

    #[rstest]
    fn custom_shortcode_remover(normalizer: ContentNormalizer) {
        let normalizer = normalizer.with_shortcode_remover(Arc::new(DropAll));

        assert_that!(normalizer.normalize("anything at all", Script::Letter), eq(""));
    }

    #[rstest]
    fn custom_translatable_attributes() {
        let settings = WordDeltaSettings {
            translatable_attributes: vec!["data-label".to_string()],
            ..WordDeltaSettings::default()
        };
        let normalizer = ContentNormalizer::new(&settings).unwrap();

        assert_that!(
            normalizer.normalize(r#"<b data-label="Extra" title="Skip">x</b>"#, Script::Letter),
            eq("x extra")
        );
    }
}
