//! Words to translate for one item and target language.

use std::sync::Arc;

use super::count::count_added;
use super::diff::diff;
use super::normalize::ContentNormalizer;
use super::tokenize::Script;
use super::weight::ScriptWeightConfig;
use crate::config::{
    ConfigError,
    WordDeltaSettings,
};
use crate::item::{
    ComputedResult,
    LastTranslation,
};
use crate::ports::ShortcodeRemover;

/// Normalize, tokenize, diff, count and weight.
#[derive(Debug, Clone)]
pub struct WordsCalculator {
    normalizer: ContentNormalizer,
    weights: ScriptWeightConfig,
}

impl WordsCalculator {
    /// # Errors
    /// [`ConfigError::ValidationErrors`] for invalid settings,
    /// [`ConfigError::Pattern`] when an attribute name breaks the markup pattern.
    pub fn new(settings: &WordDeltaSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        Ok(Self {
            normalizer: ContentNormalizer::new(settings)?,
            weights: ScriptWeightConfig::from_settings(settings),
        })
    }

    #[must_use]
    pub fn with_shortcode_remover(mut self, remover: Arc<dyn ShortcodeRemover>) -> Self {
        self.normalizer = self.normalizer.with_shortcode_remover(remover);
        self
    }

    #[must_use]
    pub const fn weights(&self) -> &ScriptWeightConfig {
        &self.weights
    }

    /// Languages with a weight are counted per character.
    #[must_use]
    pub fn script_for(&self, source_lang: &str) -> Script {
        if self.weights.is_ideogram(source_lang) { Script::Ideogram } else { Script::Letter }
    }

    /// Normalized tokens of `content`.
    #[must_use]
    pub fn prepare(&self, content: &str, script: Script) -> Vec<String> {
        script.tokenize(&self.normalizer.normalize(content, script))
    }

    /// Words added in `current` compared to `before`, weighted for `source_lang`.
    #[must_use]
    pub fn compute(&self, before: &str, current: &str, source_lang: &str) -> ComputedResult {
        let script = self.script_for(source_lang);
        let before_tokens = self.prepare(before, script);
        let current_tokens = self.prepare(current, script);

        let diff = diff(&before_tokens, &current_tokens);
        let raw_count = count_added(&diff);
        let words_to_translate = self.weights.adjust(raw_count, source_lang);

        tracing::trace!(
            source_lang,
            ?script,
            before_tokens = before_tokens.len(),
            current_tokens = current_tokens.len(),
            raw_count,
            words_to_translate,
            "Computed words to translate"
        );

        ComputedResult { words_to_translate, diff }
    }

    /// Fills `last_translation.computed` unless already memoized.
    ///
    /// A missing original content means nothing was translated before, so the
    /// whole of `current` is charged.
    pub fn for_last_translation(
        &self,
        last_translation: &mut LastTranslation,
        source_lang: &str,
        current: &str,
    ) -> u64 {
        if let Some(computed) = &last_translation.computed {
            return computed.words_to_translate;
        }

        let before = last_translation.original_content.as_deref().unwrap_or_default();
        let computed = self.compute(before, current, source_lang);
        let words = computed.words_to_translate;
        last_translation.computed = Some(computed);
        words
    }
}
