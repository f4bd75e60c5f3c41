//! Per-script weighting of raw token counts.

use std::collections::HashMap;

use crate::config::WordDeltaSettings;

/// Words-per-ideogram factors keyed by lowercase source language code.
///
/// A language present here is tokenized per character and its count is
/// multiplied by the factor. Absent languages are counted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptWeightConfig {
    /// Lowercase language code → factor
    factors: HashMap<String, f64>,
}

impl ScriptWeightConfig {
    #[must_use]
    pub fn new<I, K>(factors: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self {
            factors: factors
                .into_iter()
                .map(|(lang, factor)| (lang.as_ref().to_lowercase(), factor))
                .collect(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &WordDeltaSettings) -> Self {
        Self::new(settings.script_weights.iter().map(|(lang, factor)| (lang, *factor)))
    }

    /// Factor for `source_lang`, matched case-insensitively.
    #[must_use]
    pub fn factor(&self, source_lang: &str) -> Option<f64> {
        self.factors.get(&source_lang.to_lowercase()).copied()
    }

    /// True when `source_lang` is counted per character.
    #[must_use]
    pub fn is_ideogram(&self, source_lang: &str) -> bool {
        self.factor(source_lang).is_some()
    }

    /// Applies the factor of `source_lang` to `raw_count`, rounding half up.
    #[must_use]
    #[allow(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn adjust(&self, raw_count: u64, source_lang: &str) -> u64 {
        self.factor(source_lang)
            .map_or(raw_count, |factor| (raw_count as f64 * factor).round() as u64)
    }
}

impl Default for ScriptWeightConfig {
    fn default() -> Self {
        Self::from_settings(&WordDeltaSettings::default())
    }
}
