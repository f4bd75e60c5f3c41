use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "scriptWeights.ja")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to compile normalization pattern: {0}")]
    Pattern(#[from] regex::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordDeltaSettings {
    /// Words per ideogram, keyed by source language code.
    ///
    /// Only languages listed here are counted per character; every other
    /// language is split on whitespace and counted unweighted.
    pub script_weights: BTreeMap<String, f64>,

    /// Markup attributes whose values are translated along with the body text.
    pub translatable_attributes: Vec<String>,
}

impl WordDeltaSettings {
    /// # Errors
    /// - Empty language code
    /// - Non-finite or non-positive weight
    /// - Empty attribute list or attribute name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (lang, factor) in &self.script_weights {
            if lang.trim().is_empty() {
                errors.push(ValidationError::new(
                    "scriptWeights",
                    "Language codes cannot be empty. Example: {\"ja\": 0.5}",
                ));
            }
            if !factor.is_finite() || *factor <= 0.0 {
                errors.push(ValidationError::new(
                    format!("scriptWeights.{lang}"),
                    format!("The weight must be a positive number, got {factor}"),
                ));
            }
        }

        if self.translatable_attributes.is_empty() {
            errors.push(ValidationError::new(
                "translatableAttributes",
                "At least one attribute is required. Example: [\"alt\", \"title\"]",
            ));
        }

        for (index, attribute) in self.translatable_attributes.iter().enumerate() {
            if attribute.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("translatableAttributes[{index}]"),
                    "The attribute name cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for WordDeltaSettings {
    fn default() -> Self {
        Self {
            script_weights: BTreeMap::from([
                ("ja".to_string(), 0.5),
                ("ko".to_string(), 0.5),
                ("zh-hans".to_string(), 0.55),
                ("zh-hant".to_string(), 0.55),
            ]),
            translatable_attributes: ["alt", "title", "placeholder", "aria-label", "value"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
