//! Settings for the calculator: script weights and translatable markup attributes.
mod file;
mod types;

pub use types::{
    ConfigError,
    ValidationError,
    WordDeltaSettings,
};
