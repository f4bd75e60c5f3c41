//! Error taxonomy of the words-to-translate core.

use thiserror::Error;

use crate::config::ConfigError;
use crate::item::ItemType;

/// Errors surfaced to the host.
///
/// Normalizing, tokenizing, diffing, counting and weighting never fail; every
/// variant here originates at a collaborator boundary.
#[derive(Error, Debug)]
pub enum WordsError {
    #[error("Item type \"{0}\" is not recognized")]
    InvalidItemType(String),

    #[error("Item with id {id} and type {item_type} not found")]
    InvalidItemId { id: u64, item_type: ItemType },

    #[error("Failed to load content: {0}")]
    Loader(#[from] LoaderError),

    #[error("Snapshot store failure: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Pricing lookup failed: {0}")]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Stored bytes could not be decompressed or deserialized.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PricingError(pub String);
