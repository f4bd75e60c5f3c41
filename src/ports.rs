//! Collaborators the orchestrator depends on.
//!
//! Storage, content lookup and pricing live in the host system; these traits
//! are the only way the core reaches them. Implementations are injected into
//! [`crate::WordDeltaOrchestrator`] and [`crate::CostProjector`].

use std::future::Future;

use crate::error::{
    LoaderError,
    PricingError,
    SnapshotError,
};
use crate::item::ItemKey;
use crate::snapshot::StoredItem;

/// Metadata of an item as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub source_lang: String,
    /// Last edit stamp; `None` disables snapshot reuse for the item.
    pub revision: Option<i64>,
    pub members: Members,
}

/// Kind-specific parts of an [`ItemRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Members {
    #[default]
    None,
    /// Terms attached to a post
    Terms(Vec<TermRecord>),
    /// String ids of a batch
    Strings(Vec<u64>),
    Job(JobRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    pub id: u64,
    /// Source content of each translatable field (name, description, ...).
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub target_lang: String,
    pub item: ItemKey,
    /// Stored result of an earlier calculation, if any.
    pub words_to_translate: Option<u64>,
    /// Stored automatic translation cost in cents, if any.
    pub automatic_translation_cost: Option<u64>,
}

/// Source content and translation history.
pub trait ContentLoader: Send + Sync {
    /// # Errors
    /// [`LoaderError::NotFound`] when no item has this key.
    fn load_item(&self, key: ItemKey) -> impl Future<Output = Result<ItemRecord, LoaderError>> + Send;

    /// Content to translate into `target_lang`. Packages and posts may
    /// differ per language; plain strings return the same text for all.
    fn current_content(
        &self,
        key: ItemKey,
        target_lang: &str,
    ) -> impl Future<Output = Result<String, LoaderError>> + Send;

    /// Source content the last translation into `target_lang` was made from,
    /// or `None` if the item was never translated into it.
    fn last_translated_original_content(
        &self,
        key: ItemKey,
        target_lang: &str,
    ) -> impl Future<Output = Result<Option<String>, LoaderError>> + Send;

    /// Whether the term is translated at all into `target_lang`.
    fn is_term_translatable(
        &self,
        _term_id: u64,
        _target_lang: &str,
    ) -> impl Future<Output = Result<bool, LoaderError>> + Send {
        async { Ok(true) }
    }
}

/// Persistence of memoized results.
///
/// A `load` must observe the most recent successful `save` for the same key.
pub trait SnapshotStore: Send + Sync {
    fn load(
        &self,
        key: ItemKey,
    ) -> impl Future<Output = Result<Option<StoredItem>, SnapshotError>> + Send;

    fn save(
        &self,
        key: ItemKey,
        item: &StoredItem,
    ) -> impl Future<Output = Result<(), SnapshotError>> + Send;
}

/// Automatic translation pricing.
pub trait PricingLookup: Send + Sync {
    /// Cost per word in cents, or `None` when no automatic engine serves
    /// `target_lang`.
    fn cost_per_word(
        &self,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> impl Future<Output = Result<Option<u64>, PricingError>> + Send;
}

/// Removes host-specific macro syntax from content.
pub trait ShortcodeRemover: Send + Sync {
    fn strip(&self, content: &str) -> String;
}
