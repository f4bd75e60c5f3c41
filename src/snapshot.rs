//! Stored snapshots of memoized results.
//!
//! A snapshot is serialized to JSON and zlib compressed. Bytes that do not
//! decode are reported as [`SnapshotError::Malformed`] so callers can treat
//! them as a cache miss.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::io::{
    Read,
    Write,
};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{
    Deserialize,
    Serialize,
};
use tokio::sync::RwLock;

use crate::error::SnapshotError;
use crate::item::{
    ItemKey,
    LastTranslation,
};
use crate::ports::SnapshotStore;

/// Memoized per-language results of one item at one revision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub revision: Option<i64>,
    pub last_translations: BTreeMap<String, LastTranslation>,
}

impl StoredItem {
    /// Entry for `lang` if it was stored at `revision` and carries a result.
    #[must_use]
    pub fn reusable(&self, revision: Option<i64>, lang: &str) -> Option<&LastTranslation> {
        if revision.is_none() || self.revision != revision {
            return None;
        }
        self.last_translations.get(lang).filter(|entry| entry.computed.is_some())
    }
}

/// # Errors
/// [`SnapshotError::Backend`] if serialization or compression fails.
pub fn encode(item: &StoredItem) -> Result<Vec<u8>, SnapshotError> {
    let json = serde_json::to_vec(item).map_err(|e| SnapshotError::Backend(e.to_string()))?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json).map_err(|e| SnapshotError::Backend(e.to_string()))?;
    encoder.finish().map_err(|e| SnapshotError::Backend(e.to_string()))
}

/// # Errors
/// [`SnapshotError::Malformed`] if `bytes` is not a compressed snapshot.
pub fn decode(bytes: &[u8]) -> Result<StoredItem, SnapshotError> {
    let mut json = Vec::new();
    ZlibDecoder::new(bytes)
        .read_to_end(&mut json)
        .map_err(|e| SnapshotError::Malformed(format!("decompression failed: {e}")))?;

    serde_json::from_slice(&json)
        .map_err(|e| SnapshotError::Malformed(format!("invalid snapshot data: {e}")))
}

/// Process-local [`SnapshotStore`] keeping encoded snapshots.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    /// Encoded snapshots by item
    entries: RwLock<HashMap<ItemKey, Vec<u8>>>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes as they would come from a database column.
    pub async fn insert_raw(&self, key: ItemKey, bytes: Vec<u8>) {
        self.entries.write().await.insert(key, bytes);
    }

    /// Drops the snapshot of `key`, e.g. after the host edited the item.
    pub async fn invalidate(&self, key: ItemKey) -> bool {
        self.entries.write().await.remove(&key).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, key: ItemKey) -> Result<Option<StoredItem>, SnapshotError> {
        let entries = self.entries.read().await;
        entries.get(&key).map(|bytes| decode(bytes)).transpose()
    }

    async fn save(&self, key: ItemKey, item: &StoredItem) -> Result<(), SnapshotError> {
        let bytes = encode(item)?;
        self.entries.write().await.insert(key, bytes);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::calculator::{
        DiffNode,
        DiffScript,
    };
    use crate::item::{
        ComputedResult,
        ItemType,
    };

    fn stored(revision: Option<i64>) -> StoredItem {
        let diff = DiffScript::from(vec![
            DiffNode::Matched("hello".to_string()),
            DiffNode::Changed { removed: vec![], added: vec!["world".to_string()] },
        ]);
        let mut last_translations = BTreeMap::new();
        last_translations.insert(
            "de".to_string(),
            LastTranslation {
                computed: Some(ComputedResult { words_to_translate: 1, diff }),
                ..LastTranslation::new("de").with_original_content("hello")
            },
        );
        last_translations.insert("fr".to_string(), LastTranslation::new("fr"));
        StoredItem { revision, last_translations }
    }

    #[rstest]
    fn decode_restores_encoded_snapshot() {
        let item = stored(Some(5));

        let bytes = encode(&item).unwrap();

        assert_eq!(decode(&bytes).unwrap(), item);
    }

    #[rstest]
    #[case::not_compressed(b"{\"revision\":1}".to_vec())]
    #[case::empty(Vec::new())]
    fn decode_rejects_garbage(#[case] bytes: Vec<u8>) {
        assert_that!(decode(&bytes), err(matches_pattern!(SnapshotError::Malformed(anything()))));
    }

    #[rstest]
    fn decode_rejects_wrong_shape() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"[1, 2, 3]").unwrap();
        let bytes = encoder.finish().unwrap();

        assert_that!(decode(&bytes), err(matches_pattern!(SnapshotError::Malformed(anything()))));
    }

    #[rstest]
    #[case::same_revision(Some(5), "de", true)]
    #[case::other_revision(Some(6), "de", false)]
    #[case::no_revision(None, "de", false)]
    #[case::not_computed(Some(5), "fr", false)]
    #[case::unknown_language(Some(5), "it", false)]
    fn reusable(#[case] revision: Option<i64>, #[case] lang: &str, #[case] expected: bool) {
        assert_that!(stored(Some(5)).reusable(revision, lang).is_some(), eq(expected));
    }

    #[tokio::test]
    async fn memory_store_reads_its_writes() {
        let store = MemorySnapshotStore::new();
        let key = ItemKey::new(1, ItemType::Post);

        assert_that!(store.load(key).await, ok(none()));

        store.save(key, &stored(Some(1))).await.unwrap();
        store.save(key, &stored(Some(2))).await.unwrap();

        let loaded = store.load(key).await.unwrap().unwrap();
        assert_that!(loaded.revision, some(eq(2)));
        assert_that!(store.len().await, eq(1));
    }

    #[tokio::test]
    async fn memory_store_reports_malformed_bytes() {
        let store = MemorySnapshotStore::new();
        let key = ItemKey::new(1, ItemType::String);
        store.insert_raw(key, b"not zlib".to_vec()).await;

        assert_that!(store.load(key).await, err(matches_pattern!(SnapshotError::Malformed(anything()))));
        assert_that!(store.invalidate(key).await, eq(true));
        assert_that!(store.is_empty().await, eq(true));
    }
}
