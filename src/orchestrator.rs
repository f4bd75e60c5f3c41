//! Per-item calculation cycles.
//!
//! The orchestrator is the only place with I/O. It resolves an item through
//! the [`ContentLoader`], reuses memoized results from the [`SnapshotStore`]
//! when the item's revision still matches, computes the rest with the
//! [`WordsCalculator`] and saves the snapshot once per cycle.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use serde::Serialize;

use crate::calculator::WordsCalculator;
use crate::cost::{
    Cost,
    CostProjector,
};
use crate::error::{
    LoaderError,
    WordsError,
};
use crate::item::{
    Item,
    ItemKey,
    ItemType,
    Job,
    LastTranslation,
    Post,
    StringBatch,
    Term,
    Translatable,
};
use crate::ports::{
    ContentLoader,
    ItemRecord,
    JobRecord,
    Members,
    PricingLookup,
    SnapshotStore,
    TermRecord,
};
use crate::snapshot::StoredItem;

/// Words and cost of one translation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: u64,
    pub words_to_translate: u64,
    pub automatic_translation_cost: Cost,
}

/// Outcome of one language of a leaf item.
#[derive(Debug)]
struct LangOutcome {
    /// Reused or freshly computed entry
    last_translation: LastTranslation,
    /// Current content when it had to be fetched
    content: Option<String>,
    /// Whether the result came from the snapshot
    reused: bool,
}

/// Entry point of the host: computes words per item and language.
#[derive(Debug)]
pub struct WordDeltaOrchestrator<L, S> {
    /// Pure calculation pipeline
    calculator: WordsCalculator,
    /// Source content and translation history
    loader: L,
    /// Memoized results
    store: S,
}

impl<L: ContentLoader, S: SnapshotStore> WordDeltaOrchestrator<L, S> {
    pub const fn new(calculator: WordsCalculator, loader: L, store: S) -> Self {
        Self { calculator, loader, store }
    }

    pub const fn calculator(&self) -> &WordsCalculator {
        &self.calculator
    }

    pub const fn loader(&self) -> &L {
        &self.loader
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Words to translate per requested language.
    ///
    /// With `fresh_translation` every stored snapshot and translation history
    /// is ignored and the whole current content is charged.
    ///
    /// # Errors
    /// - [`WordsError::InvalidItemType`] for an unknown `item_type`
    /// - [`WordsError::InvalidItemId`] when the loader does not know the item
    /// - [`WordsError::Loader`] / [`WordsError::Snapshot`] for collaborator failures
    pub async fn compute_for_item(
        &self,
        id: u64,
        item_type: &str,
        target_langs: &[String],
        fresh_translation: bool,
    ) -> Result<BTreeMap<String, u64>, WordsError> {
        let item_type: ItemType = item_type.parse()?;
        let item = self.load(ItemKey::new(id, item_type), target_langs, fresh_translation).await?;

        let words = target_langs
            .iter()
            .map(|lang| (lang.clone(), item.words_to_translate(Some(lang))))
            .collect::<BTreeMap<_, _>>();
        tracing::debug!(id, %item_type, ?words, "Computed words to translate");
        Ok(words)
    }

    /// Loads an item with its words computed for `target_langs`.
    ///
    /// Jobs ignore `target_langs` and load their own target language only;
    /// other languages report zero words.
    ///
    /// # Errors
    /// See [`Self::compute_for_item`].
    pub async fn load(
        &self,
        key: ItemKey,
        target_langs: &[String],
        fresh_translation: bool,
    ) -> Result<Translatable, WordsError> {
        let record = self.load_record(key).await?;
        if key.item_type == ItemType::Job {
            return self.load_job(key, record, fresh_translation).await.map(Translatable::Job);
        }
        self.load_member(key, record, target_langs, fresh_translation).await
    }

    /// Words and automatic translation cost of a job.
    ///
    /// Stored figures are returned as-is when both are known, unless
    /// `fresh_translation` is set.
    ///
    /// # Errors
    /// See [`Self::compute_for_item`]; also [`WordsError::Pricing`].
    pub async fn job_summary<P: PricingLookup>(
        &self,
        job_id: u64,
        fresh_translation: bool,
        projector: &CostProjector<P>,
    ) -> Result<JobSummary, WordsError> {
        let key = ItemKey::new(job_id, ItemType::Job);
        let record = self.load_record(key).await?;
        let details = job_details(key, &record)?;

        if !fresh_translation {
            if let (Some(words), Some(cents)) =
                (details.words_to_translate, details.automatic_translation_cost)
            {
                tracing::debug!(%key, words, cents, "Using stored job figures");
                return Ok(JobSummary {
                    id: job_id,
                    words_to_translate: words,
                    automatic_translation_cost: Cost::Cents(cents),
                });
            }
        }

        let job = self.load_job(key, record, fresh_translation).await?;
        let words_to_translate = job.words_to_translate(None);
        let automatic_translation_cost =
            projector.project(words_to_translate, &job.target_lang, None).await?;

        Ok(JobSummary { id: job_id, words_to_translate, automatic_translation_cost })
    }

    /// Item metadata; an unknown item is [`WordsError::InvalidItemId`].
    async fn load_record(&self, key: ItemKey) -> Result<ItemRecord, WordsError> {
        self.loader.load_item(key).await.map_err(|error| match error {
            LoaderError::NotFound => {
                WordsError::InvalidItemId { id: key.id, item_type: key.item_type }
            }
            other => WordsError::Loader(other),
        })
    }

    /// Every kind except jobs.
    async fn load_member(
        &self,
        key: ItemKey,
        record: ItemRecord,
        target_langs: &[String],
        fresh_translation: bool,
    ) -> Result<Translatable, WordsError> {
        match key.item_type {
            ItemType::Post => self
                .load_post(key, record, target_langs, fresh_translation)
                .await
                .map(Translatable::Post),
            ItemType::String => self
                .load_leaf(key, &record, target_langs, fresh_translation)
                .await
                .map(Translatable::String),
            ItemType::StringPackage => self
                .load_leaf(key, &record, target_langs, fresh_translation)
                .await
                .map(Translatable::StringPackage),
            ItemType::StringBatch => self
                .load_batch(key, record, target_langs, fresh_translation)
                .await
                .map(Translatable::StringBatch),
            ItemType::Job => {
                Err(WordsError::InvalidItemType(format!("{} inside a job", key.item_type)))
            }
        }
    }

    /// The wrapped item, computed for the job's target language only.
    async fn load_job(
        &self,
        key: ItemKey,
        record: ItemRecord,
        fresh_translation: bool,
    ) -> Result<Job, WordsError> {
        let details = job_details(key, &record)?.clone();
        let target_langs = [details.target_lang];

        let inner_record = self.load_record(details.item).await?;
        let item =
            self.load_member(details.item, inner_record, &target_langs, fresh_translation).await?;
        let [target_lang] = target_langs;

        Ok(Job { id: key.id, source_lang: record.source_lang, target_lang, item: Box::new(item) })
    }

    /// Post body plus its terms.
    async fn load_post(
        &self,
        key: ItemKey,
        record: ItemRecord,
        target_langs: &[String],
        fresh_translation: bool,
    ) -> Result<Post, WordsError> {
        let item = self.load_leaf(key, &record, target_langs, fresh_translation).await?;

        let terms = match &record.members {
            Members::Terms(terms) => {
                let source_lang = item.source_lang.as_str();
                try_join_all(
                    terms.iter().map(|term| self.load_term(term, source_lang, target_langs)),
                )
                .await?
            }
            _ => Vec::new(),
        };

        Ok(Post { item, revision: record.revision, terms })
    }

    /// Terms are always charged in full for the languages they are translated into.
    async fn load_term(
        &self,
        term: &TermRecord,
        source_lang: &str,
        target_langs: &[String],
    ) -> Result<Term, WordsError> {
        let translatable = try_join_all(
            target_langs.iter().map(|lang| self.loader.is_term_translatable(term.id, lang)),
        )
        .await?;
        let langs = target_langs
            .iter()
            .zip(translatable)
            .filter_map(|(lang, translatable)| translatable.then_some(lang))
            .collect::<Vec<_>>();

        let fields = term
            .fields
            .iter()
            .map(|content| {
                let mut field = Item::new(term.id, source_lang);
                for lang in &langs {
                    let mut last_translation =
                        LastTranslation::new(lang.as_str()).with_original_content("");
                    self.calculator.for_last_translation(
                        &mut last_translation,
                        source_lang,
                        content,
                    );
                    field.add_last_translation(last_translation);
                }
                field.content = Some(content.clone());
                field
            })
            .collect();

        Ok(Term { id: term.id, fields })
    }

    /// Members missing from the loader are skipped.
    async fn load_batch(
        &self,
        key: ItemKey,
        record: ItemRecord,
        target_langs: &[String],
        fresh_translation: bool,
    ) -> Result<StringBatch, WordsError> {
        let ids = match &record.members {
            Members::Strings(ids) => ids.as_slice(),
            _ => &[],
        };

        let strings = try_join_all(ids.iter().map(|&id| async move {
            let string_key = ItemKey::new(id, ItemType::String);
            match self.load_record(string_key).await {
                Ok(string_record) => self
                    .load_leaf(string_key, &string_record, target_langs, fresh_translation)
                    .await
                    .map(Some),
                Err(WordsError::InvalidItemId { .. }) => {
                    tracing::warn!(
                        batch = %key,
                        string = %string_key,
                        "Skipping missing batch member"
                    );
                    Ok(None)
                }
                Err(error) => Err(error),
            }
        }))
        .await?;

        Ok(StringBatch {
            id: key.id,
            source_lang: record.source_lang,
            strings: strings.into_iter().flatten().collect(),
        })
    }

    /// Computes one leaf item, reusing and then updating its snapshot.
    async fn load_leaf(
        &self,
        key: ItemKey,
        record: &ItemRecord,
        target_langs: &[String],
        fresh_translation: bool,
    ) -> Result<Item, WordsError> {
        let memoizable = !fresh_translation && record.revision.is_some();
        let stored = if memoizable { self.load_snapshot(key).await } else { None };

        let outcomes = try_join_all(target_langs.iter().map(|lang| {
            self.last_translation(key, record, stored.as_ref(), lang, fresh_translation)
        }))
        .await?;

        let mut item = Item::new(key.id, record.source_lang.as_str());
        let mut computed_any = false;
        for outcome in outcomes {
            computed_any |= !outcome.reused;
            if item.content.is_none() {
                item.content = outcome.content;
            }
            item.add_last_translation(outcome.last_translation);
        }

        if memoizable && computed_any {
            self.save_snapshot(key, record.revision, stored, &item).await?;
        }

        Ok(item)
    }

    /// Stored entry for `lang` if reusable, otherwise a fresh calculation.
    async fn last_translation(
        &self,
        key: ItemKey,
        record: &ItemRecord,
        stored: Option<&StoredItem>,
        lang: &str,
        fresh_translation: bool,
    ) -> Result<LangOutcome, WordsError> {
        if let Some(hit) = stored.and_then(|stored| stored.reusable(record.revision, lang)) {
            tracing::debug!(%key, lang, "Reusing stored result");
            return Ok(LangOutcome { last_translation: hit.clone(), content: None, reused: true });
        }

        let current = self.loader.current_content(key, lang).await?;
        let original = if lang == record.source_lang {
            // Nothing to translate into the source language itself.
            Some(current.clone())
        } else if fresh_translation {
            Some(String::new())
        } else {
            self.loader.last_translated_original_content(key, lang).await?
        };

        tracing::debug!(
            %key,
            lang,
            has_original = original.is_some(),
            "Computing words to translate"
        );
        let mut last_translation =
            LastTranslation { original_content: original, ..LastTranslation::new(lang) };
        self.calculator.for_last_translation(&mut last_translation, &record.source_lang, &current);

        Ok(LangOutcome { last_translation, content: Some(current), reused: false })
    }

    /// Unusable snapshots are a cache miss.
    async fn load_snapshot(&self, key: ItemKey) -> Option<StoredItem> {
        match self.store.load(key).await {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(%key, %error, "Ignoring unusable snapshot");
                None
            }
        }
    }

    /// Keeps stored languages that were not requested this cycle.
    async fn save_snapshot(
        &self,
        key: ItemKey,
        revision: Option<i64>,
        previous: Option<StoredItem>,
        item: &Item,
    ) -> Result<(), WordsError> {
        let mut last_translations = previous
            .filter(|previous| previous.revision == revision)
            .map(|previous| previous.last_translations)
            .unwrap_or_default();
        last_translations.extend(
            item.last_translations.iter().map(|(lang, entry)| (lang.clone(), entry.clone())),
        );

        self.store.save(key, &StoredItem { revision, last_translations }).await?;
        tracing::debug!(%key, ?revision, "Saved snapshot");
        Ok(())
    }
}

/// Job part of a job's record.
fn job_details(key: ItemKey, record: &ItemRecord) -> Result<&JobRecord, WordsError> {
    match &record.members {
        Members::Job(details) => Ok(details),
        _ => Err(WordsError::Loader(LoaderError::Backend(format!("{key} has no job details")))),
    }
}
