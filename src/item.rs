//! Translatable item model.
//!
//! Every kind the host can ask about is one case of [`Translatable`]. Leaf
//! kinds carry an [`Item`] with one [`LastTranslation`] per loaded target
//! language; composites carry their members and sum them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::calculator::DiffScript;
use crate::error::WordsError;

/// Kind of a translatable item as named by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Post,
    String,
    StringPackage,
    StringBatch,
    Job,
}

impl ItemType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::String => "string",
            Self::StringPackage => "stringPackage",
            Self::StringBatch => "stringBatch",
            Self::Job => "job",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = WordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "string" => Ok(Self::String),
            "stringPackage" => Ok(Self::StringPackage),
            "stringBatch" => Ok(Self::StringBatch),
            "job" => Ok(Self::Job),
            other => Err(WordsError::InvalidItemType(other.to_string())),
        }
    }
}

/// Identity of an item: its id is only unique within its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKey {
    pub id: u64,
    pub item_type: ItemType,
}

impl ItemKey {
    #[must_use]
    pub const fn new(id: u64, item_type: ItemType) -> Self {
        Self { id, item_type }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.item_type, self.id)
    }
}

/// Memoized outcome of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedResult {
    pub words_to_translate: u64,
    pub diff: DiffScript,
}

/// What was last translated into one target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastTranslation {
    pub lang_code: String,
    /// Source-language content the last translation was made from (not the
    /// translated text).
    pub original_content: Option<String>,
    /// `None` until calculated.
    pub computed: Option<ComputedResult>,
}

impl LastTranslation {
    #[must_use]
    pub fn new(lang_code: impl Into<String>) -> Self {
        Self { lang_code: lang_code.into(), original_content: None, computed: None }
    }

    #[must_use]
    pub fn with_original_content(mut self, content: impl Into<String>) -> Self {
        self.original_content = Some(content.into());
        self
    }

    /// Calculated words, 0 while not calculated.
    #[must_use]
    pub fn words_to_translate(&self) -> u64 {
        self.computed.as_ref().map_or(0, |computed| computed.words_to_translate)
    }
}

/// A single piece of source content and its per-language history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub source_lang: String,
    /// Current source content, as last loaded.
    pub content: Option<String>,
    pub last_translations: BTreeMap<String, LastTranslation>,
}

impl Item {
    #[must_use]
    pub fn new(id: u64, source_lang: impl Into<String>) -> Self {
        Self {
            id,
            source_lang: source_lang.into(),
            content: None,
            last_translations: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the entry for the translation's language.
    pub fn add_last_translation(&mut self, last_translation: LastTranslation) {
        self.last_translations.insert(last_translation.lang_code.clone(), last_translation);
    }

    /// Words for `lang_code`, or the sum over all loaded languages when `None`.
    ///
    /// Languages that were not loaded count as 0.
    #[must_use]
    pub fn words_to_translate(&self, lang_code: Option<&str>) -> u64 {
        match lang_code {
            Some(lang) => {
                self.last_translations.get(lang).map_or(0, LastTranslation::words_to_translate)
            }
            None => self.last_translations.values().map(LastTranslation::words_to_translate).sum(),
        }
    }
}

/// A taxonomy term attached to a post; one [`Item`] per content field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: u64,
    pub fields: Vec<Item>,
}

impl Term {
    #[must_use]
    pub fn words_to_translate(&self, lang_code: Option<&str>) -> u64 {
        self.fields.iter().map(|field| field.words_to_translate(lang_code)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub item: Item,
    /// Last edit stamp; snapshots taken at another revision are stale.
    pub revision: Option<i64>,
    pub terms: Vec<Term>,
}

impl Post {
    /// Words of the post body plus its terms.
    #[must_use]
    pub fn words_to_translate(&self, lang_code: Option<&str>) -> u64 {
        self.item.words_to_translate(lang_code)
            + self.terms.iter().map(|term| term.words_to_translate(lang_code)).sum::<u64>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringBatch {
    pub id: u64,
    pub source_lang: String,
    pub strings: Vec<Item>,
}

impl StringBatch {
    #[must_use]
    pub fn words_to_translate(&self, lang_code: Option<&str>) -> u64 {
        self.strings.iter().map(|string| string.words_to_translate(lang_code)).sum()
    }
}

/// A translation job: one target language of one wrapped item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: u64,
    pub source_lang: String,
    pub target_lang: String,
    pub item: Box<Translatable>,
}

impl Job {
    /// Words of the wrapped item in the job's target language; any other
    /// language has nothing to translate.
    #[must_use]
    pub fn words_to_translate(&self, lang_code: Option<&str>) -> u64 {
        match lang_code {
            Some(lang) if lang != self.target_lang => 0,
            _ => self.item.words_to_translate(Some(&self.target_lang)),
        }
    }
}

/// Closed set of item kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translatable {
    Post(Post),
    String(Item),
    StringPackage(Item),
    StringBatch(StringBatch),
    Job(Job),
}

impl Translatable {
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Post(_) => ItemType::Post,
            Self::String(_) => ItemType::String,
            Self::StringPackage(_) => ItemType::StringPackage,
            Self::StringBatch(_) => ItemType::StringBatch,
            Self::Job(_) => ItemType::Job,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Post(post) => post.item.id,
            Self::String(item) | Self::StringPackage(item) => item.id,
            Self::StringBatch(batch) => batch.id,
            Self::Job(job) => job.id,
        }
    }

    #[must_use]
    pub const fn key(&self) -> ItemKey {
        ItemKey::new(self.id(), self.item_type())
    }

    #[must_use]
    pub fn source_lang(&self) -> &str {
        match self {
            Self::Post(post) => &post.item.source_lang,
            Self::String(item) | Self::StringPackage(item) => &item.source_lang,
            Self::StringBatch(batch) => &batch.source_lang,
            Self::Job(job) => &job.source_lang,
        }
    }

    /// Words for one language, or summed over all loaded languages.
    #[must_use]
    pub fn words_to_translate(&self, lang_code: Option<&str>) -> u64 {
        match self {
            Self::Post(post) => post.words_to_translate(lang_code),
            Self::String(item) | Self::StringPackage(item) => item.words_to_translate(lang_code),
            Self::StringBatch(batch) => batch.words_to_translate(lang_code),
            Self::Job(job) => job.words_to_translate(lang_code),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn translated(lang: &str, words: u64) -> LastTranslation {
        LastTranslation {
            computed: Some(ComputedResult { words_to_translate: words, diff: DiffScript::default() }),
            ..LastTranslation::new(lang)
        }
    }

    fn item(id: u64, words: &[(&str, u64)]) -> Item {
        let mut item = Item::new(id, "en");
        for (lang, count) in words {
            item.add_last_translation(translated(lang, *count));
        }
        item
    }

    #[rstest]
    #[case::post("post", ItemType::Post)]
    #[case::string("string", ItemType::String)]
    #[case::package("stringPackage", ItemType::StringPackage)]
    #[case::batch("stringBatch", ItemType::StringBatch)]
    #[case::job("job", ItemType::Job)]
    fn item_type_round_trips_through_its_name(#[case] name: &str, #[case] expected: ItemType) {
        let parsed: ItemType = name.parse().unwrap();

        assert_that!(parsed, eq(expected));
        assert_that!(parsed.to_string(), eq(name));
    }

    #[rstest]
    fn unknown_item_type_is_rejected() {
        let result = "attachment".parse::<ItemType>();

        assert_that!(
            result.map_err(|error| error.to_string()),
            err(eq("Item type \"attachment\" is not recognized"))
        );
    }

    #[rstest]
    fn item_key_display() {
        assert_that!(ItemKey::new(12, ItemType::Post).to_string(), eq("post#12"));
    }

    #[rstest]
    fn words_per_language_and_total() {
        let item = item(1, &[("de", 4), ("fr", 6)]);

        assert_that!(item.words_to_translate(Some("de")), eq(4));
        assert_that!(item.words_to_translate(Some("it")), eq(0));
        assert_that!(item.words_to_translate(None), eq(10));
    }

    #[rstest]
    fn uncalculated_translation_counts_zero() {
        let mut item = Item::new(1, "en");
        item.add_last_translation(LastTranslation::new("de").with_original_content("Hallo"));

        assert_that!(item.words_to_translate(None), eq(0));
    }

    #[rstest]
    fn post_adds_term_words() {
        let post = Post {
            item: item(3, &[("de", 10)]),
            revision: Some(1_700_000_000),
            terms: vec![
                Term { id: 7, fields: vec![item(7, &[("de", 1)]), item(7, &[("de", 2)])] },
                Term { id: 8, fields: vec![item(8, &[("fr", 5)])] },
            ],
        };

        assert_that!(post.words_to_translate(Some("de")), eq(13));
        assert_that!(post.words_to_translate(None), eq(18));
    }

    #[rstest]
    fn batch_sums_strings() {
        let batch = StringBatch {
            id: 4,
            source_lang: "en".to_string(),
            strings: vec![item(1, &[("de", 2)]), item(2, &[("de", 3), ("fr", 1)])],
        };

        assert_that!(Translatable::StringBatch(batch).words_to_translate(Some("de")), eq(5));
    }

    #[rstest]
    #[case::target(Some("de"), 7)]
    #[case::other_language(Some("fr"), 0)]
    #[case::all_languages(None, 7)]
    fn job_counts_only_its_target_language(#[case] lang: Option<&str>, #[case] expected: u64) {
        let job = Job {
            id: 9,
            source_lang: "en".to_string(),
            target_lang: "de".to_string(),
            item: Box::new(Translatable::String(item(1, &[("de", 7), ("fr", 4)]))),
        };
        let job = Translatable::Job(job);

        assert_that!(job.words_to_translate(lang), eq(expected));
        assert_that!(job.key(), eq(ItemKey::new(9, ItemType::Job)));
    }
}
