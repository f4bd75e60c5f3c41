//! Automatic translation cost projection.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::WordsError;
use crate::ports::PricingLookup;

/// Projected cost, distinguishing "free" from "no automatic engine".
///
/// Serializes as a number of cents or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Cents(u64),
    Unavailable,
}

impl Cost {
    #[must_use]
    pub const fn cents(self) -> Option<u64> {
        match self {
            Self::Cents(cents) => Some(cents),
            Self::Unavailable => None,
        }
    }
}

/// Turns word counts into costs through a [`PricingLookup`].
#[derive(Debug, Clone)]
pub struct CostProjector<P> {
    /// Host pricing source
    pricing: P,
}

impl<P: PricingLookup> CostProjector<P> {
    pub const fn new(pricing: P) -> Self {
        Self { pricing }
    }

    /// `word_count × cost per word`, or [`Cost::Unavailable`] when no engine
    /// translates into `target_lang`.
    ///
    /// # Errors
    /// [`WordsError::Pricing`] when the lookup itself fails.
    pub async fn project(
        &self,
        word_count: u64,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Cost, WordsError> {
        let per_word = self.pricing.cost_per_word(target_lang, source_lang).await?;

        let cost = per_word
            .map_or(Cost::Unavailable, |cents| Cost::Cents(word_count.saturating_mul(cents)));
        tracing::debug!(word_count, target_lang, ?cost, "Projected cost");
        Ok(cost)
    }

    /// Projects every entry of a per-language word map.
    ///
    /// # Errors
    /// The first failing lookup.
    pub async fn project_langs(
        &self,
        words: &BTreeMap<String, u64>,
        source_lang: Option<&str>,
    ) -> Result<BTreeMap<String, Cost>, WordsError> {
        let costs = try_join_all(words.iter().map(|(lang, count)| async move {
            self.project(*count, lang, source_lang).await.map(|cost| (lang.clone(), cost))
        }))
        .await?;

        Ok(costs.into_iter().collect())
    }
}
