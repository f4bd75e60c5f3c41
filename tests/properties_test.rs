//! Properties of the diff, counting, weighting and normalization.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use proptest::prelude::*;
use word_delta::calculator::{
    ContentNormalizer,
    DiffNode,
    Script,
    ScriptWeightConfig,
    count_added,
    diff,
};
use word_delta::config::WordDeltaSettings;

/// Tokens from a small alphabet so that runs actually repeat.
fn tokens(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 0..max_len)
}

proptest! {
    #[test]
    fn diff_reconstructs_both_sides(before in tokens(16), current in tokens(16)) {
        let script = diff(&before, &current);

        prop_assert_eq!(script.before_tokens(), before.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(script.current_tokens(), current.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn identical_sequences_only_match(before in prop::collection::vec("[a-e]", 1..16)) {
        let script = diff(&before, &before);

        prop_assert!(script.is_unchanged());
        prop_assert_eq!(script.len(), before.len());
        prop_assert_eq!(count_added(&script), 0);
    }

    #[test]
    fn disjoint_sequences_are_one_change(
        before in prop::collection::vec("[a-e]", 1..8),
        current in prop::collection::vec("[v-z]", 1..8),
    ) {
        let script = diff(&before, &current);

        prop_assert_eq!(
            script.nodes().to_vec(),
            vec![DiffNode::Changed { removed: before.clone(), added: current.clone() }]
        );
    }

    #[test]
    fn appending_unseen_tokens_never_lowers_the_count(
        before in tokens(12),
        current in tokens(12),
        extra in prop::collection::vec("[v-z][0-9]", 1..4),
    ) {
        let base = count_added(&diff(&before, &current));
        let extended: Vec<String> = current.iter().chain(&extra).cloned().collect();

        prop_assert!(count_added(&diff(&before, &extended)) >= base);
    }

    #[test]
    fn unweighted_languages_are_neutral(count in 0_u64..1_000_000_000, lang in "[a-z]{2,3}") {
        let weights = ScriptWeightConfig::default();
        prop_assume!(!weights.is_ideogram(&lang));

        prop_assert_eq!(weights.adjust(count, &lang), count);
    }

    #[test]
    fn normalization_is_deterministic(raw in ".{0,200}") {
        let normalizer = ContentNormalizer::new(&WordDeltaSettings::default()).unwrap();

        for script in [Script::Letter, Script::Ideogram] {
            prop_assert_eq!(normalizer.normalize(&raw, script), normalizer.normalize(&raw, script));
        }
    }
}

#[test]
fn earliest_maximal_run_wins() {
    let before = ["x", "a", "b", "y", "a", "b"];
    let current = ["a", "b"];

    let script = diff(&before, &current);

    assert_eq!(script.before_tokens(), before.to_vec());
    assert_eq!(
        script.nodes().first(),
        Some(&DiffNode::Changed { removed: vec!["x".to_string()], added: vec![] })
    );
}
