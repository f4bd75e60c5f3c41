//! Chargeable word count of a diff.

use super::diff::{
    DiffNode,
    DiffScript,
};

/// Number of added tokens in `script`.
///
/// Only newly introduced words are charged; matched and removed tokens are free.
#[must_use]
pub fn count_added(script: &DiffScript) -> u64 {
    script
        .into_iter()
        .map(|node| match node {
            DiffNode::Changed { added, .. } => added.len() as u64,
            DiffNode::Matched(_) => 0,
        })
        .sum()
}
