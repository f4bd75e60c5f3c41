//! Token diff based on the longest common run of tokens.
//!
//! The engine looks for the longest contiguous run of tokens shared by both
//! sequences, keeps it as matched, and repeats on the parts left and right of
//! it. Ranges without any shared token become a single changed node.
//!
//! ```text
//! before:  a b c d e
//! current: a b x e
//! result:  =a =b [-c -d +x] =e
//! ```

use std::collections::HashMap;
use std::ops::Range;

use serde::{
    Deserialize,
    Serialize,
};

/// One element of a [`DiffScript`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffNode {
    /// Token present on both sides.
    Matched(String),
    /// Tokens removed from `before` and tokens added in `current`. Either list may be empty.
    Changed { removed: Vec<String>, added: Vec<String> },
}

impl DiffNode {
    /// Tokens this node contributes to the `before` sequence.
    #[must_use]
    pub fn before_view(&self) -> &[String] {
        match self {
            Self::Matched(token) => std::slice::from_ref(token),
            Self::Changed { removed, .. } => removed,
        }
    }

    /// Tokens this node contributes to the `current` sequence.
    #[must_use]
    pub fn current_view(&self) -> &[String] {
        match self {
            Self::Matched(token) => std::slice::from_ref(token),
            Self::Changed { added, .. } => added,
        }
    }
}

/// Ordered edit description between two token sequences.
///
/// Concatenating [`DiffNode::before_view`] of all nodes gives back the
/// `before` input, and [`DiffNode::current_view`] gives back `current`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffScript {
    nodes: Vec<DiffNode>,
}

impl DiffScript {
    #[must_use]
    pub fn nodes(&self) -> &[DiffNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when no node is [`DiffNode::Changed`].
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.nodes.iter().all(|node| matches!(node, DiffNode::Matched(_)))
    }

    /// Reassembles the `before` sequence.
    #[must_use]
    pub fn before_tokens(&self) -> Vec<&str> {
        self.nodes.iter().flat_map(DiffNode::before_view).map(String::as_str).collect()
    }

    /// Reassembles the `current` sequence.
    #[must_use]
    pub fn current_tokens(&self) -> Vec<&str> {
        self.nodes.iter().flat_map(DiffNode::current_view).map(String::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a DiffScript {
    type Item = &'a DiffNode;
    type IntoIter = std::slice::Iter<'a, DiffNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl From<Vec<DiffNode>> for DiffScript {
    fn from(nodes: Vec<DiffNode>) -> Self {
        Self { nodes }
    }
}

/// Computes the diff between `before` and `current`.
///
/// When several runs share the maximal length, the one whose last token comes
/// first in `before` (then in `current`) wins. Historical counts depend on
/// this order, so it must not change.
#[must_use]
pub fn diff<T: AsRef<str>>(before: &[T], current: &[T]) -> DiffScript {
    let engine = DiffEngine::new(before, current);
    let mut nodes = Vec::new();

    // Explicit stack instead of recursion; pushed right-to-left to emit in order.
    let mut pending = vec![Step::Diff { before: 0..before.len(), current: 0..current.len() }];

    while let Some(step) = pending.pop() {
        match step {
            Step::Keep { current } => {
                nodes.extend(
                    engine.current_slice(current).map(|token| DiffNode::Matched(token.to_owned())),
                );
            }
            Step::Diff { before, current } => {
                if before.is_empty() && current.is_empty() {
                    continue;
                }

                let Some(run) = engine.longest_run(&before, &current) else {
                    nodes.push(DiffNode::Changed {
                        removed: engine.before_slice(before).map(str::to_owned).collect(),
                        added: engine.current_slice(current).map(str::to_owned).collect(),
                    });
                    continue;
                };

                let before_after = run.before_start + run.len;
                let current_after = run.current_start + run.len;

                pending.push(Step::Diff {
                    before: before_after..before.end,
                    current: current_after..current.end,
                });
                pending.push(Step::Keep { current: run.current_start..current_after });
                pending.push(Step::Diff {
                    before: before.start..run.before_start,
                    current: current.start..run.current_start,
                });
            }
        }
    }

    DiffScript { nodes }
}

/// Work item of the diff loop.
#[derive(Debug)]
enum Step {
    /// Diff the two ranges.
    Diff { before: Range<usize>, current: Range<usize> },
    /// Emit the tokens of `current` in this range as matched.
    Keep { current: Range<usize> },
}

/// A common run of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    /// Index of the first token of the run in `before`
    before_start: usize,
    /// Index of the first token of the run in `current`
    current_start: usize,
    /// Number of tokens in the run
    len: usize,
}

/// Both sequences plus the position index of `current`, built once per diff.
#[derive(Debug)]
struct DiffEngine<'a, T> {
    /// Before tokens
    before: &'a [T],
    /// Current tokens
    current: &'a [T],
    /// Ascending positions of each token value in `current`
    positions: HashMap<&'a str, Vec<usize>>,
}

impl<'a, T: AsRef<str>> DiffEngine<'a, T> {
    /// Indexes `current` by token value.
    fn new(before: &'a [T], current: &'a [T]) -> Self {
        let mut positions: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (index, token) in current.iter().enumerate() {
            positions.entry(token.as_ref()).or_default().push(index);
        }
        Self { before, current, positions }
    }

    /// Finds the first longest run inside the given ranges.
    ///
    /// `row[c]` holds the length of the common run ending at `(b, c)`; only
    /// the row of the previous before-index is kept.
    fn longest_run(&self, before: &Range<usize>, current: &Range<usize>) -> Option<Run> {
        let mut best: Option<Run> = None;
        let mut previous_row: HashMap<usize, usize> = HashMap::new();

        for (b, token) in self.before.iter().enumerate().take(before.end).skip(before.start) {
            let mut row = HashMap::new();

            if let Some(candidates) = self.positions.get(token.as_ref()) {
                let first = candidates.partition_point(|&c| c < current.start);
                for &c in candidates.iter().skip(first).take_while(|&&c| c < current.end) {
                    let diagonal = c
                        .checked_sub(1)
                        .and_then(|prev| previous_row.get(&prev))
                        .copied()
                        .unwrap_or(0);
                    let len = diagonal + 1;
                    row.insert(c, len);

                    if best.is_none_or(|run| len > run.len) {
                        best = Some(Run {
                            before_start: b + 1 - len,
                            current_start: c + 1 - len,
                            len,
                        });
                    }
                }
            }

            previous_row = row;
        }

        best
    }

    /// Tokens of `before` in `range`.
    fn before_slice(&self, range: Range<usize>) -> impl Iterator<Item = &'a str> + use<'a, T> {
        self.before.get(range).unwrap_or_default().iter().map(AsRef::as_ref)
    }

    /// Tokens of `current` in `range`.
    fn current_slice(&self, range: Range<usize>) -> impl Iterator<Item = &'a str> + use<'a, T> {
        self.current.get(range).unwrap_or_default().iter().map(AsRef::as_ref)
    }
}
