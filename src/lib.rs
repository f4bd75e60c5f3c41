//! word-delta
//!
//! Words-to-translate calculation for translation billing: content is
//! normalized, tokenized and diffed against what was last translated, and only
//! newly added words are charged. Ideogram languages are counted per character
//! and weighted.
//!
//! [`calculator`] is pure and synchronous. [`WordDeltaOrchestrator`] drives it
//! per item through the collaborator traits in [`ports`].

pub mod calculator;
pub mod config;
pub mod cost;
pub mod error;
pub mod item;
pub mod orchestrator;
pub mod ports;
pub mod snapshot;

pub use calculator::{
    DiffNode,
    DiffScript,
    WordsCalculator,
};
pub use cost::{
    Cost,
    CostProjector,
};
pub use error::WordsError;
pub use item::{
    ComputedResult,
    ItemKey,
    ItemType,
    Translatable,
};
pub use orchestrator::{
    JobSummary,
    WordDeltaOrchestrator,
};
pub use snapshot::MemorySnapshotStore;
