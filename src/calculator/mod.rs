//! The pure words-to-translate calculator.
//!
//! Nothing in here performs I/O or fails: every string, including the empty
//! one, has a defined result.

pub mod count;
pub mod diff;
pub mod normalize;
pub mod tokenize;
pub mod weight;
pub mod words;

pub use count::count_added;
pub use diff::{
    DiffNode,
    DiffScript,
    diff,
};
pub use normalize::{
    BracketShortcodes,
    ContentNormalizer,
};
pub use tokenize::{
    GraphemeTokenizer,
    Script,
    Tokenizer,
    WordTokenizer,
};
pub use weight::ScriptWeightConfig;
pub use words::WordsCalculator;
