#![deny(missing_docs)]

//! MeCab tokenizer for SQLite FTS5.
//!
//! MeCab splits text that has no explicit word boundaries (Japanese,
//! Korean) into a linked list of nodes. This crate walks that list and turns
//! it into the `(token, start, end)` stream FTS5 expects, with offsets that
//! are exact byte positions in the original text.
//!
//! ## Quick Start
//! ```no_run
//! use std::ops::ControlFlow;
//! use mecab_fts5::{MecabLibrary, MecabTokenizer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let library = MecabLibrary::load_from_env_or_default()?;
//!     let mut tokenizer = MecabTokenizer::create_with_global_paths(&library, &["stop789"])?;
//!     let text = "東京都に住む";
//!     tokenizer.tokenize(0, text.as_bytes(), |token| {
//!         assert_eq!(&text.as_bytes()[token.start..token.end], token.text);
//!         ControlFlow::Continue(())
//!     })?;
//!     Ok(())
//! }
//! ```
//!
//! ## Tokenizer Arguments
//! - `stop789`: drop tokens whose part-of-speech id is in [`STOP_POS_IDS`].
//! - `v` / `vv`: log lifecycle events / every node through the `log` facade.
//! - anything else is passed to `mecab_new`, after `-d` and `-r` options
//!   built from [`AnalyzerPaths`].
//!
//! ## Offset Rules
//! - Offsets are byte offsets, never character indices.
//! - Marker nodes (BOS/EOS) are never emitted; their span still counts.
//!
//! ## Environment Variables
//! - `MECAB_LIBRARY_PATH`: explicit dynamic library path.

mod analyzer;
mod buffer;
mod config;
mod constants;
mod discovery;
mod error;
mod model;
mod native;
mod paths;
mod runtime;
mod stream;
mod tokenizer;
mod types;

pub use analyzer::{AnalysisNode, Analyzer, AnalyzerFactory};
pub use constants::*;
pub use error::{MecabError, Result};
pub use model::DictionaryInfo;
pub use paths::{analyzer_paths, reset_analyzer_paths, set_dictionary_path, set_rc_path};
pub use runtime::{Mecab, MecabLibrary, MecabNode};
pub use stream::reconstruct;
pub use tokenizer::{parse_tokenizer_definition, MecabTokenizer, TokenizerArgs};
pub use types::{AnalyzerPaths, Token, TokenizerOptions, Verbosity};

#[cfg(test)]
mod test_support;
