//! Narrow seam between the tokenizer and the morphological analyzer.
//!
//! [`crate::Mecab`] is the production implementation. Anything that can hand
//! back a linked node sequence for a byte string can stand in for it, which
//! is how the token stream logic is exercised without a dictionary.

use crate::constants::STOP_POS_IDS;
use crate::error::Result;
use crate::model::DictionaryInfo;

/// One element of the analyzer's linked result sequence.
///
/// A node either carries a recognized token (`length() > 0`) or is a
/// structural marker such as beginning/end of sentence (`length() == 0`).
pub trait AnalysisNode {
    /// Surface bytes of the token, exactly [`Self::length`] bytes long.
    fn surface(&self) -> &[u8];

    /// Byte length of the surface form.
    fn length(&self) -> usize {
        self.surface().len()
    }

    /// Byte span consumed by the node, including skipped bytes before the
    /// surface.
    fn rlength(&self) -> usize;

    /// Part-of-speech id assigned by the dictionary.
    fn pos_id(&self) -> u16;

    /// Raw feature string, when the analyzer exposes one.
    fn feature(&self) -> Option<&str> {
        None
    }

    /// Following node, `None` for the terminal node.
    fn next(&self) -> Option<&Self>;

    /// Returns whether this node is a zero-length structural marker.
    fn is_marker(&self) -> bool {
        self.length() == 0
    }

    /// Returns whether the part-of-speech filter drops this node.
    fn is_stop_pos(&self) -> bool {
        STOP_POS_IDS.contains(&self.pos_id())
    }
}

/// Analyzer handle that turns raw text into a node sequence.
pub trait Analyzer {
    /// Node type of the returned sequence.
    type Node: AnalysisNode;

    /// Analyzes `text` and returns the head of the node sequence.
    ///
    /// The nodes stay owned by the analyzer and are only valid until the
    /// next call, which the `&mut self` borrow enforces. Fails with
    /// [`crate::MecabError::Analysis`] when the analyzer produces no result;
    /// empty input is not a failure.
    fn analyze(&mut self, text: &[u8]) -> Result<&Self::Node>;

    /// Dictionaries backing this analyzer, reported in verbose mode.
    fn dictionary_info(&self) -> Vec<DictionaryInfo> {
        Vec::new()
    }
}

/// Creates analyzer handles from a MeCab-style argument vector.
pub trait AnalyzerFactory {
    /// Analyzer produced by this factory.
    type Analyzer: Analyzer;

    /// Creates a handle; `args[0]` is the program name placeholder.
    ///
    /// Fails with [`crate::MecabError::Initialization`] when the handle
    /// cannot be created.
    fn create_analyzer(&self, args: &[String]) -> Result<Self::Analyzer>;
}
