//! Token stream reconstruction.
//!
//! MeCab reports every node with a `length` (surface bytes) and an
//! `rlength` (surface plus skipped bytes before it), but never an absolute
//! position. Offsets into the original text are rebuilt by accumulating
//! those spans along the node chain:
//!
//! ```text
//! text:    "  東京 都"
//! nodes:   BOS(len 0, rlen 0) 東京(len 6, rlen 8) 都(len 3, rlen 4) EOS
//! emitted: 東京 [2, 8)   都 [9, 12)
//! ```

use std::ops::ControlFlow;

use log::{debug, trace, warn};

use crate::analyzer::{AnalysisNode, Analyzer};
use crate::buffer::TokenBuffer;
use crate::error::Result;
use crate::types::{TokenizerOptions, Token, Verbosity};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct WalkStats {
    nodes: usize,
    tokens: usize,
    filtered: usize,
}

impl WalkStats {
    fn report(&self, verbosity: Verbosity, end: &str) {
        if verbosity >= Verbosity::Verbose {
            debug!(
                "tokenize finished ({end}): nodes = {}, tokens = {}, filtered = {}",
                self.nodes, self.tokens, self.filtered
            );
        }
    }
}

/// Analyzes `text` and emits every non-empty surface form with its exact
/// byte range, in document order.
///
/// Zero-length marker nodes are never emitted but their `rlength` still
/// advances the offset. With [`TokenizerOptions::stop_pos_filter`] set,
/// tokens in [`crate::STOP_POS_IDS`] are skipped without disturbing later
/// offsets. The walk ends at the terminal node or once the offset reaches
/// the end of `text`.
///
/// Returns `Continue(())` when the walk completes and `Break(code)` as soon
/// as `emit` asks to stop; no node is visited after that. Analyzer and
/// allocation failures abort the call; the analyzer stays usable.
pub fn reconstruct<A, F>(
    analyzer: &mut A,
    text: &[u8],
    options: TokenizerOptions,
    mut emit: F,
) -> Result<ControlFlow<i32>>
where
    A: Analyzer + ?Sized,
    F: FnMut(Token<'_>) -> ControlFlow<i32>,
{
    let verbosity = options.verbosity;
    let head = analyzer.analyze(text)?;
    let mut buffer = TokenBuffer::with_default_capacity()?;
    let mut stats = WalkStats::default();
    let mut offset = 0usize;
    let mut node = Some(head);

    while let Some(mut current) = node {
        // Runs of markers (BOS and friends) fold into the offset.
        while current.is_marker() {
            let Some(next) = current.next() else {
                break;
            };
            stats.nodes += 1;
            offset += current.rlength();
            current = next;
        }
        stats.nodes += 1;

        if verbosity >= Verbosity::Trace {
            trace!(
                "node: feature = {}, surface = {:?}, length = {}, rlength = {}, posid = {}",
                current.feature().unwrap_or("-"),
                String::from_utf8_lossy(current.surface()),
                current.length(),
                current.rlength(),
                current.pos_id()
            );
        }

        let length = current.length();
        offset += leading_gap(current);
        let surface = buffer.fill(current.surface())?;

        if length == 0 {
            // terminal marker, nothing to emit
        } else if options.stop_pos_filter && current.is_stop_pos() {
            stats.filtered += 1;
            if verbosity >= Verbosity::Verbose {
                debug!(
                    "filtered posid {} at [{}, {})",
                    current.pos_id(),
                    offset,
                    offset + length
                );
            }
        } else {
            let token = Token {
                flags: 0,
                text: surface,
                start: offset,
                end: offset + length,
            };
            if verbosity >= Verbosity::Trace {
                trace!(
                    "emit: token = {:?}, start = {}, end = {}",
                    String::from_utf8_lossy(token.text),
                    token.start,
                    token.end
                );
            }
            if let ControlFlow::Break(code) = emit(token) {
                if verbosity >= Verbosity::Verbose {
                    debug!("consumer stopped tokenization with code {code}");
                }
                stats.report(verbosity, "stopped");
                return Ok(ControlFlow::Break(code));
            }
            stats.tokens += 1;
        }

        offset += length;
        node = current.next();
        if offset >= text.len() {
            break;
        }
    }

    stats.report(verbosity, "complete");
    Ok(ControlFlow::Continue(()))
}

/// Bytes skipped between the previous node and this node's surface.
///
/// A node reporting `rlength < length` would overlap its predecessor; the
/// gap is clamped to zero and reported.
fn leading_gap<N: AnalysisNode + ?Sized>(node: &N) -> usize {
    match node.rlength().checked_sub(node.length()) {
        Some(gap) => gap,
        None => {
            warn!(
                "analyzer node has rlength {} < length {}; treating the gap as 0",
                node.rlength(),
                node.length()
            );
            0
        }
    }
}
