//! Constants mirrored from the FTS5 tokenizer API and the MeCab command line.

use std::ops::RangeInclusive;

/// Tokenize flag: the text is a query.
pub const FTS5_TOKENIZE_QUERY: i32 = 0x0001;
/// Tokenize flag: the query term is a prefix.
pub const FTS5_TOKENIZE_PREFIX: i32 = 0x0002;
/// Tokenize flag: the text is a document being indexed.
pub const FTS5_TOKENIZE_DOCUMENT: i32 = 0x0004;
/// Tokenize flag: the text comes from an auxiliary function.
pub const FTS5_TOKENIZE_AUX: i32 = 0x0008;
/// Token flag: the token is a synonym colocated with the previous one.
pub const FTS5_TOKEN_COLOCATED: i32 = 0x0001;

/// Tokenizer argument enabling the part-of-speech filter.
pub const ARG_STOP_POS: &str = "stop789";
/// Tokenizer argument selecting verbosity level 1.
pub const ARG_VERBOSE: &str = "v";
/// Tokenizer argument selecting verbosity level 2.
pub const ARG_VERY_VERBOSE: &str = "vv";

/// Part-of-speech ids dropped when the filter is enabled.
///
/// In the IPA dictionary these are the symbol and whitespace classes.
pub const STOP_POS_IDS: RangeInclusive<u16> = 7..=9;

/// Initial capacity of the per-call token buffer, in bytes.
pub const DEFAULT_TOKEN_BUFFER_CAPACITY: usize = 256;

/// `argv[0]` handed to `mecab_new`.
pub const MECAB_PROGRAM_NAME: &str = "mecab_tokenizer_instance";
/// MeCab option selecting the system dictionary directory.
pub const MECAB_DICTIONARY_OPTION: &str = "-d";
/// MeCab option selecting the resource (`mecabrc`) file.
pub const MECAB_RC_OPTION: &str = "-r";
