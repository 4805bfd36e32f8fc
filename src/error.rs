use std::collections::TryReserveError;
use std::ffi::NulError;

use thiserror::Error;

/// Error type returned by mecab-fts5 public APIs.
///
/// A consumer asking the tokenizer to stop is not an error; that signal
/// travels through [`std::ops::ControlFlow::Break`] instead.
#[derive(Debug, Error)]
pub enum MecabError {
    /// Dynamic library could not be loaded.
    #[error("failed to load library: {0}")]
    LibraryLoad(String),
    /// Required symbol could not be resolved from the library.
    #[error("failed to load symbol: {0}")]
    SymbolLoad(String),
    /// Rust string contained an interior `NUL` byte for C interop.
    #[error("string contains NUL byte: {0}")]
    NulByte(#[from] NulError),
    /// User-provided arguments were invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The analyzer handle could not be created.
    #[error("analyzer initialization failed: {0}")]
    Initialization(String),
    /// The analyzer could not process the given text.
    #[error("analysis failed: {0}")]
    Analysis(String),
    /// The token buffer could not be allocated or grown.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MecabError>;
