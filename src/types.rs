use crate::constants::{MECAB_DICTIONARY_OPTION, MECAB_PROGRAM_NAME, MECAB_RC_OPTION};

/// Diagnostic verbosity of a tokenizer instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No diagnostics.
    #[default]
    Quiet,
    /// Lifecycle events and per-call summaries (`v`).
    Verbose,
    /// Additionally every node and every emitted token (`vv`).
    Trace,
}

impl Verbosity {
    /// Numeric level: 0, 1 or 2.
    pub fn level(self) -> u8 {
        match self {
            Verbosity::Quiet => 0,
            Verbosity::Verbose => 1,
            Verbosity::Trace => 2,
        }
    }
}

/// Behavioral flags fixed at tokenizer construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Diagnostic verbosity.
    pub verbosity: Verbosity,
    /// Drop tokens whose part-of-speech id lies in [`crate::STOP_POS_IDS`].
    pub stop_pos_filter: bool,
}

impl TokenizerOptions {
    /// Sets verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Enables or disables the part-of-speech filter.
    pub fn with_stop_pos_filter(mut self, enabled: bool) -> Self {
        self.stop_pos_filter = enabled;
        self
    }
}

/// Dictionary directory and resource file handed to the analyzer.
///
/// `None` means the option is omitted and MeCab falls back to its own
/// `mecabrc` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerPaths {
    /// System dictionary directory, always ending in `/` once normalized.
    pub dictionary_path: Option<String>,
    /// Resource (`mecabrc`) file path, stored verbatim.
    pub rc_path: Option<String>,
}

impl AnalyzerPaths {
    /// Paths with neither option set.
    pub const fn new() -> Self {
        Self {
            dictionary_path: None,
            rc_path: None,
        }
    }

    /// Sets the dictionary directory, appending a trailing `/` if missing.
    pub fn with_dictionary_path(mut self, path: impl AsRef<str>) -> Self {
        self.dictionary_path = Some(normalize_dictionary_path(path.as_ref()));
        self
    }

    /// Sets the resource file path.
    pub fn with_rc_path(mut self, path: impl Into<String>) -> Self {
        self.rc_path = Some(path.into());
        self
    }

    /// Builds the `mecab_new` argument vector: program name, `-d dir`,
    /// `-r file`, then `forwarded` in order.
    pub fn analyzer_args<S: AsRef<str>>(&self, forwarded: &[S]) -> Vec<String> {
        let mut args = Vec::with_capacity(1 + 2 + 2 + forwarded.len());
        args.push(MECAB_PROGRAM_NAME.to_string());
        if let Some(dictionary_path) = &self.dictionary_path {
            args.push(MECAB_DICTIONARY_OPTION.to_string());
            args.push(dictionary_path.clone());
        }
        if let Some(rc_path) = &self.rc_path {
            args.push(MECAB_RC_OPTION.to_string());
            args.push(rc_path.clone());
        }
        args.extend(forwarded.iter().map(|arg| arg.as_ref().to_string()));
        args
    }
}

pub(crate) fn normalize_dictionary_path(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Token handed to the consumer callback.
///
/// `start..end` is a byte range of the input text and `text` equals those
/// bytes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// FTS5 token flags; always 0, no colocated tokens are produced.
    pub flags: i32,
    /// Token bytes.
    pub text: &'a [u8],
    /// Byte offset of the first token byte.
    pub start: usize,
    /// Byte offset one past the last token byte.
    pub end: usize,
}

impl Token<'_> {
    /// Token text as UTF-8, if valid.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.text).ok()
    }
}
