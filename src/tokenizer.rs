use std::ops::ControlFlow;

use log::debug;
use regex::Regex;

use crate::analyzer::{Analyzer, AnalyzerFactory};
use crate::constants::{ARG_STOP_POS, ARG_VERBOSE, ARG_VERY_VERBOSE};
use crate::error::{MecabError, Result};
use crate::paths::analyzer_paths;
use crate::stream::reconstruct;
use crate::types::{AnalyzerPaths, Token, TokenizerOptions, Verbosity};

/// Tokenizer arguments split into recognized flags and analyzer pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerArgs {
    /// Flags recognized by the tokenizer itself.
    pub options: TokenizerOptions,
    /// Remaining arguments, in their original order, for the analyzer.
    pub forwarded: Vec<String>,
}

impl TokenizerArgs {
    /// Parses construction arguments.
    ///
    /// `stop789` enables the POS filter, `v` and `vv` select verbosity 1
    /// and 2 (`vv` wins regardless of order). Matching is case-sensitive;
    /// every other argument is forwarded verbatim.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_ref() {
                ARG_STOP_POS => parsed.options.stop_pos_filter = true,
                ARG_VERY_VERBOSE => parsed.options.verbosity = Verbosity::Trace,
                ARG_VERBOSE => {
                    parsed.options.verbosity = parsed.options.verbosity.max(Verbosity::Verbose)
                }
                other => parsed.forwarded.push(other.to_string()),
            }
        }
        parsed
    }
}

const DEFINITION_WORD: &str =
    r#"^\s*(?:"((?:[^"]|"")*)"|'((?:[^']|'')*)'|`((?:[^`]|``)*)`|\[([^\]]*)\]|([^\s"'`\[]+))"#;

/// Splits an FTS5 tokenizer definition such as
/// `mecab stop789 "-u" 'user.dic'` into words.
///
/// Barewords and `"..."`, `'...'`, `` `...` `` and `[...]` quoting are
/// accepted; a doubled quote inside a quoted word stands for one quote.
/// The first word is the tokenizer name.
pub fn parse_tokenizer_definition(definition: &str) -> Result<Vec<String>> {
    let regex = Regex::new(DEFINITION_WORD)
        .map_err(|error| MecabError::InvalidArgument(error.to_string()))?;
    let mut words = Vec::new();
    let mut rest = definition;

    while !rest.trim_start().is_empty() {
        let captures = regex.captures(rest).ok_or_else(|| {
            MecabError::InvalidArgument(format!(
                "malformed tokenizer definition near `{}`",
                rest.trim_start()
            ))
        })?;
        let word = if let Some(quoted) = captures.get(1) {
            quoted.as_str().replace("\"\"", "\"")
        } else if let Some(quoted) = captures.get(2) {
            quoted.as_str().replace("''", "'")
        } else if let Some(quoted) = captures.get(3) {
            quoted.as_str().replace("``", "`")
        } else if let Some(bracketed) = captures.get(4) {
            bracketed.as_str().to_string()
        } else if let Some(bare) = captures.get(5) {
            bare.as_str().to_string()
        } else {
            break;
        };
        words.push(word);
        rest = &rest[captures.get(0).map_or(rest.len(), |whole| whole.end())..];
    }

    Ok(words)
}

/// MeCab-backed FTS5 tokenizer instance.
///
/// Created once per table column with [`Self::create`], used for any
/// number of sequential [`Self::tokenize`] calls, and released by
/// [`Self::destroy`] or by dropping it. A failed `create` never yields an
/// instance, so the analyzer is released exactly when one was created.
pub struct MecabTokenizer<A: Analyzer> {
    analyzer: A,
    options: TokenizerOptions,
}

impl<A: Analyzer> MecabTokenizer<A> {
    /// Creates an instance from tokenizer arguments and explicit paths.
    ///
    /// The analyzer receives the program name placeholder, `-d` and `-r`
    /// options for whichever `paths` are set, then every unrecognized
    /// argument in order.
    ///
    /// # Examples
    /// ```no_run
    /// use mecab_fts5::{AnalyzerPaths, MecabLibrary, MecabTokenizer};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let library = MecabLibrary::load_from_env_or_default()?;
    /// let paths = AnalyzerPaths::new().with_dictionary_path("/usr/lib/mecab/dic/ipadic");
    /// let mut tokenizer = MecabTokenizer::create(&library, &paths, &["stop789"])?;
    /// tokenizer.tokenize(0, "すもももももももものうち".as_bytes(), |token| {
    ///     println!("{:?} {}..{}", token.as_str(), token.start, token.end);
    ///     std::ops::ControlFlow::Continue(())
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn create<F, S>(factory: &F, paths: &AnalyzerPaths, args: &[S]) -> Result<Self>
    where
        F: AnalyzerFactory<Analyzer = A>,
        S: AsRef<str>,
    {
        let TokenizerArgs { options, forwarded } = TokenizerArgs::parse(args);
        let analyzer_args = paths.analyzer_args(forwarded.as_slice());
        let verbose = options.verbosity >= Verbosity::Verbose;

        if verbose {
            debug!(
                "create: verbosity = {}, stop_pos_filter = {}",
                options.verbosity.level(),
                options.stop_pos_filter
            );
            debug!("analyzer args: {analyzer_args:?}");
        }

        let analyzer = factory
            .create_analyzer(&analyzer_args)
            .map_err(|error| match error {
                MecabError::Initialization(message) => MecabError::Initialization(message),
                other => MecabError::Initialization(other.to_string()),
            })?;

        if verbose {
            for info in analyzer.dictionary_info() {
                debug!(
                    "dictionary: filename = {}, charset = {}, size = {}, type = {}, lsize = {}, rsize = {}, version = {}",
                    info.filename,
                    info.charset,
                    info.size,
                    info.dictionary_type,
                    info.lsize,
                    info.rsize,
                    info.version
                );
            }
        }

        Ok(Self { analyzer, options })
    }

    /// Same as [`Self::create`] with a snapshot of the process-wide paths
    /// set through [`crate::set_dictionary_path`] and [`crate::set_rc_path`].
    pub fn create_with_global_paths<F, S>(factory: &F, args: &[S]) -> Result<Self>
    where
        F: AnalyzerFactory<Analyzer = A>,
        S: AsRef<str>,
    {
        Self::create(factory, &analyzer_paths(), args)
    }

    /// Options fixed at construction.
    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    /// Underlying analyzer handle.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Tokenizes `text`, invoking `emit` once per token in document order.
    ///
    /// `flags` carries the FTS5 `FTS5_TOKENIZE_*` mask; it does not change
    /// how text is split. Returns `Break(code)` unchanged when `emit`
    /// stops early. See [`crate::reconstruct`] for the offset rules.
    pub fn tokenize<F>(&mut self, flags: i32, text: &[u8], emit: F) -> Result<ControlFlow<i32>>
    where
        F: FnMut(Token<'_>) -> ControlFlow<i32>,
    {
        if self.options.verbosity >= Verbosity::Verbose {
            debug!("tokenize: flags = {flags:#x}, bytes = {}", text.len());
        }
        reconstruct(&mut self.analyzer, text, self.options, emit)
    }

    /// Releases the analyzer handle and the instance.
    pub fn destroy(self) {
        if self.options.verbosity >= Verbosity::Verbose {
            debug!("destroy");
        }
    }
}
