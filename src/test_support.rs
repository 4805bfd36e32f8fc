use std::env;
use std::ffi::OsString;
use std::fs;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::analyzer::{AnalysisNode, Analyzer, AnalyzerFactory};
use crate::error::{MecabError, Result};
use crate::stream::reconstruct;
use crate::types::TokenizerOptions;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn set_env_var(key: &str, value: impl AsRef<std::ffi::OsStr>) {
    #[allow(unused_unsafe)]
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env_var(key: &str) {
    #[allow(unused_unsafe)]
    unsafe {
        env::remove_var(key);
    }
}

/// Runs a closure while holding a global environment lock and applying overrides.
pub(crate) fn with_env_vars<T>(overrides: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    let _guard = env_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let backups: Vec<(&str, Option<OsString>)> = overrides
        .iter()
        .map(|(key, _)| (*key, env::var_os(key)))
        .collect();

    for (key, value) in overrides {
        match value {
            Some(value) => set_env_var(key, value),
            None => remove_env_var(key),
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in backups.into_iter().rev() {
        match value {
            Some(value) => set_env_var(key, value),
            None => remove_env_var(key),
        }
    }

    match result {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

pub(crate) fn make_temp_dir(name: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic")
        .as_nanos();
    let path = env::temp_dir().join(format!("mecab-fts5-{name}-{suffix}"));
    fs::create_dir_all(&path).expect("failed to create temp dir");
    path
}

/// Blueprint of one scripted node.
#[derive(Debug, Clone)]
pub(crate) struct NodeShape {
    surface: Vec<u8>,
    rlength: usize,
    pos_id: u16,
}

impl NodeShape {
    pub(crate) fn marker(rlength: usize) -> Self {
        Self {
            surface: Vec::new(),
            rlength,
            pos_id: 0,
        }
    }

    pub(crate) fn token(surface: &str, rlength: usize, pos_id: u16) -> Self {
        Self {
            surface: surface.as_bytes().to_vec(),
            rlength,
            pos_id,
        }
    }

    /// MeCab-like segmentation on ASCII spaces, framed by BOS/EOS.
    ///
    /// Words made only of ASCII punctuation get the symbol POS id 7.
    pub(crate) fn whitespace_sentence(text: &[u8]) -> Vec<Self> {
        let mut nodes = vec![Self::marker(0)];
        let mut skipped = 0;
        for word in text.split(|byte| *byte == b' ') {
            if word.is_empty() {
                skipped += 1;
                continue;
            }
            let pos_id = if word.iter().all(u8::is_ascii_punctuation) {
                7
            } else {
                38
            };
            nodes.push(Self {
                surface: word.to_vec(),
                rlength: skipped + word.len(),
                pos_id,
            });
            skipped = 1;
        }
        nodes.push(Self::marker(0));
        nodes
    }
}

pub(crate) struct ScriptedNode {
    surface: Vec<u8>,
    rlength: usize,
    pos_id: u16,
    next: Option<Box<ScriptedNode>>,
}

impl ScriptedNode {
    fn chain(shapes: &[NodeShape]) -> Option<Self> {
        let mut next: Option<Box<ScriptedNode>> = None;
        for shape in shapes.iter().rev() {
            next = Some(Box::new(ScriptedNode {
                surface: shape.surface.clone(),
                rlength: shape.rlength,
                pos_id: shape.pos_id,
                next,
            }));
        }
        next.map(|head| *head)
    }
}

impl AnalysisNode for ScriptedNode {
    fn surface(&self) -> &[u8] {
        &self.surface
    }

    fn rlength(&self) -> usize {
        self.rlength
    }

    fn pos_id(&self) -> u16 {
        self.pos_id
    }

    fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }
}

enum Script {
    Fixed(Vec<NodeShape>),
    Whitespace,
    Fail,
}

/// Fake analyzer producing synthetic node chains.
pub(crate) struct ScriptedAnalyzer {
    script: Script,
    head: Option<ScriptedNode>,
    calls: usize,
}

impl ScriptedAnalyzer {
    pub(crate) fn fixed(shapes: Vec<NodeShape>) -> Self {
        Self::with_script(Script::Fixed(shapes))
    }

    pub(crate) fn whitespace() -> Self {
        Self::with_script(Script::Whitespace)
    }

    pub(crate) fn failing() -> Self {
        Self::with_script(Script::Fail)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            head: None,
            calls: 0,
        }
    }

    pub(crate) fn set_whitespace(&mut self) {
        self.script = Script::Whitespace;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls
    }
}

impl Analyzer for ScriptedAnalyzer {
    type Node = ScriptedNode;

    fn analyze(&mut self, text: &[u8]) -> Result<&ScriptedNode> {
        self.calls += 1;
        let shapes = match &self.script {
            Script::Fixed(shapes) => shapes.clone(),
            Script::Whitespace => NodeShape::whitespace_sentence(text),
            Script::Fail => {
                return Err(MecabError::Analysis("scripted failure".to_string()));
            }
        };
        self.head = ScriptedNode::chain(&shapes);
        self.head
            .as_ref()
            .ok_or_else(|| MecabError::Analysis("empty script".to_string()))
    }
}

/// Factory recording every argument vector it is asked to build from.
#[derive(Default)]
pub(crate) struct RecordingFactory {
    pub(crate) fail: bool,
    pub(crate) calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingFactory {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn recorded(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl AnalyzerFactory for RecordingFactory {
    type Analyzer = ScriptedAnalyzer;

    fn create_analyzer(&self, args: &[String]) -> Result<ScriptedAnalyzer> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(args.to_vec());
        if self.fail {
            return Err(MecabError::Initialization("scripted failure".to_string()));
        }
        Ok(ScriptedAnalyzer::whitespace())
    }
}

/// Runs the reconstructor and collects `(text, start, end)` for each token.
pub(crate) fn collect_tokens<A: Analyzer>(
    analyzer: &mut A,
    text: &[u8],
    options: TokenizerOptions,
) -> (ControlFlow<i32>, Vec<(String, usize, usize)>) {
    let mut tokens = Vec::new();
    let outcome = reconstruct(analyzer, text, options, |token| {
        tokens.push((
            String::from_utf8_lossy(token.text).to_string(),
            token.start,
            token.end,
        ));
        ControlFlow::Continue(())
    })
    .expect("tokenize should succeed");
    (outcome, tokens)
}
