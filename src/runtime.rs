use std::env;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::ptr;
use std::slice;
use std::sync::{Arc, Mutex};

use crate::analyzer::{AnalysisNode, Analyzer, AnalyzerFactory};
use crate::config::MecabHandle;
use crate::discovery::{default_library_candidates, discover_default_library_path};
use crate::error::{MecabError, Result};
use crate::model::DictionaryInfo;
use crate::native::{
    analysis_error, cstr_to_string, initialization_error, DynamicLibrary, LoadedLibrary, MecabApi,
    MecabNodeRaw,
};

/// Handle to a loaded MeCab dynamic library plus resolved function table.
///
/// The library acts as the [`AnalyzerFactory`] for [`crate::MecabTokenizer`].
#[derive(Clone)]
pub struct MecabLibrary {
    inner: Arc<LoadedLibrary>,
}

impl MecabLibrary {
    /// Loads a MeCab dynamic library from an explicit path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let library = DynamicLibrary::open(path)?;
        Self::from_library(library)
    }

    /// Loads MeCab from common platform-specific locations and caches it.
    pub fn load_default() -> Result<Self> {
        static DEFAULT_LIBRARY: Mutex<Option<Arc<LoadedLibrary>>> = Mutex::new(None);

        let mut guard = DEFAULT_LIBRARY.lock().map_err(|_| {
            MecabError::LibraryLoad("failed to lock default library cache".to_string())
        })?;

        if let Some(inner) = guard.as_ref() {
            return Ok(Self {
                inner: inner.clone(),
            });
        }

        let inner = Self::load_default_internal()?.inner;
        *guard = Some(inner.clone());
        Ok(Self { inner })
    }

    fn load_default_internal() -> Result<Self> {
        let mut errors = Vec::new();

        if let Some(path) = discover_default_library_path() {
            match Self::load(&path) {
                Ok(loaded) => return Ok(loaded),
                Err(error) => errors.push(format!("{}: {}", path.display(), error)),
            }
        }

        for candidate in default_library_candidates() {
            match Self::load(candidate) {
                Ok(loaded) => return Ok(loaded),
                Err(error) => errors.push(format!("{candidate}: {error}")),
            }
        }

        Err(MecabError::LibraryLoad(format!(
            "set MECAB_LIBRARY_PATH to the dynamic library path. tried: {}",
            errors.join(" | ")
        )))
    }

    /// Loads from `MECAB_LIBRARY_PATH` if set, otherwise falls back to
    /// [`Self::load_default`].
    pub fn load_from_env_or_default() -> Result<Self> {
        if let Some(path) = env::var_os("MECAB_LIBRARY_PATH") {
            return Self::load(PathBuf::from(path));
        }
        Self::load_default()
    }

    fn from_library(library: DynamicLibrary) -> Result<Self> {
        let api = unsafe { MecabApi::load(&library)? };
        Ok(Self {
            inner: Arc::new(LoadedLibrary {
                _library: library,
                api,
            }),
        })
    }

    /// Returns the version string reported by the loaded library.
    pub fn version(&self) -> String {
        cstr_to_string(unsafe { (self.inner.api.mecab_version)() })
    }

    /// Creates a tagger with a MeCab command-line style argument vector.
    ///
    /// `args[0]` is the program name and is ignored by MeCab.
    pub fn tagger<S: AsRef<str>>(&self, args: &[S]) -> Result<Mecab> {
        let args_c = args
            .iter()
            .map(|arg| CString::new(arg.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut argv: Vec<*mut c_char> = args_c
            .iter()
            .map(|arg| arg.as_ptr() as *mut c_char)
            .collect();
        let argc = i32::try_from(argv.len()).map_err(|_| {
            MecabError::InvalidArgument(format!("too many analyzer arguments: {}", argv.len()))
        })?;

        let handle = unsafe { (self.inner.api.mecab_new)(argc, argv.as_mut_ptr()) };
        if handle.is_null() {
            return Err(initialization_error(
                &self.inner.api,
                "mecab_new returned a null handle",
            ));
        }

        Ok(Mecab {
            inner: self.inner.clone(),
            handle,
            input: Vec::new(),
        })
    }
}

impl AnalyzerFactory for MecabLibrary {
    type Analyzer = Mecab;

    fn create_analyzer(&self, args: &[String]) -> Result<Mecab> {
        self.tagger(args)
    }
}

/// Owned MeCab tagger handle.
///
/// The handle keeps per-call scratch state inside MeCab and is not
/// reentrant: it may move between threads but must not be shared.
pub struct Mecab {
    inner: Arc<LoadedLibrary>,
    handle: MecabHandle,
    input: Vec<u8>,
}

unsafe impl Send for Mecab {}

impl Mecab {
    /// Returns the dictionaries loaded by this tagger.
    pub fn dictionary_info(&self) -> Vec<DictionaryInfo> {
        let Some(dictionary_info) = self.inner.api.mecab_dictionary_info else {
            return Vec::new();
        };

        let mut infos = Vec::new();
        let mut raw = unsafe { dictionary_info(self.handle) };
        while let Some(info) = unsafe { raw.as_ref() } {
            infos.push(DictionaryInfo::from(info));
            raw = info.next;
        }
        infos
    }
}

impl Analyzer for Mecab {
    type Node = MecabNode;

    fn analyze(&mut self, text: &[u8]) -> Result<&MecabNode> {
        // MeCab keeps pointers into the input instead of copying it, so the
        // text lives in a handle-owned buffer until the next call.
        self.input.clear();
        self.input.try_reserve(text.len() + 1)?;
        self.input.extend_from_slice(text);
        self.input.push(0);

        let head = unsafe {
            (self.inner.api.mecab_sparse_tonode2)(
                self.handle,
                self.input.as_ptr().cast::<c_char>(),
                self.input.len(),
            )
        };
        if head.is_null() {
            return Err(analysis_error(
                &self.inner.api,
                self.handle,
                "mecab_sparse_tonode2 returned no nodes",
            ));
        }
        Ok(unsafe { &*head.cast::<MecabNode>() })
    }

    fn dictionary_info(&self) -> Vec<DictionaryInfo> {
        Mecab::dictionary_info(self)
    }
}

impl Drop for Mecab {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        unsafe {
            (self.inner.api.mecab_destroy)(self.handle);
        }
        self.handle = ptr::null_mut();
    }
}

/// Node of a MeCab analysis result, borrowed from the tagger.
#[repr(transparent)]
pub struct MecabNode(MecabNodeRaw);

impl MecabNode {
    /// Character type id assigned by MeCab's `char.def`.
    pub fn char_type(&self) -> u8 {
        self.0.char_type
    }

    /// Node status: 0 normal, 1 unknown, 2 BOS, 3 EOS, 4 EON.
    pub fn stat(&self) -> u8 {
        self.0.stat
    }
}

impl AnalysisNode for MecabNode {
    fn surface(&self) -> &[u8] {
        let length = usize::from(self.0.length);
        if self.0.surface.is_null() || length == 0 {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.0.surface.cast::<u8>(), length) }
    }

    fn length(&self) -> usize {
        usize::from(self.0.length)
    }

    fn rlength(&self) -> usize {
        usize::from(self.0.rlength)
    }

    fn pos_id(&self) -> u16 {
        self.0.posid
    }

    fn feature(&self) -> Option<&str> {
        if self.0.feature.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(self.0.feature) }.to_str().ok()
    }

    fn next(&self) -> Option<&Self> {
        unsafe { self.0.next.cast::<MecabNode>().as_ref() }
    }
}

#[cfg(test)]
mod runtime_tests {
    use super::MecabNode;
    use crate::analyzer::AnalysisNode;
    use crate::native::MecabNodeRaw;
    use std::ffi::CString;
    use std::os::raw::c_char;
    use std::ptr;

    fn raw_node(surface: *const c_char, length: u16, rlength: u16, posid: u16) -> MecabNodeRaw {
        MecabNodeRaw {
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
            enext: ptr::null_mut(),
            bnext: ptr::null_mut(),
            rpath: ptr::null_mut(),
            lpath: ptr::null_mut(),
            surface,
            feature: ptr::null(),
            id: 0,
            length,
            rlength,
            rc_attr: 0,
            lc_attr: 0,
            posid,
            char_type: 0,
            stat: 0,
            isbest: 1,
            alpha: 0.0,
            beta: 0.0,
            prob: 0.0,
            wcost: 0,
            cost: 0,
        }
    }

    #[test]
    fn node_reads_only_its_own_surface_bytes() {
        // MeCab surfaces point into the whole sentence without a terminator.
        let sentence = b"  \xe6\x9d\xb1\xe4\xba\xac\xe9\x83\xbd";
        let mut eos = raw_node(ptr::null(), 0, 0, 0);
        let mut tokyo = raw_node(sentence[2..].as_ptr().cast(), 6, 8, 46);
        tokyo.next = &mut eos;

        let node = unsafe { &*(&tokyo as *const MecabNodeRaw).cast::<MecabNode>() };
        assert_eq!(node.surface(), "東京".as_bytes());
        assert_eq!(node.length(), 6);
        assert_eq!(node.rlength(), 8);
        assert_eq!(node.pos_id(), 46);
        assert!(node.feature().is_none());

        let last = node.next().expect("EOS follows");
        assert!(last.is_marker());
        assert!(last.surface().is_empty());
        assert!(last.next().is_none());
    }

    #[test]
    fn node_exposes_feature_string() {
        let feature = CString::new("名詞,固有名詞,地域,一般,*,*,東京,トウキョウ,トーキョー")
            .expect("no interior NUL");
        let mut raw = raw_node(ptr::null(), 0, 0, 0);
        raw.feature = feature.as_ptr();

        let node = unsafe { &*(&raw as *const MecabNodeRaw).cast::<MecabNode>() };
        assert!(node.feature().expect("feature").starts_with("名詞,固有名詞"));
    }
}
