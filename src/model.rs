use crate::native::{cstr_to_string, MecabDictionaryInfoRaw};

/// Metadata of one dictionary loaded by a MeCab handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryInfo {
    /// Path of the compiled dictionary file.
    pub filename: String,
    /// Character set the dictionary was compiled with.
    pub charset: String,
    /// Number of entries.
    pub size: u32,
    /// Dictionary kind: 0 system, 1 user, 2 unknown-word.
    pub dictionary_type: i32,
    /// Left context size.
    pub lsize: u32,
    /// Right context size.
    pub rsize: u32,
    /// Dictionary format version.
    pub version: u16,
}

impl From<&MecabDictionaryInfoRaw> for DictionaryInfo {
    fn from(value: &MecabDictionaryInfoRaw) -> Self {
        Self {
            filename: cstr_to_string(value.filename),
            charset: cstr_to_string(value.charset),
            size: value.size,
            dictionary_type: value.dictionary_type,
            lsize: value.lsize,
            rsize: value.rsize,
            version: value.version,
        }
    }
}
