//! Process-wide analyzer paths.
//!
//! These mirror the `mecab_dict()` / `mecab_rc()` SQL functions: they are
//! read once by [`crate::MecabTokenizer::create_with_global_paths`], so a
//! later change never affects an instance that already exists. Callers
//! must finish changing them before constructing instances concurrently.

use std::sync::{PoisonError, RwLock};

use crate::types::{normalize_dictionary_path, AnalyzerPaths};

static GLOBAL_PATHS: RwLock<AnalyzerPaths> = RwLock::new(AnalyzerPaths::new());

/// Sets the process-wide dictionary directory and returns the stored,
/// `/`-terminated value.
pub fn set_dictionary_path(path: &str) -> String {
    let normalized = normalize_dictionary_path(path);
    let mut paths = GLOBAL_PATHS.write().unwrap_or_else(PoisonError::into_inner);
    paths.dictionary_path = Some(normalized.clone());
    normalized
}

/// Sets the process-wide resource file path and returns it.
pub fn set_rc_path(path: &str) -> String {
    let mut paths = GLOBAL_PATHS.write().unwrap_or_else(PoisonError::into_inner);
    paths.rc_path = Some(path.to_string());
    path.to_string()
}

/// Clears both process-wide paths.
pub fn reset_analyzer_paths() {
    let mut paths = GLOBAL_PATHS.write().unwrap_or_else(PoisonError::into_inner);
    *paths = AnalyzerPaths::new();
}

/// Snapshot of the process-wide paths.
pub fn analyzer_paths() -> AnalyzerPaths {
    GLOBAL_PATHS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
pub(crate) fn global_paths_lock() -> &'static std::sync::Mutex<()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    &LOCK
}
