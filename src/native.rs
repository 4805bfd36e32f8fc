use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_float, c_int, c_long, c_short, c_uint, c_ushort, c_void};
use std::path::Path;
use std::ptr;

use crate::config::MecabHandle;
use crate::error::{MecabError, Result};

type FnMecabVersion = unsafe extern "C" fn() -> *const c_char;
type FnMecabStrerror = unsafe extern "C" fn(MecabHandle) -> *const c_char;
type FnMecabNew = unsafe extern "C" fn(c_int, *mut *mut c_char) -> MecabHandle;
type FnMecabDestroy = unsafe extern "C" fn(MecabHandle);
type FnMecabSparseToNode2 =
    unsafe extern "C" fn(MecabHandle, *const c_char, usize) -> *const MecabNodeRaw;
type FnMecabDictionaryInfo =
    unsafe extern "C" fn(MecabHandle) -> *const MecabDictionaryInfoRaw;

/// Opaque `mecab_path_t`; only ever seen behind a pointer.
#[repr(C)]
pub(crate) struct MecabPathRaw {
    _private: [u8; 0],
}

/// Layout of `mecab_node_t` from `mecab.h`.
#[allow(dead_code)]
#[repr(C)]
pub(crate) struct MecabNodeRaw {
    pub(crate) prev: *mut MecabNodeRaw,
    pub(crate) next: *mut MecabNodeRaw,
    pub(crate) enext: *mut MecabNodeRaw,
    pub(crate) bnext: *mut MecabNodeRaw,
    pub(crate) rpath: *mut MecabPathRaw,
    pub(crate) lpath: *mut MecabPathRaw,
    pub(crate) surface: *const c_char,
    pub(crate) feature: *const c_char,
    pub(crate) id: c_uint,
    pub(crate) length: c_ushort,
    pub(crate) rlength: c_ushort,
    pub(crate) rc_attr: c_ushort,
    pub(crate) lc_attr: c_ushort,
    pub(crate) posid: c_ushort,
    pub(crate) char_type: u8,
    pub(crate) stat: u8,
    pub(crate) isbest: u8,
    pub(crate) alpha: c_float,
    pub(crate) beta: c_float,
    pub(crate) prob: c_float,
    pub(crate) wcost: c_short,
    pub(crate) cost: c_long,
}

/// Layout of `mecab_dictionary_info_t` from `mecab.h`.
#[repr(C)]
pub(crate) struct MecabDictionaryInfoRaw {
    pub(crate) filename: *const c_char,
    pub(crate) charset: *const c_char,
    pub(crate) size: c_uint,
    pub(crate) dictionary_type: c_int,
    pub(crate) lsize: c_uint,
    pub(crate) rsize: c_uint,
    pub(crate) version: c_ushort,
    pub(crate) next: *const MecabDictionaryInfoRaw,
}

#[derive(Clone, Copy)]
pub(crate) struct MecabApi {
    pub(crate) mecab_version: FnMecabVersion,
    pub(crate) mecab_strerror: FnMecabStrerror,
    pub(crate) mecab_new: FnMecabNew,
    pub(crate) mecab_destroy: FnMecabDestroy,
    pub(crate) mecab_sparse_tonode2: FnMecabSparseToNode2,
    pub(crate) mecab_dictionary_info: Option<FnMecabDictionaryInfo>,
}

impl MecabApi {
    pub(crate) unsafe fn load(library: &DynamicLibrary) -> Result<Self> {
        Ok(Self {
            mecab_version: library.load_symbol("mecab_version")?,
            mecab_strerror: library.load_symbol("mecab_strerror")?,
            mecab_new: library.load_symbol("mecab_new")?,
            mecab_destroy: library.load_symbol("mecab_destroy")?,
            mecab_sparse_tonode2: library.load_symbol("mecab_sparse_tonode2")?,
            mecab_dictionary_info: library.load_symbol_optional("mecab_dictionary_info")?,
        })
    }
}

pub(crate) struct LoadedLibrary {
    pub(crate) _library: DynamicLibrary,
    pub(crate) api: MecabApi,
}

#[derive(Debug)]
pub(crate) struct DynamicLibrary {
    handle: *mut c_void,
}

// The loader handle is only passed to dlsym/dlclose, both of which are
// thread-safe, and it is closed exactly once from Drop.
unsafe impl Send for DynamicLibrary {}
unsafe impl Sync for DynamicLibrary {}

impl DynamicLibrary {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_string = path.as_ref().to_string_lossy().to_string();
        let path_c = CString::new(path_string.clone())?;
        let handle = unsafe { platform_open(path_c.as_ptr()) };
        if handle.is_null() {
            return Err(MecabError::LibraryLoad(format!(
                "{} ({})",
                path_string,
                platform_last_error()
            )));
        }
        Ok(Self { handle })
    }

    pub(crate) unsafe fn load_symbol<T: Copy>(&self, symbol_name: &str) -> Result<T> {
        match self.load_symbol_optional(symbol_name)? {
            Some(symbol) => Ok(symbol),
            None => Err(MecabError::SymbolLoad(format!(
                "{} ({})",
                symbol_name,
                platform_last_error()
            ))),
        }
    }

    pub(crate) unsafe fn load_symbol_optional<T: Copy>(
        &self,
        symbol_name: &str,
    ) -> Result<Option<T>> {
        let symbol_c = CString::new(symbol_name)?;
        let symbol_ptr = platform_symbol(self.handle, symbol_c.as_ptr());
        if symbol_ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(std::mem::transmute_copy::<*mut c_void, T>(
            &symbol_ptr,
        )))
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        unsafe {
            platform_close(self.handle);
        }
        self.handle = ptr::null_mut();
    }
}

/// Reads `mecab_strerror` for `handle`; a null handle reads the global
/// error left behind by a failed `mecab_new`.
pub(crate) fn read_mecab_error(api: &MecabApi, handle: MecabHandle) -> Option<String> {
    let message_ptr = unsafe { (api.mecab_strerror)(handle) };
    let message = cstr_to_string(message_ptr).trim().to_string();
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

pub(crate) fn initialization_error(api: &MecabApi, fallback: &str) -> MecabError {
    let message = read_mecab_error(api, ptr::null_mut()).unwrap_or_else(|| fallback.to_string());
    MecabError::Initialization(message)
}

pub(crate) fn analysis_error(api: &MecabApi, handle: MecabHandle, fallback: &str) -> MecabError {
    let message = read_mecab_error(api, handle).unwrap_or_else(|| fallback.to_string());
    MecabError::Analysis(message)
}

pub(crate) fn cstr_to_string(pointer: *const c_char) -> String {
    if pointer.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(pointer) }
        .to_string_lossy()
        .to_string()
}

#[cfg(target_os = "windows")]
#[link(name = "kernel32")]
extern "system" {
    fn LoadLibraryA(lp_lib_file_name: *const c_char) -> *mut c_void;
    fn GetProcAddress(h_module: *mut c_void, lp_proc_name: *const c_char) -> *mut c_void;
    fn FreeLibrary(h_lib_module: *mut c_void) -> i32;
    fn GetLastError() -> u32;
}

#[cfg(target_os = "windows")]
unsafe fn platform_open(path: *const c_char) -> *mut c_void {
    LoadLibraryA(path)
}

#[cfg(target_os = "windows")]
unsafe fn platform_symbol(handle: *mut c_void, symbol: *const c_char) -> *mut c_void {
    GetProcAddress(handle, symbol)
}

#[cfg(target_os = "windows")]
unsafe fn platform_close(handle: *mut c_void) {
    let _ = FreeLibrary(handle);
}

#[cfg(target_os = "windows")]
fn platform_last_error() -> String {
    format!("GetLastError={}", unsafe { GetLastError() })
}

#[cfg(target_os = "linux")]
#[link(name = "dl")]
extern "C" {
    fn dlopen(filename: *const c_char, flags: c_int) -> *mut c_void;
    fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
    fn dlclose(handle: *mut c_void) -> c_int;
    fn dlerror() -> *const c_char;
}

#[cfg(all(unix, not(target_os = "linux")))]
extern "C" {
    fn dlopen(filename: *const c_char, flags: c_int) -> *mut c_void;
    fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
    fn dlclose(handle: *mut c_void) -> c_int;
    fn dlerror() -> *const c_char;
}

#[cfg(unix)]
unsafe fn platform_open(path: *const c_char) -> *mut c_void {
    const RTLD_NOW: c_int = 2;
    const RTLD_LOCAL: c_int = 0;
    dlopen(path, RTLD_NOW | RTLD_LOCAL)
}

#[cfg(unix)]
unsafe fn platform_symbol(handle: *mut c_void, symbol: *const c_char) -> *mut c_void {
    dlsym(handle, symbol)
}

#[cfg(unix)]
unsafe fn platform_close(handle: *mut c_void) {
    let _ = dlclose(handle);
}

#[cfg(unix)]
fn platform_last_error() -> String {
    let pointer = unsafe { dlerror() };
    if pointer.is_null() {
        "unknown error".to_string()
    } else {
        let full = cstr_to_string(pointer);
        full.split(": tried:").next().unwrap_or(&full).to_string()
    }
}
