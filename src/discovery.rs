use std::env;
use std::path::PathBuf;

pub(crate) fn default_library_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "windows")]
    {
        &["libmecab.dll", "mecab.dll"]
    }
    #[cfg(target_os = "macos")]
    {
        &[
            "libmecab.dylib",
            "libmecab.2.dylib",
            "/usr/local/lib/libmecab.dylib",
            "/opt/homebrew/lib/libmecab.dylib",
            "@rpath/libmecab.dylib",
        ]
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        &[
            "libmecab.so.2",
            "libmecab.so",
            "./libmecab.so",
            "/usr/local/lib/libmecab.so",
            "/usr/lib/libmecab.so.2",
        ]
    }
}

pub(crate) fn discover_default_library_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("MECAB_LIBRARY_PATH") {
        return Some(PathBuf::from(path));
    }

    #[cfg(target_os = "windows")]
    let (home_var, file_name, well_known): (&str, &str, &[&str]) = (
        "USERPROFILE",
        "libmecab.dll",
        &[
            "C:\\Program Files\\MeCab\\bin\\libmecab.dll",
            "C:\\Program Files (x86)\\MeCab\\bin\\libmecab.dll",
        ],
    );

    #[cfg(target_os = "macos")]
    let (home_var, file_name, well_known): (&str, &str, &[&str]) = (
        "HOME",
        "libmecab.dylib",
        &[
            "/opt/homebrew/lib/libmecab.dylib",
            "/usr/local/lib/libmecab.dylib",
        ],
    );

    #[cfg(all(unix, not(target_os = "macos")))]
    let (home_var, file_name, well_known): (&str, &str, &[&str]) = (
        "HOME",
        "libmecab.so",
        &[
            "/usr/local/lib/libmecab.so",
            "/usr/lib/x86_64-linux-gnu/libmecab.so.2",
            "/usr/lib/aarch64-linux-gnu/libmecab.so.2",
            "/usr/lib64/libmecab.so.2",
            "/usr/lib/libmecab.so.2",
        ],
    );

    if let Some(home) = env::var_os(home_var) {
        let path = PathBuf::from(home)
            .join(".local")
            .join("lib")
            .join(file_name);
        if path.exists() {
            return Some(path);
        }
    }

    well_known.iter().map(PathBuf::from).find(|path| path.exists())
}
