//! Search path and extension set derivation.
//!
//! Both inputs are normally taken from `PATH` and `PATHEXT`, but every
//! function here also accepts the raw value so callers can inject their own.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Directories searched when `PATH` is empty or unset.
pub const FALLBACK_SEARCH_PATHS: [&str; 4] = ["/usr/local/bin", "/usr/ucb", "/usr/bin", "/bin"];

/// Separator between entries of a PATH-like value.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Ordered search directories from a raw PATH-like value.
///
/// An empty or absent value falls back to [`FALLBACK_SEARCH_PATHS`]. Either
/// way, entries that are not existing directories are dropped.
pub fn default_search_paths(raw: Option<&OsStr>) -> Vec<PathBuf> {
    let entries: Vec<PathBuf> = match raw {
        Some(value) if !value.is_empty() => env::split_paths(value).collect(),
        _ => FALLBACK_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
    };

    let (kept, dropped): (Vec<PathBuf>, Vec<PathBuf>) =
        entries.into_iter().partition(|p| p.is_dir());
    if !dropped.is_empty() {
        debug!(?dropped, "dropping search path entries that are not directories");
    }
    kept
}

/// Ordered extensions from a raw PATHEXT-like value.
///
/// Absent means "append nothing" and yields `[""]`. A present value keeps
/// only the entries containing a dot, so an empty value yields `[]`.
pub fn extension_set(raw: Option<&OsStr>) -> Vec<String> {
    match raw {
        None => vec![String::new()],
        Some(value) => split_extensions(&value.to_string_lossy(), PATH_LIST_SEPARATOR),
    }
}

fn split_extensions(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .filter(|ext| ext.contains('.'))
        .map(String::from)
        .collect()
}

/// Search directories from the process `PATH`.
pub fn search_paths_from_env() -> Vec<PathBuf> {
    default_search_paths(env::var_os("PATH").as_deref())
}

/// Extensions from the process `PATHEXT`.
pub fn extension_set_from_env() -> Vec<String> {
    extension_set(env::var_os("PATHEXT").as_deref())
}

/// Directory equality as PATH lookup sees it: trailing separators are
/// ignored, and so is case on Windows.
pub(crate) fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        let s = p.to_string_lossy();
        let trimmed = s.trim_end_matches(['/', '\\']);
        if cfg!(windows) {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        }
    }
    normalize(p1) == normalize(p2)
}
