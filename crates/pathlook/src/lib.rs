//! Executable lookup over a search path.
//!
//! Given a command name and an ordered list of directories, `pathlook`
//! yields the absolute paths of matching executables the way a shell does:
//! the first directory wins, Unix checks the execute permission, and
//! Windows tries each `PATHEXT` extension in order.
//!
//! ```no_run
//! use pathlook::Resolver;
//!
//! let resolver = Resolver::from_env();
//! if let Some(git) = resolver.locate("git") {
//!     println!("{}", git.display());
//! }
//! ```

use std::path::{Path, PathBuf};

pub use env::{FALLBACK_SEARCH_PATHS, default_search_paths, extension_set};
pub use error::{Error, Result};
pub use exec::{expand_path, has_executable_extension, is_absolute_command, is_executable_file};
pub use resolver::{Candidates, Matches, Resolver, TargetResolver};

pub mod env;
mod error;
pub mod exec;
mod resolver;

/// Lazily enumerate executables named `cmd` in `paths`, using the
/// process `PATHEXT`.
pub fn enumerate<P: AsRef<Path>>(cmd: &str, paths: &[P]) -> Candidates {
    Resolver::new(paths.iter().map(|p| p.as_ref().to_path_buf())).candidates(cmd)
}

/// First executable named `cmd` in `paths`.
pub fn locate<P: AsRef<Path>>(cmd: &str, paths: &[P]) -> Option<PathBuf> {
    enumerate(cmd, paths).next()
}

/// Every executable named `cmd` in `paths`, in search order.
pub fn locate_all<P: AsRef<Path>>(cmd: &str, paths: &[P]) -> Vec<PathBuf> {
    enumerate(cmd, paths).collect()
}

pub fn exists<P: AsRef<Path>>(cmd: &str, paths: &[P]) -> bool {
    locate(cmd, paths).is_some()
}
