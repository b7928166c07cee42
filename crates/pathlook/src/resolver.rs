//! Command resolution over a search path.
//!
//! [`Resolver`] owns the two inputs of a lookup, the ordered search
//! directories and the ordered extension set, and hands out [`Candidates`]
//! iterators that probe the filesystem one path at a time.

use std::env;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use crate::env::{extension_set_from_env, paths_equal, search_paths_from_env};
use crate::error::{Error, Result};
use crate::exec::{expand_path, has_executable_extension, is_absolute_command, is_executable_file};

/// Maps a command name to an executable path.
///
/// Policy layers (project-local tools first, then the system) implement this
/// and stack on top of a [`Resolver`].
pub trait TargetResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf>;

    fn resolve_all(&self, command: &str) -> Vec<PathBuf> {
        self.resolve(command).into_iter().collect()
    }
}

impl<R: TargetResolver + ?Sized> TargetResolver for &R {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        (**self).resolve(command)
    }

    fn resolve_all(&self, command: &str) -> Vec<PathBuf> {
        (**self).resolve_all(command)
    }
}

/// How many matches a lookup collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matches {
    #[default]
    First,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    paths: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Resolver {
    /// Search `paths` in order with the extension set from `PATHEXT`.
    ///
    /// The directories are used as given; missing ones simply never match.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            extensions: extension_set_from_env(),
        }
    }

    /// Search path from `PATH` and extension set from `PATHEXT`.
    pub fn from_env() -> Self {
        Self {
            paths: search_paths_from_env(),
            extensions: extension_set_from_env(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Put `dir` first in the search order unless it is already present.
    pub fn prepend(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if !self.contains(&dir) {
            self.paths.insert(0, dir);
        }
        self
    }

    pub fn remove(mut self, dir: &Path) -> Self {
        self.paths.retain(|p| !paths_equal(p, dir));
        self
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.paths.iter().any(|p| paths_equal(p, dir))
    }

    /// The search path joined back into a `PATH` value.
    pub fn path_var(&self) -> Result<OsString> {
        Ok(env::join_paths(&self.paths)?)
    }

    pub fn has_executable_extension(&self, filename: &str) -> bool {
        has_executable_extension(filename, &self.extensions)
    }

    /// Lazily enumerate the executables `cmd` resolves to.
    ///
    /// An absolute, already expanded `cmd` is checked as-is and with each
    /// extension appended; the search directories are not consulted even
    /// when nothing matches. Any other `cmd` is looked up in every search
    /// directory in order.
    pub fn candidates(&self, cmd: &str) -> Candidates {
        if is_absolute_command(cmd) {
            debug!(cmd, extensions = self.extensions.len(), "checking absolute command");
            return Candidates {
                cmd: cmd.to_string(),
                dirs: Vec::new().into_iter(),
                extensions: self.extensions.clone(),
                probe_bare: true,
                current: Some(Base::new(PathBuf::from(cmd), true)),
            };
        }

        let probe_bare = self.has_executable_extension(cmd);
        debug!(
            cmd,
            dirs = self.paths.len(),
            extensions = self.extensions.len(),
            probe_bare,
            "searching for command"
        );
        Candidates {
            cmd: cmd.to_string(),
            dirs: self.paths.clone().into_iter(),
            extensions: self.extensions.clone(),
            probe_bare,
            current: None,
        }
    }

    pub fn locate(&self, cmd: &str) -> Option<PathBuf> {
        self.candidates(cmd).next()
    }

    pub fn locate_all(&self, cmd: &str) -> Vec<PathBuf> {
        self.candidates(cmd).collect()
    }

    pub fn locate_with(&self, cmd: &str, matches: Matches) -> Vec<PathBuf> {
        match matches {
            Matches::First => self.locate(cmd).into_iter().collect(),
            Matches::All => self.locate_all(cmd),
        }
    }

    pub fn exists(&self, cmd: &str) -> bool {
        self.locate(cmd).is_some()
    }

    /// Like [`Resolver::locate`], but a missing command is an error.
    pub fn require(&self, cmd: &str) -> Result<PathBuf> {
        self.locate(cmd).ok_or_else(|| Error::CommandNotFound {
            cmd: cmd.to_string(),
        })
    }
}

impl TargetResolver for Resolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.locate(command)
    }

    fn resolve_all(&self, command: &str) -> Vec<PathBuf> {
        self.locate_all(command)
    }
}

/// Executables a command resolves to, in priority order.
///
/// Each call to `next` stats only as many paths as it takes to find the
/// next match, so taking the first item stops the search early.
#[derive(Debug, Clone)]
pub struct Candidates {
    cmd: String,
    dirs: std::vec::IntoIter<PathBuf>,
    extensions: Vec<String>,
    probe_bare: bool,
    current: Option<Base>,
}

/// A path being probed as-is and with each extension appended.
#[derive(Debug, Clone)]
struct Base {
    path: PathBuf,
    bare_pending: bool,
    next_ext: usize,
}

impl Base {
    fn new(path: PathBuf, probe_bare: bool) -> Self {
        Self {
            path,
            bare_pending: probe_bare,
            next_ext: 0,
        }
    }
}

impl Candidates {
    fn next_probe(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(base) = &mut self.current {
                if base.bare_pending {
                    base.bare_pending = false;
                    return Some(base.path.clone());
                }
                while let Some(ext) = self.extensions.get(base.next_ext) {
                    base.next_ext += 1;
                    // identical to the bare probe
                    if ext.is_empty() && self.probe_bare {
                        continue;
                    }
                    let mut probe = base.path.clone().into_os_string();
                    probe.push(ext);
                    return Some(PathBuf::from(probe));
                }
                self.current = None;
            }

            let dir = self.dirs.next()?;
            self.current = Some(Base::new(
                expand_path(join_under(&dir, &self.cmd)),
                self.probe_bare,
            ));
        }
    }
}

/// `dir/cmd` even when `cmd` carries a root of its own, which
/// `Path::join` would otherwise let replace `dir`.
fn join_under(dir: &Path, cmd: &str) -> PathBuf {
    let mut joined = dir.to_path_buf();
    for component in Path::new(cmd).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    joined
}

impl Iterator for Candidates {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        while let Some(probe) = self.next_probe() {
            if is_executable_file(&probe, None) {
                trace!(path = %probe.display(), "match");
                return Some(probe);
            }
            trace!(path = %probe.display(), "no executable");
        }
        None
    }
}
