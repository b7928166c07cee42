//! Predicates on candidate files and commands.
//!
//! Every check here answers from what the filesystem reports at call time
//! and turns any I/O failure into `false`.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

/// Whether `path`, resolved against `dir` when given, names a regular file
/// the current process may execute.
///
/// On Windows there is no execute bit; the file name must instead end in a
/// `PATHEXT` extension, or one of [`DEFAULT_PATHEXT`] when that is unset.
pub fn is_executable_file(path: impl AsRef<Path>, dir: Option<&Path>) -> bool {
    let path = path.as_ref();
    let resolved = match dir {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    };

    match fs::metadata(&resolved) {
        Ok(meta) => meta.is_file() && has_execute_access(&resolved),
        Err(e) => {
            trace!(path = %resolved.display(), error = %e, "stat failed");
            false
        }
    }
}

#[cfg(unix)]
fn has_execute_access(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn has_execute_access(path: &Path) -> bool {
    has_pathext_extension(path, env::var_os("PATHEXT").as_deref())
}

/// Extensions Windows treats as executable when `PATHEXT` is unset.
pub const DEFAULT_PATHEXT: [&str; 4] = [".COM", ".EXE", ".BAT", ".CMD"];

#[cfg(any(not(unix), test))]
fn has_pathext_extension(path: &Path, pathext: Option<&OsStr>) -> bool {
    let Some(name) = path.to_str() else {
        return false;
    };
    match pathext {
        Some(raw) => has_executable_extension(name, &crate::env::extension_set(Some(raw))),
        None => has_executable_extension(name, &DEFAULT_PATHEXT),
    }
}

/// Whether the file name of `filename` ends in one of `extensions`,
/// compared without regard to ASCII case.
///
/// The extension runs from the last dot to the end of the name. Dotfiles
/// such as `.profile` have none. A name ending in a bare dot also has none
/// rather than the extension `"."`, so a stray `.` entry in the set never
/// matches.
pub fn has_executable_extension<S: AsRef<str>>(filename: &str, extensions: &[S]) -> bool {
    let Some(ext) = extension_of(filename) else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
}

fn extension_of(filename: &str) -> Option<&str> {
    let name = Path::new(filename).file_name()?.to_str()?;
    let dot = name.rfind('.')?;
    (dot > 0 && dot + 1 < name.len()).then(|| &name[dot..])
}

/// Whether `cmd` is already a fully expanded absolute path, i.e.
/// [`expand_path`] hands it back unchanged.
pub fn is_absolute_command(cmd: &str) -> bool {
    expand_path(cmd).as_os_str() == OsStr::new(cmd)
}

/// Absolute form of `path`.
///
/// A leading `~` is replaced by the home directory, relative paths are
/// joined onto the current directory, and `.` / `..` are folded without
/// touching the filesystem. When the home or current directory cannot be
/// determined that step is skipped.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let expanded = expand_home(path.as_ref());
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    normalize(&absolute)
}

fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("run.BAT"), Some(".BAT"));
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz"));
        assert_eq!(extension_of("dir.d/ls"), None);
        assert_eq!(extension_of(".profile"), None);
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of("ls"), None);
    }

    #[test]
    fn test_has_executable_extension_ignores_case() {
        assert!(has_executable_extension("run.BAT", &[".exe", ".bat"]));
        assert!(has_executable_extension("tool.exe", &[".EXE"]));
        assert!(!has_executable_extension("notes.txt", &[".EXE", ".BAT"]));
    }

    #[test]
    fn test_has_executable_extension_without_extension() {
        assert!(!has_executable_extension("ls", &[".EXE"]));
        assert!(!has_executable_extension("ls", &[""]));
    }

    #[test]
    fn test_has_executable_extension_empty_set() {
        let none: [&str; 0] = [];
        assert!(!has_executable_extension("run.bat", &none));
    }

    #[test]
    fn test_is_executable_file_missing() {
        let dir = tempdir().unwrap();
        assert!(!is_executable_file(dir.path().join("missing"), None));
    }

    #[test]
    fn test_is_executable_file_rejects_directory() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bin")).unwrap();
        assert!(!is_executable_file("bin", Some(dir.path())));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_file_permission_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let exe = dir.path().join("tool");
        let plain = dir.path().join("notes");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();
        std::fs::write(&plain, "text").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::set_permissions(&plain, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(is_executable_file(&exe, None));
        assert!(is_executable_file("tool", Some(dir.path())));
        assert!(!is_executable_file(&plain, None));
    }

    #[cfg(windows)]
    #[test]
    fn test_is_executable_file_requires_pathext_on_windows() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tool.exe"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        assert!(is_executable_file("tool.exe", Some(dir.path())));
        assert!(!is_executable_file("notes.txt", Some(dir.path())));
    }

    #[test]
    fn test_has_pathext_extension_defaults() {
        assert!(has_pathext_extension(Path::new("dir/tool.exe"), None));
        assert!(has_pathext_extension(Path::new("dir/run.Bat"), None));
        assert!(!has_pathext_extension(Path::new("dir/notes.txt"), None));
        assert!(!has_pathext_extension(Path::new("dir/tool"), None));
    }

    #[test]
    fn test_has_pathext_extension_from_value() {
        let sep = crate::env::PATH_LIST_SEPARATOR;
        let raw = format!(".PS1{sep}.EXE");
        let pathext = Some(OsStr::new(&raw));

        assert!(has_pathext_extension(Path::new("dir/script.ps1"), pathext));
        assert!(!has_pathext_extension(Path::new("dir/run.bat"), pathext));
        assert!(!has_pathext_extension(Path::new("dir/notes.txt"), Some(OsStr::new(""))));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_absolute_command_unix() {
        assert!(is_absolute_command("/usr/local/bin/ruby"));
        assert!(is_absolute_command("/"));
        assert!(!is_absolute_command("ruby"));
        assert!(!is_absolute_command("./ruby"));
        assert!(!is_absolute_command("bin/ruby"));
        assert!(!is_absolute_command("/usr/bin/../bin/ruby"));
        assert!(!is_absolute_command("/usr/bin/./ruby"));
        assert!(!is_absolute_command("/usr/bin/"));
        assert!(!is_absolute_command(""));
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_path_folds_dots() {
        assert_eq!(expand_path("/usr/bin/../lib/./x"), PathBuf::from("/usr/lib/x"));
        assert_eq!(expand_path("/.."), PathBuf::from("/"));
    }

    #[test]
    fn test_expand_path_relative_joins_cwd() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(expand_path("some-tool"), cwd.join("some-tool"));
    }

    #[test]
    fn test_expand_path_home() {
        if let Some(home) = home::home_dir() {
            assert_eq!(expand_path("~/bin/tool"), normalize(&home.join("bin/tool")));
            assert!(!is_absolute_command("~/bin/tool"));
        }
    }
}
