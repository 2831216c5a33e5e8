//! Executable resolution on `PATH`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolve `program` the way a shell would.
///
/// Names containing a path separator are checked as-is; bare names are
/// searched for in every `PATH` entry.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    find_executable_in(program, std::env::var_os("PATH").as_deref())
}

/// Like [`find_executable`] with an explicit search path.
pub fn find_executable_in(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    std::env::split_paths(search_path?)
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|path| is_executable(path))
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    [String::new(), ".exe".to_string()]
        .into_iter()
        .map(move |ext| format!("{program}{ext}"))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn make_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn finds_executable_on_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let expected = make_file(dir.path(), "fake-ocr", 0o755);
        let found = find_executable_in("fake-ocr", Some(dir.path().as_os_str()));
        assert_eq!(found, Some(expected));
    }

    #[test]
    fn skips_non_executable_files() {
        let dir = tempfile::tempdir().unwrap();
        make_file(dir.path(), "fake-ocr", 0o644);
        assert!(find_executable_in("fake-ocr", Some(dir.path().as_os_str())).is_none());
    }

    #[test]
    fn missing_program_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_executable_in("definitely-not-here", Some(dir.path().as_os_str())).is_none());
        assert!(find_executable_in("tesseract", None).is_none());
        assert!(find_executable_in("", Some(dir.path().as_os_str())).is_none());
    }

    #[test]
    fn explicit_path_is_checked_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = make_file(dir.path(), "ocr-bin", 0o755);
        let found = find_executable_in(path.to_str().unwrap(), None);
        assert_eq!(found, Some(path));
    }
}
