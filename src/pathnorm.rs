//! Path helpers shared by both collectors.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Host segments that mark a WSL share seen from Windows.
const REMOTE_HOSTS: &[&str] = &["wsl.localhost", "wsl$"];

/// Rewrites a WSL UNC path (`\\wsl.localhost\Ubuntu\home\me`) to the
/// equivalent Linux path (`/home/me`).
///
/// Both backslash and forward-slash forms are accepted. Anything that does
/// not start with two separators followed by a known host is returned as is.
pub fn normalize_remote_path(path: &str) -> Cow<'_, str> {
    let Some(rest) = path
        .strip_prefix(r"\\")
        .or_else(|| path.strip_prefix("//"))
    else {
        return Cow::Borrowed(path);
    };
    let canonical = rest.replace('\\', "/");
    let mut segments = canonical.split('/').filter(|s| !s.is_empty());
    let host_ok = REMOTE_HOSTS.iter().any(|host| {
        canonical
            .strip_prefix(host)
            .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
    });
    if !host_ok {
        return Cow::Borrowed(path);
    }
    segments.next();
    if segments.next().is_none() {
        // no distribution segment
        return Cow::Borrowed(path);
    }
    let local: Vec<&str> = segments.collect();
    Cow::Owned(format!("/{}", local.join("/")))
}

/// Lexically normalizes a path: drops `.` components and folds `..` into the
/// preceding normal component. The filesystem is never consulted.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Absolute, lexically normalized form used to compare two paths that may not
/// exist yet.
pub(crate) fn comparable(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}
