use crate::engine::Collector;
use crate::error::{KslistError, Result};
use crate::pathnorm::normalize_remote_path;
use crate::types::{Collection, SkipReason};
use std::fs;
use std::path::{Path, PathBuf};

impl Collector {
    /// Resolves an explicit list of paths, keeping the input order.
    ///
    /// Blank entries are dropped. Relative entries are joined onto `base_dir`
    /// when one is given. Sensitive and missing entries are reported in
    /// [`Collection::skipped`] and the rest of the list is still processed.
    pub fn collect_list<I, S>(
        &self,
        entries: I,
        base_dir: Option<&Path>,
        paths_only: bool,
    ) -> Collection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collection = Collection::default();
        for raw in entries {
            let Some(path) = resolve_entry(raw.as_ref(), base_dir) else {
                continue;
            };
            if self.rules().is_excluded(&path) {
                collection.skip(path, SkipReason::Sensitive);
                continue;
            }
            if !path.is_file() {
                collection.skip(path, SkipReason::NotFound);
                continue;
            }
            self.admit(path, paths_only, &mut collection);
            if let Some(last) = collection.files.last() {
                tracing::debug!("Collected {}", last.path.display());
            }
        }
        collection
    }
}

fn resolve_entry(raw: &str, base_dir: Option<&Path>) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = PathBuf::from(normalize_remote_path(trimmed).into_owned());
    match base_dir {
        Some(base) if !path.is_absolute() => Some(base.join(path)),
        _ => Some(path),
    }
}

/// Reads a list file, one path per line; blank lines are dropped.
pub fn read_path_list(list_file: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(list_file).map_err(|e| KslistError::io(list_file, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
