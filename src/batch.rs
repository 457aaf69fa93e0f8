//! Turns a parameter set into written documents.
//!
//! Every document lands in a `_kslist` directory next to what was scanned.
//! Configuration problems (bad root, nothing to list) are reported before any
//! file is created.

use crate::engine::Collector;
use crate::error::{KslistError, Result};
use crate::filter::IgnoreSet;
use crate::options::TraversalConfig;
use crate::output::{ROOT_INDEX_HEADING, write_document, write_with_heading};
use crate::pathnorm::comparable;
use crate::types::Report;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Name of the directory that receives generated documents.
pub const OUTPUT_DIR_NAME: &str = "_kslist";
/// File name of the document listing the files directly inside the root.
pub const ROOT_DOCUMENT: &str = "root.md";

/// Creates `parent/_kslist` if needed and returns it.
pub fn ensure_output_dir(parent: &Path) -> Result<PathBuf> {
    let dir = parent.join(OUTPUT_DIR_NAME);
    fs::create_dir_all(&dir).map_err(|e| KslistError::io(&dir, e))?;
    Ok(dir)
}

fn check_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(KslistError::InvalidRoot(root.to_path_buf()))
    }
}

/// `<name>.md` where name is the last component of the absolute root.
fn document_name(root: &Path) -> String {
    let name = comparable(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());
    format!("{}.md", name)
}

/// Appends `.md` unless the name already has it.
pub fn markdown_file_name(name: &str) -> String {
    if name.ends_with(".md") {
        name.to_string()
    } else {
        format!("{}.md", name)
    }
}

/// Collects `root` into a single `_kslist/<root name>.md`.
pub fn run_directory(
    collector: &Collector,
    root: &Path,
    config: &TraversalConfig,
) -> Result<Report> {
    check_root(root)?;
    let output = ensure_output_dir(root)?.join(document_name(root));
    tree_document(collector, root, config, output)
}

fn tree_document(
    collector: &Collector,
    root: &Path,
    config: &TraversalConfig,
    output: PathBuf,
) -> Result<Report> {
    let config = TraversalConfig {
        output_path: Some(output.clone()),
        ..config.clone()
    };
    let collection = collector.collect_tree(root, &config)?;
    write_document(&collection.files, &output, config.paths_only)?;
    tracing::info!(
        "Wrote {} ({} file(s))",
        output.display(),
        collection.files.len()
    );
    Ok(Report::new(output, collection))
}

/// Writes one document per immediate subdirectory of `root`, plus
/// `root.md` for the files sitting directly in it.
///
/// Subdirectories are visited in name order. The output directory itself and
/// directories matching an ignore pattern are skipped. Each subdirectory is
/// an independent traversal, so depth limits count from that subdirectory.
/// `root.md` is only written when at least one root file qualifies.
pub fn run_subfolders(
    collector: &Collector,
    root: &Path,
    config: &TraversalConfig,
) -> Result<Vec<Report>> {
    check_root(root)?;
    let out_dir = ensure_output_dir(root)?;
    let mut reports = Vec::new();

    tracing::info!("Processing files at the root of {}", root.display());
    if let Some(report) = root_document(collector, root, config, &out_dir)? {
        reports.push(report);
    }

    tracing::info!("Processing subfolders of {}", root.display());
    let subfolders = subfolders(root, config, &out_dir)?;
    #[cfg(not(feature = "parallel"))]
    let sub_reports = subfolders
        .iter()
        .map(|(dir, output)| tree_document(collector, dir, config, output.clone()))
        .collect::<Result<Vec<_>>>()?;
    #[cfg(feature = "parallel")]
    let sub_reports = subfolders
        .par_iter()
        .map(|(dir, output)| tree_document(collector, dir, config, output.clone()))
        .collect::<Result<Vec<_>>>()?;
    reports.extend(sub_reports);
    Ok(reports)
}

fn root_document(
    collector: &Collector,
    root: &Path,
    config: &TraversalConfig,
    out_dir: &Path,
) -> Result<Option<Report>> {
    let output = out_dir.join(ROOT_DOCUMENT);
    let config = TraversalConfig {
        max_depth: 1,
        output_path: Some(output.clone()),
        ..config.clone()
    };
    let collection = collector.collect_tree(root, &config)?;
    if collection.files.is_empty() {
        tracing::info!("No files found at the root of {}", root.display());
        return Ok(None);
    }
    write_with_heading(&collection.files, &output, ROOT_INDEX_HEADING, config.paths_only)?;
    tracing::info!("Wrote {}", output.display());
    Ok(Some(Report::new(output, collection)))
}

/// Immediate subdirectories to process, with the document each one gets.
fn subfolders(
    root: &Path,
    config: &TraversalConfig,
    out_dir: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let ignore = IgnoreSet::new(&config.ignore_patterns);
    let out_dir = comparable(out_dir);
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|e| KslistError::io(root, e))?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("Could not list an entry of {}: {}", root.display(), e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    let mut selected = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if comparable(&dir) == out_dir {
            continue;
        }
        if ignore.matches(&dir) {
            tracing::info!("Ignoring subfolder: {}", dir.display());
            continue;
        }
        let Some(name) = dir.file_name() else {
            continue;
        };
        let document = format!("{}.md", name.to_string_lossy());
        if document == ROOT_DOCUMENT {
            tracing::warn!(
                "Skipping subfolder {}: its document would replace {}",
                dir.display(),
                ROOT_DOCUMENT
            );
            continue;
        }
        let output = out_dir.join(document);
        tracing::info!("Processing {} -> {}", dir.display(), output.display());
        selected.push((dir, output));
    }
    Ok(selected)
}

/// Collects an explicit list into `output_dir/_kslist/<file_name>`.
///
/// An empty list (after dropping blank entries) is rejected before anything
/// is written.
pub fn run_list<S: AsRef<str>>(
    collector: &Collector,
    entries: &[S],
    base_dir: Option<&Path>,
    output_dir: &Path,
    file_name: &str,
    paths_only: bool,
) -> Result<Report> {
    if entries.iter().all(|e| e.as_ref().trim().is_empty()) {
        return Err(KslistError::EmptyList);
    }
    let output = ensure_output_dir(output_dir)?.join(markdown_file_name(file_name));
    tracing::info!("Processing {} path(s)", entries.len());
    let collection = collector.collect_list(entries, base_dir, paths_only);
    write_document(&collection.files, &output, paths_only)?;
    tracing::info!(
        "Wrote {} ({} file(s))",
        output.display(),
        collection.files.len()
    );
    Ok(Report::new(output, collection))
}
