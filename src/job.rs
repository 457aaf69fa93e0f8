use crate::batch::{run_directory, run_list, run_subfolders};
use crate::engine::Collector;
use crate::error::Result;
use crate::options::TraversalConfig;
use crate::types::Report;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A complete, replayable set of parameters for one run.
///
/// This is what front ends build and what profiles store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Job {
    /// One document for the whole tree.
    Directory {
        root: PathBuf,
        #[serde(default)]
        traversal: TraversalConfig,
    },
    /// One document per immediate subfolder, plus one for root files.
    Subfolders {
        root: PathBuf,
        #[serde(default)]
        traversal: TraversalConfig,
    },
    /// One document from an explicit list of paths.
    List {
        entries: Vec<String>,
        #[serde(default)]
        base_dir: Option<PathBuf>,
        output_dir: PathBuf,
        file_name: String,
        #[serde(default)]
        paths_only: bool,
    },
}

impl Job {
    pub fn run(&self, collector: &Collector) -> Result<Vec<Report>> {
        match self {
            Job::Directory { root, traversal } => {
                run_directory(collector, root, traversal).map(|r| vec![r])
            }
            Job::Subfolders { root, traversal } => run_subfolders(collector, root, traversal),
            Job::List {
                entries,
                base_dir,
                output_dir,
                file_name,
                paths_only,
            } => run_list(
                collector,
                entries.as_slice(),
                base_dir.as_deref(),
                output_dir,
                file_name,
                *paths_only,
            )
            .map(|r| vec![r]),
        }
    }
}
