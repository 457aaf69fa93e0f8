//! # kslist
//!
//! `kslist` collects files from a directory tree or from an explicit list of
//! paths and merges them into markdown documents: an index of every collected
//! path, followed by each file's content in a fenced block (or just the paths,
//! in paths-only mode).
//!
//! Directory walks honour an extension allow-list, a maximum depth and
//! directory ignore patterns. A fixed set of sensitive file names (`.env`,
//! `credentials.json`, ...) is never collected. Files that cannot be read are
//! reported and skipped; they never abort a run.
//!
//! # Features
//!
//! - `parallel`: processes the subfolders of a per-subfolder run on a Rayon
//!   pool. Each subfolder is still walked sequentially.
//!
//! # Example
//!
//! ```no_run
//! use kslist::{Collector, TraversalBuilder, write_document};
//! use std::path::Path;
//!
//! let config = TraversalBuilder::new()
//!     .default_ignores()
//!     .extensions(vec![".rs".into(), ".toml".into()])
//!     .max_depth(3)
//!     .build();
//!
//! let collector = Collector::default();
//! let collection = collector
//!     .collect_tree(Path::new("."), &config)
//!     .expect("Failed to scan directory");
//!
//! for skipped in &collection.skipped {
//!     eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//! write_document(&collection.files, "project.md", config.paths_only).unwrap();
//! ```

mod batch;
mod content;
mod engine;
mod error;
mod filter;
mod job;
mod list;
mod options;
pub mod output;
mod pathnorm;
mod profile;
mod rules;
mod types;

pub use batch::{
    OUTPUT_DIR_NAME, ROOT_DOCUMENT, ensure_output_dir, markdown_file_name, run_directory,
    run_list, run_subfolders,
};
pub use content::{TextRead, decode_text, read_text};
pub use engine::Collector;
pub use error::{KslistError, Result};
pub use filter::{IgnoreSet, matches_extension};
pub use job::Job;
pub use list::read_path_list;
pub use options::{
    DEFAULT_IGNORE_PATTERNS, ExtensionPreset, TraversalBuilder, TraversalConfig,
    normalize_extension,
};
pub use output::{format_document, write_document};
pub use pathnorm::{normalize_lexically, normalize_remote_path};
pub use profile::ProfileStore;
pub use rules::{LANGUAGE_TABLE, Rules, SENSITIVE_FILES};
pub use types::{Collection, FileDescriptor, Report, SkipNotice, SkipReason, TextEncoding};
