//! Command-line interface for kslist.
//!
//! Every subcommand builds a [`Job`], runs it, and can save it as a named
//! profile for later replay with `kslist run`.

use clap::{Args, Parser, Subcommand};
use kslist::{
    Collector, ExtensionPreset, Job, KslistError, ProfileStore, Report, TraversalBuilder,
    TraversalConfig, normalize_remote_path, read_path_list,
};
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Merge project files into indexed markdown documents
#[derive(Parser)]
#[command(name = "kslist", version, about, long_about = None)]
struct Cli {
    /// Debug-level diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Where profiles are stored (default ~/.kslist/profiles)
    #[arg(long, global = true)]
    profiles_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// One document for the whole directory tree
    Tree {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// One document per immediate subfolder, plus root.md
    Split {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// One document from an explicit list of files
    List(ListArgs),
    /// Replay a saved profile
    Run {
        /// Profile name
        name: String,
    },
    /// List saved profiles
    Profiles,
    /// List the built-in extension sets
    Presets,
}

#[derive(Args)]
struct ScanArgs {
    /// Root directory
    root: String,

    /// Extensions to include (can be repeated; default all)
    #[arg(short, long = "ext")]
    extensions: Vec<String>,

    /// Built-in extension set, numbered from 1 (see `kslist presets`)
    #[arg(short, long, conflicts_with = "extensions")]
    preset: Option<usize>,

    /// Directory ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Do not add the default ignore patterns (.git, .venv, ...)
    #[arg(long)]
    no_default_ignores: bool,

    /// Max depth: 1 = root files only, 2 = root + one level (0 = unlimited)
    #[arg(short = 'd', long, default_value_t = 0)]
    max_depth: usize,

    /// Emit paths only, no file content
    #[arg(long)]
    paths_only: bool,

    /// Save this run as a named profile
    #[arg(long)]
    save: Option<String>,
}

#[derive(Args)]
struct ListArgs {
    /// Files to include, in order
    paths: Vec<String>,

    /// Read the paths from a text file, one per line
    #[arg(long)]
    from: Option<String>,

    /// Directory relative paths are resolved against
    #[arg(long)]
    base_dir: Option<String>,

    /// Directory that receives the _kslist folder
    #[arg(long, default_value = ".")]
    output_dir: String,

    /// Output file name (.md is appended when missing)
    #[arg(long, default_value = "list.md")]
    name: String,

    /// Emit paths only, no file content
    #[arg(long)]
    paths_only: bool,

    /// Save this run as a named profile
    #[arg(long)]
    save: Option<String>,
}

fn local_path(raw: &str) -> PathBuf {
    PathBuf::from(normalize_remote_path(raw.trim()).into_owned())
}

impl ScanArgs {
    fn into_traversal(self) -> Result<(PathBuf, TraversalConfig, Option<String>), KslistError> {
        let mut builder = TraversalBuilder::new()
            .ignore_patterns(self.ignore_patterns)
            .paths_only(self.paths_only);
        if !self.no_default_ignores {
            builder = builder.default_ignores();
        }
        builder = match self.preset {
            Some(number) => builder.preset(ExtensionPreset::get(number)?),
            None => builder.extensions(self.extensions),
        };
        builder = if self.max_depth > 0 {
            builder.max_depth(self.max_depth)
        } else {
            builder.no_limit_depth()
        };
        Ok((local_path(&self.root), builder.build(), self.save))
    }
}

impl ListArgs {
    fn into_job(self) -> Result<(Job, Option<String>), KslistError> {
        let mut entries = self.paths;
        if let Some(list_file) = &self.from {
            entries.extend(read_path_list(&local_path(list_file))?);
        }
        let job = Job::List {
            entries,
            base_dir: self.base_dir.as_deref().map(local_path),
            output_dir: local_path(&self.output_dir),
            file_name: self.name,
            paths_only: self.paths_only,
        };
        Ok((job, self.save))
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let profiles_dir = cli.profiles_dir;

    let (job, save) = match cli.command {
        Command::Tree { scan } => {
            let (root, traversal, save) = scan.into_traversal().unwrap_or_else(|e| fail(e));
            (Job::Directory { root, traversal }, save)
        }
        Command::Split { scan } => {
            let (root, traversal, save) = scan.into_traversal().unwrap_or_else(|e| fail(e));
            (Job::Subfolders { root, traversal }, save)
        }
        Command::List(args) => args.into_job().unwrap_or_else(|e| fail(e)),
        Command::Run { name } => {
            let job = profile_store(profiles_dir.clone())
                .load(&name)
                .unwrap_or_else(|e| fail(e));
            tracing::info!("Running profile '{}'", name);
            (job, None)
        }
        Command::Profiles => {
            list_profiles(&profile_store(profiles_dir));
            return;
        }
        Command::Presets => {
            print_presets();
            return;
        }
    };

    let collector = Collector::default();
    match job.run(&collector) {
        Ok(reports) => print_reports(&reports),
        Err(e) => fail(e),
    }

    if let Some(name) = save {
        if let Err(e) = profile_store(profiles_dir).save(&name, &job) {
            fail(e);
        }
    }
}

fn profile_store(dir: Option<PathBuf>) -> ProfileStore {
    match dir {
        Some(dir) => ProfileStore::new(dir),
        None => ProfileStore::open_default().unwrap_or_else(|e| fail(e)),
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    exit(1);
}

fn print_presets() {
    for (idx, preset) in ExtensionPreset::ALL.iter().enumerate() {
        println!("{} - {}", idx + 1, preset.label());
    }
}

fn list_profiles(store: &ProfileStore) {
    match store.list() {
        Ok(names) if names.is_empty() => {
            println!("No saved profiles in {}", store.dir().display());
        }
        Ok(names) => {
            for (idx, name) in names.iter().enumerate() {
                println!("{} - {}", idx + 1, name);
            }
        }
        Err(e) => fail(e),
    }
}

fn print_reports(reports: &[Report]) {
    if reports.is_empty() {
        println!("Nothing to write.");
        return;
    }
    for report in reports {
        println!(
            "{} ({} file(s), {} skipped)",
            report.output.display(),
            report.files,
            report.skipped.len()
        );
    }
}
