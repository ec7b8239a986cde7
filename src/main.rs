//! foldertree - Convert between directories and box-drawing tree diagrams.
//!
//! Usage:
//!   ftree scan [PATH]        Render a directory as a tree diagram
//!   ftree parse [TREE]       Preview the items a diagram describes
//!   ftree create [TREE]      Create the folders and files of a diagram
//!   ftree stats [PATH]       Count every folder and file under PATH
//!   ftree --help             Show help

mod settings;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::EnvFilter;

use foldertree_core::{Diagram, ScanConfig, parse_diagram};
use foldertree_ops::{MaterializeReport, MaterializeResult, start_materialize};
use foldertree_scan::{ScanProgress, TreeScanner, folder_stats};

use crate::settings::Settings;

/// Print a progress line every this many entries.
const PROGRESS_EVERY: u64 = 50;

#[derive(Parser)]
#[command(
    name = "foldertree",
    version,
    about = "Convert between directory hierarchies and tree diagrams",
    long_about = "foldertree renders a directory as a box-drawing tree diagram, \
                  and turns such a diagram back into empty folders and files.\n\n\
                  Defaults for `scan` can be set in <config dir>/foldertree/settings.toml."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a directory as a tree diagram
    Scan(ScanArgs),

    /// Show the folders and files a diagram describes
    Parse {
        /// Diagram file, or - for stdin
        #[arg(default_value = "-")]
        tree: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Create the folders and empty files of a diagram
    Create {
        /// Diagram file, or - for stdin
        #[arg(default_value = "-")]
        tree: String,

        /// Directory to create the root folder in
        #[arg(short, long, default_value = ".")]
        base: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Count all folders and files under a directory
    Stats {
        /// Path to count
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Worker threads (0 = default pool)
        #[arg(short = 'j', long, default_value = "0")]
        threads: usize,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Path to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Levels below the root to list (0 = unlimited)
    #[arg(short, long)]
    depth: Option<u32>,

    /// List every level
    #[arg(short, long, conflicts_with = "depth")]
    all: bool,

    /// List directories only
    #[arg(long)]
    no_files: bool,

    /// Leave out entries starting with a dot
    #[arg(long)]
    no_hidden: bool,

    /// Leave out entries matching a glob (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Write the diagram to a file (.txt is added when there is no extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not show progress
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan(args) => run_scan(args, &Settings::load())?,
        Command::Parse { tree, format } => run_parse(&tree, format)?,
        Command::Create { tree, base, format } => run_create(&tree, base, format)?,
        Command::Stats { path, threads } => run_stats(&path, threads)?,
    }

    Ok(())
}

/// Send logs to stderr, filtered by `RUST_LOG` or the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Render a directory and print or save the diagram.
fn run_scan(args: ScanArgs, settings: &Settings) -> Result<()> {
    let max_depth = if args.all {
        0
    } else {
        args.depth.unwrap_or(settings.max_depth)
    };
    let mut ignore_patterns = settings.ignore_patterns.clone();
    ignore_patterns.extend(args.ignore);

    let config = ScanConfig::builder()
        .root(args.path)
        .max_depth(max_depth)
        .include_files(settings.include_files && !args.no_files)
        .include_hidden(settings.include_hidden && !args.no_hidden)
        .ignore_patterns(ignore_patterns)
        .build()
        .context("Invalid scan options")?;

    let scanner = TreeScanner::new();
    let quiet = args.quiet;
    let output = scanner
        .scan_with_progress(&config, |progress| {
            if !quiet {
                print_scan_progress(progress);
            }
        })
        .context("Scan failed")?;
    if !quiet {
        eprintln!();
    }

    match args.output {
        Some(path) => {
            let path = with_default_extension(path);
            std::fs::write(&path, &output.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Tree saved to {}", path.display());
        }
        None => print!("{}", output.text),
    }

    if output.has_warnings() {
        for warning in &output.warnings {
            eprintln!("warning: {warning}");
        }
    }
    eprintln!(
        "{} items ({}), {} errors, {:.2}s",
        output.item_count,
        output.stats,
        output.error_count,
        output.scan_duration.as_secs_f64()
    );

    Ok(())
}

fn print_scan_progress(progress: &ScanProgress) {
    if progress.processed % PROGRESS_EVERY != 0 && !progress.is_complete() {
        return;
    }
    eprint!(
        "\rScanning {:>5.1}% ({}/{})",
        progress.percentage(),
        progress.processed,
        progress.total
    );
    let _ = io::stderr().flush();
}

/// Add `.txt` to paths without an extension.
fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("txt");
    }
    path
}

/// Print the items a diagram resolves to.
fn run_parse(tree: &str, format: OutputFormat) -> Result<()> {
    let diagram = load_diagram(tree)?;

    match format {
        OutputFormat::Text => {
            for item in &diagram.items {
                println!("{item}");
            }
            report_skipped(&diagram);
            eprintln!(
                "{} folders, {} files",
                diagram.dir_count(),
                diagram.file_count()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&diagram)?);
        }
    }

    Ok(())
}

/// Create a diagram's folders and files under `base`.
fn run_create(tree: &str, base: PathBuf, format: OutputFormat) -> Result<()> {
    let diagram = load_diagram(tree)?;
    report_skipped(&diagram);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let report = runtime.block_on(create_with_progress(diagram, base))?;

    match format {
        OutputFormat::Text => {
            println!("{}", report.summary());
            for message in report.error_messages() {
                println!("  failed: {message}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

async fn create_with_progress(diagram: Diagram, base: PathBuf) -> Result<MaterializeReport> {
    let mut rx = start_materialize(diagram.items, base);

    while let Some(msg) = rx.recv().await {
        match msg {
            MaterializeResult::Progress(progress) => {
                eprint!(
                    "\rCreating {:>5.1}% ({}/{})",
                    progress.percentage(),
                    progress.items_completed,
                    progress.items_total
                );
                let _ = io::stderr().flush();
            }
            MaterializeResult::Complete(result) => {
                eprintln!();
                return result.context("Create failed");
            }
        }
    }

    Err(eyre!("Create task ended without a result"))
}

/// Count folders and files with a parallel walk.
fn run_stats(path: &Path, threads: usize) -> Result<()> {
    let counted = folder_stats(path, threads).context("Counting failed")?;

    println!("{}: {}", counted.root_path.display(), counted.stats);
    if !counted.warnings.is_empty() {
        eprintln!("{} entries could not be read", counted.warnings.len());
    }

    Ok(())
}

/// Read and parse a diagram from a file, or stdin for `-`.
fn load_diagram(source: &str) -> Result<Diagram> {
    let text = if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read diagram from stdin")?;
        text
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read diagram from {source}"))?
    };

    parse_diagram(&text).context("Invalid diagram")
}

fn report_skipped(diagram: &Diagram) {
    for line in &diagram.skipped {
        eprintln!("skipped line {}: {:?} ({:?})", line.line_no, line.text, line.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("out/tree")),
            PathBuf::from("out/tree.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("tree.md")),
            PathBuf::from("tree.md")
        );
    }

    #[test]
    fn test_load_diagram_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("tree.txt");
        std::fs::write(&file, "proj/\n└── a.txt\n").unwrap();

        let diagram = load_diagram(file.to_str().unwrap()).unwrap();
        assert_eq!(diagram.items.len(), 2);
        assert_eq!(diagram.file_count(), 1);
    }

    #[test]
    fn test_cli_parses_scan_flags() {
        let cli = Cli::try_parse_from([
            "ftree", "-v", "scan", "src", "-d", "2", "-i", "target", "--no-files",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.depth, Some(2));
                assert_eq!(args.ignore, vec!["target"]);
                assert!(args.no_files);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_cli_rejects_depth_with_all() {
        assert!(Cli::try_parse_from(["ftree", "scan", "-d", "2", "--all"]).is_err());
    }
}
