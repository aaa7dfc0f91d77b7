//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// goscan - Go source tree scanner
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "goscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse every Go file under a directory and map declarations to their comments")]
#[command(long_about = "goscan walks a directory tree, parses every Go source file it finds, \
groups the files by containing directory, and reports the doc and line comments attached to each \
function, method, const, var and type declaration. Test files, vendor directories and hidden \
directories are skipped.")]
#[command(after_help = "EXAMPLES:

    # Scan the current directory
    goscan

    # Scan a module, skipping a generated package
    goscan --path ./mymodule --exclude internal/gen

    # JSON report written to a file
    goscan --output json --output-file report.json

    # One CSV row per comment
    goscan --output csv

    # Parse only, without comment association
    goscan --no-comments

    # Report broken files and carry on
    goscan --keep-going

    # Create a default .goscan.toml
    goscan --init
")]
pub struct Args {
    /// Directory to scan
    #[arg(short, long, value_name = "PATH", help = "Directory to scan (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Directories to skip, relative to the scan root
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Directory to skip, as a path relative to the scan root with forward slashes (exact match, can be repeated)"
    )]
    pub exclude: Vec<String>,

    /// Skip comment association
    #[arg(long, help = "Parse files without building the declaration to comments mapping")]
    pub no_comments: bool,

    /// Keep scanning after per-file errors
    #[arg(long, help = "Record unparsable or unreadable files in the report instead of stopping at the first one")]
    pub keep_going: bool,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links during directory traversal (link cycles are skipped with a warning)")]
    pub follow_links: bool,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format: 'text' for a readable tree, 'json' for the full report, 'csv' for one row per comment [default: text]")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .goscan.toml if present)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.goscan.toml) in the current directory")]
    pub init: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show results)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show debug logging and the effective settings")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable the progress spinner
    #[arg(long, help = "Disable the progress spinner (useful for CI or when redirecting output)")]
    pub no_progress: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per comment
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
