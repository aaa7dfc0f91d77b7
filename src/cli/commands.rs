//! Command implementations

use super::Args;
use crate::config::{self, file::DEFAULT_CONFIG_FILE, CliArgs};
use crate::core::Walker;
use crate::error::{ErrorSeverity, Result, ScanError};
use crate::models::config::Settings;
use crate::models::package::ScanReport;
use crate::output::{create_formatter, create_writer, ProgressReporter};
use std::path::PathBuf;
use tracing::debug;

/// Exit code for a scan that finished without errors
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a failed scan, or a keep-going scan that recorded errors
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for configuration and output errors
pub const EXIT_CRITICAL: i32 = 2;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Scan the configured directory and print the report
    Scan(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Scan(args)
    }

    /// Execute the command, returning the exit code on success
    pub fn execute(&self) -> Result<i32> {
        match self {
            Command::Init => {
                init_config(PathBuf::from(DEFAULT_CONFIG_FILE))?;
                Ok(EXIT_SUCCESS)
            }
            Command::Scan(args) => {
                self.validate()?;

                let settings = config::load_config(CliArgs::from(args))?;
                debug!(?settings, "effective settings");

                let report = run_scan(&settings)?;
                write_report(&settings, &report)?;

                if report.has_errors() {
                    Ok(EXIT_FAILURE)
                } else {
                    Ok(EXIT_SUCCESS)
                }
            }
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Scan(args) => {
                if let Some(path) = &args.path {
                    if !path.exists() {
                        return Err(ScanError::invalid_path(path));
                    }
                }

                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(ScanError::ConfigNotFound {
                            path: config_path.clone(),
                            #[cfg(not(tarpaulin_include))]
                            backtrace: std::backtrace::Backtrace::capture(),
                        });
                    }
                }

                Ok(())
            }
            Command::Init => Ok(()),
        }
    }

    /// Run the command and turn errors into an exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                if let Some(hint) = suggestion(&err) {
                    eprintln!("Suggestion: {}", hint);
                }
                exit_code(&err)
            }
        }
    }
}

/// Exit code for a failed command
pub fn exit_code(err: &ScanError) -> i32 {
    match err.severity() {
        ErrorSeverity::Critical => EXIT_CRITICAL,
        ErrorSeverity::Warning | ErrorSeverity::Error => EXIT_FAILURE,
    }
}

fn suggestion(err: &ScanError) -> Option<&'static str> {
    match err {
        ScanError::InvalidPath { .. } => Some("Check that the path exists and is a directory"),
        ScanError::ConfigNotFound { .. } => Some("Run `goscan --init` to create .goscan.toml or pass --config"),
        ScanError::PermissionDenied { .. } => Some("Check file permissions"),
        ScanError::OutputDirectoryNotFound { .. } => Some("Create the output directory first or choose another path"),
        ScanError::Syntax { .. } => Some("Fix the file, exclude its directory, or rerun with --keep-going"),
        _ => None,
    }
}

/// Write the default configuration to `path` unless a file is already there
fn init_config(path: PathBuf) -> Result<()> {
    if path.exists() {
        println!("Configuration file already exists at: {}", path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    config::create_default_config(&path)?;

    println!("Created default configuration file at: {}", path.display());
    println!("Uncomment and edit the settings you want to change.");
    Ok(())
}

/// Scan with a progress spinner
fn run_scan(settings: &Settings) -> Result<ScanReport> {
    let mut progress = ProgressReporter::new(settings.show_progress, settings.quiet, settings.verbose);
    progress.print_verbose(&format!("Scanning {}", settings.scan_path.display()));
    progress.start(&format!("Scanning {}", settings.scan_path.display()));

    let walker = Walker::new(settings.clone());
    match walker.scan_with_progress(|path| progress.file(path)) {
        Ok(report) => {
            progress.finish(&format!(
                "Parsed {} files in {} packages",
                report.packages.file_count(),
                report.packages.len()
            ));
            Ok(report)
        }
        Err(err) => {
            progress.abandon();
            Err(err)
        }
    }
}

fn write_report(settings: &Settings, report: &ScanReport) -> Result<()> {
    // No colors in files
    let use_colors = settings.use_colors && settings.output_file.is_none();
    let formatter = create_formatter(settings.output_format, use_colors, settings.verbose, settings.quiet);
    let content = formatter.format(report)?;

    create_writer(settings.output_file.as_ref()).write(&content)
}
