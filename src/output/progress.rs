//! Progress reporting functionality
//!
//! A spinner on stderr that shows the file being parsed. The total number of
//! files is not known up front, so there is no bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter for a running scan
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    spinner: Option<ProgressBar>,
    files_seen: usize,
}

impl ProgressReporter {
    /// Create a new progress reporter; `enabled` false or `quiet` hides the spinner
    pub fn new(enabled: bool, quiet: bool, verbose: bool) -> Self {
        let spinner = (enabled && !quiet).then(|| {
            let spinner = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} files {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            spinner
        });

        Self {
            quiet,
            verbose,
            spinner,
            files_seen: 0,
        }
    }

    /// Start spinning with an initial message
    pub fn start(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(message.to_string());
            spinner.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Record that `path` is about to be parsed
    pub fn file(&mut self, path: &Path) {
        self.files_seen += 1;
        if let Some(spinner) = &self.spinner {
            spinner.inc(1);
            spinner.set_message(path.display().to_string());
        }
    }

    /// Stop the spinner and leave a final message
    pub fn finish(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_with_message(message.to_string());
        } else if self.verbose {
            eprintln!("{}", message);
        }
    }

    /// Clear the spinner without a message, e.g. after an error
    pub fn abandon(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }

    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    /// Print a message (respects quiet mode)
    pub fn print(&self, message: &str) {
        if !self.quiet {
            self.print_stderr(message);
        }
    }

    /// Print a verbose message (only in verbose mode)
    pub fn print_verbose(&self, message: &str) {
        if self.verbose {
            self.print_stderr(message);
        }
    }

    fn print_stderr(&self, message: &str) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
