//! Output formatting functionality
//!
//! This module renders a [`ScanReport`] as text, JSON or CSV.

use crate::error::{Result, ScanError};
use crate::models::comment::CommentAssociation;
use crate::models::package::{Package, ScanReport};
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;

/// Header row of the CSV report
pub const CSV_HEADER: [&str; 7] = [
    "Package Dir",
    "Package Name",
    "File",
    "Declaration",
    "Line",
    "Column",
    "Comment",
];

/// Label used for comments that belong to no named declaration
const UNASSOCIATED_LABEL: &str = "(unassociated)";

/// Format one package as text
pub fn format_package_text(dir: &str, package: &Package, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let header = format!("package {}", package.name);
    if use_colors {
        output.push_str(&format!(
            "{} {}\n",
            Blue.bold().paint(header),
            Style::new().dimmed().paint(format!("({})", dir))
        ));
    } else {
        output.push_str(&format!("{} ({})\n", header, dir));
    }

    for file in package.files.values() {
        if use_colors {
            output.push_str(&format!("  {}\n", Cyan.paint(file.file_name())));
        } else {
            output.push_str(&format!("  {}\n", file.file_name()));
        }

        if let Some(comments) = &file.comments {
            output.push_str(&format_comments_text(comments, use_colors, verbose));
        }
    }

    output.push('\n');
    output
}

fn format_comments_text(comments: &CommentAssociation, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    for (key, tokens) in comments.declarations() {
        let count = format!("{} comment{}", tokens.len(), if tokens.len() == 1 { "" } else { "s" });
        if use_colors {
            output.push_str(&format!("    {} {}\n", Green.paint(key), Style::new().dimmed().paint(count)));
        } else {
            output.push_str(&format!("    {} [{}]\n", key, count));
        }

        if verbose {
            for token in tokens {
                for line in token.text.lines() {
                    output.push_str(&format!("      {}\n", line));
                }
            }
        }
    }

    let loose = comments.unassociated();
    if verbose && !loose.is_empty() {
        output.push_str(&format!("    {} [{}]\n", UNASSOCIATED_LABEL, loose.len()));
    }

    output
}

/// Format a whole report as text
pub fn format_report_text(report: &ScanReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Go Package Scan")));
    } else {
        output.push_str("Go Package Scan\n\n");
    }

    if report.packages.is_empty() {
        output.push_str("No Go packages found.\n\n");
    }

    for (dir, package) in report.packages.iter() {
        output.push_str(&format_package_text(dir, package, use_colors, verbose));
    }

    if report.has_errors() {
        if use_colors {
            output.push_str(&format!("{}\n", Red.bold().paint("Errors")));
        } else {
            output.push_str("Errors\n");
        }
        for error in &report.errors {
            let line = format!("  [{}] {}", error.severity, error.error);
            if use_colors {
                output.push_str(&format!("{}\n", Yellow.paint(line)));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }
        output.push('\n');
    }

    output.push_str(&format_summary_line(report));
    output
}

/// One-line summary used by text output and quiet mode
pub fn format_summary_line(report: &ScanReport) -> String {
    let summary = &report.summary;
    let mut line = format!(
        "Packages: {}, Files: {}, Skipped: {}, Errors: {}",
        report.packages.len(),
        report.packages.file_count(),
        summary.files_skipped,
        summary.errors_encountered
    );
    if summary.duplicates_ignored > 0 {
        line.push_str(&format!(", Duplicates: {}", summary.duplicates_ignored));
    }
    line.push_str(&format!(" ({})\n", format_duration(summary.scan_duration)));
    line
}

fn format_duration(duration: std::time::Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Format a report as JSON
pub fn format_report_json(report: &ScanReport, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };

    rendered.map_err(|e| ScanError::JsonSerialize {
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })
}

/// Format a report as CSV, one row per comment
pub fn format_report_csv(report: &ScanReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(CSV_HEADER)?;

    for (dir, package) in report.packages.iter() {
        for file in package.files.values() {
            let Some(comments) = &file.comments else {
                continue;
            };
            let path = file.path.display().to_string();

            for key in comments.keys() {
                for token in comments.get(key).unwrap_or(&[]) {
                    let line = token.position.line.to_string();
                    let column = token.position.column.to_string();
                    writer.write_record([
                        dir,
                        package.name.as_str(),
                        path.as_str(),
                        key,
                        line.as_str(),
                        column.as_str(),
                        token.text.as_str(),
                    ])?;
                }
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScanError::io_error(e.into_error()))?;

    Ok(String::from_utf8(bytes)?)
}
