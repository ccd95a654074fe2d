//! Console output for check and fix results

use clap::ValueEnum;
use cljline_core::Violation;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Output format for diagnostics
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

/// Violations found in one file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Print check results in the requested format
pub fn print_check_results(reports: &[FileReport], limit: usize, format: OutputFormat) {
    match format {
        OutputFormat::Human => print_human(reports, limit),
        OutputFormat::Json => print_json(reports, limit),
    }
}

fn print_human(reports: &[FileReport], limit: usize) {
    let mut total = 0usize;
    for report in reports {
        for violation in &report.violations {
            total += 1;
            println!(
                "{}:{}: {} ({} > {})",
                report.path.display(),
                violation.line,
                "line too long".yellow(),
                violation.length,
                limit
            );
        }
    }

    let files_checked = reports.len();
    if total == 0 {
        println!(
            "{} {} files checked, no violations",
            "OK".green().bold(),
            files_checked
        );
    } else {
        let dirty = reports.iter().filter(|r| !r.is_clean()).count();
        println!(
            "{} {} violations in {} of {} files",
            "FAIL".red().bold(),
            total,
            dirty,
            files_checked
        );
    }
}

fn print_json(reports: &[FileReport], limit: usize) {
    let payload = json!({
        "limit": limit,
        "files": reports
            .iter()
            .map(|r| {
                json!({
                    "file": r.path.display().to_string(),
                    "violations": &r.violations,
                })
            })
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
}

/// Print the summary line after a fix run
pub fn print_fix_summary(changed: usize, total: usize) {
    if changed == 0 {
        println!("{} {} files already fit", "OK".green().bold(), total);
    } else {
        println!(
            "{} reformatted {} of {} files",
            "FIXED".green().bold(),
            changed,
            total
        );
    }
}

/// Header printed before each file in stdout mode when more than one file is
/// processed; a comment so concatenated output stays readable Clojure.
pub fn print_stdout_header(path: &std::path::Path) {
    println!(";; {}", path.display());
}
