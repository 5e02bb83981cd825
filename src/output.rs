//! CLI output formatting.
//!
//! Each reporting concern has a `format_*` function returning `Vec<String>`
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! Run output:
//!
//! ```text
//! 001 quote 12 [perseverance]
//!     Output: output/images/quote_12_20260807091502_114329_000.jpg
//!     Background: templates/sunset.jpg
//! 002 quote 13
//!     Skipped: empty quote text
//!
//! Rendered 1 of 2 selected, 4 unused quotes remaining
//! ```
//!
//! Every skip names the record id and the stage that rejected it — a quote
//! is never dropped without a message.

use crate::run::{Background, RecordStatus, RunReport};
use crate::stock::Backlog;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn record_header(index: usize, id: u64, topic: Option<&str>) -> String {
    match topic {
        Some(t) if !t.is_empty() => format!("{} quote {} [{}]", format_index(index), id, t),
        _ => format!("{} quote {}", format_index(index), id),
    }
}

fn background_line(background: &Background) -> String {
    match background {
        Background::Template(path) => format!("    Background: {}", path.display()),
        Background::Gradient => "    Background: gradient".to_string(),
        Background::GradientFallback(detail) => {
            format!("    Background: gradient (template unavailable: {detail})")
        }
    }
}

/// Format the outcome of one run.
pub fn format_run_report(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.selected == 0 {
        lines.push("No unused quotes in the backlog.".to_string());
    }

    for (pos, record) in report.records.iter().enumerate() {
        lines.push(record_header(pos + 1, record.id, record.topic.as_deref()));
        match &record.status {
            RecordStatus::Rendered { output, background } => {
                lines.push(format!("    Output: {}", output.display()));
                lines.push(background_line(background));
            }
            RecordStatus::Skipped(reason) => {
                lines.push(format!("    Skipped: {reason}"));
            }
            RecordStatus::UnknownId => {
                lines.push("    Skipped: id not found in backlog at commit time".to_string());
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Rendered {} of {} selected, {} unused quote{} remaining",
        report.rendered(),
        report.selected,
        report.remaining_unused,
        if report.remaining_unused == 1 { "" } else { "s" },
    ));
    if report.low_stock() {
        lines.push(format!(
            "Warning: unused stock below threshold ({} < {}) — refill the backlog",
            report.remaining_unused, report.low_stock_threshold
        ));
    }
    lines
}

pub fn print_run_report(report: &RunReport) {
    for line in format_run_report(report) {
        println!("{line}");
    }
}

/// Format backlog status for the `status` subcommand.
pub fn format_status(backlog: &Backlog) -> Vec<String> {
    let total = backlog.len();
    let remaining = backlog.remaining_unused();
    let mut lines = vec![format!(
        "{} quote{} in backlog, {} unused",
        total,
        if total == 1 { "" } else { "s" },
        remaining
    )];
    match backlog.select_next() {
        Some(next) => lines.push(format!("Next up: quote {}", next.id)),
        None => lines.push("Backlog exhausted.".to_string()),
    }
    lines
}

pub fn print_status(backlog: &Backlog) {
    for line in format_status(backlog) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::{RecordReport, SkipReason};
    use crate::test_helpers::sample_backlog;
    use std::path::PathBuf;

    fn report_with(records: Vec<RecordReport>, selected: usize, remaining: usize) -> RunReport {
        RunReport {
            selected,
            records,
            remaining_unused: remaining,
            low_stock_threshold: 5,
        }
    }

    #[test]
    fn rendered_record_shows_output_and_background() {
        let report = report_with(
            vec![RecordReport {
                id: 12,
                topic: Some("perseverance".to_string()),
                status: RecordStatus::Rendered {
                    output: PathBuf::from("out/quote_12.jpg"),
                    background: Background::Template(PathBuf::from("templates/sunset.jpg")),
                },
            }],
            1,
            7,
        );
        let lines = format_run_report(&report);
        assert_eq!(lines[0], "001 quote 12 [perseverance]");
        assert_eq!(lines[1], "    Output: out/quote_12.jpg");
        assert_eq!(lines[2], "    Background: templates/sunset.jpg");
        assert!(lines.last().unwrap().contains("Rendered 1 of 1"));
    }

    #[test]
    fn skipped_record_names_the_reason() {
        let report = report_with(
            vec![RecordReport {
                id: 2,
                topic: None,
                status: RecordStatus::Skipped(SkipReason::EmptyQuoteText),
            }],
            1,
            7,
        );
        let lines = format_run_report(&report);
        assert_eq!(lines[0], "001 quote 2");
        assert!(lines[1].contains("empty quote text"));
    }

    #[test]
    fn low_stock_adds_warning() {
        let report = report_with(Vec::new(), 0, 2);
        let lines = format_run_report(&report);
        assert!(lines.iter().any(|l| l.starts_with("Warning:")));
    }

    #[test]
    fn healthy_stock_has_no_warning() {
        let report = report_with(Vec::new(), 0, 9);
        let lines = format_run_report(&report);
        assert!(!lines.iter().any(|l| l.starts_with("Warning:")));
    }

    #[test]
    fn empty_selection_reports_exhaustion() {
        let report = report_with(Vec::new(), 0, 0);
        let lines = format_run_report(&report);
        assert_eq!(lines[0], "No unused quotes in the backlog.");
    }

    #[test]
    fn status_counts_and_next() {
        let backlog = sample_backlog();
        let lines = format_status(&backlog);
        assert_eq!(lines[0], "3 quotes in backlog, 3 unused");
        assert_eq!(lines[1], "Next up: quote 1");
    }
}
