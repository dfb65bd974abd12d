//! Report formatting and printing utilities.
//!
//! Changes are displayed in cargo-style format. Every printer has a `_to`
//! variant taking a writer so output can be tested.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::{
    core::{
        pipeline::{ExtractReport, FileResult, GroupStats},
        rewrite::{LOCALIZATION_USING, LineChange},
    },
    utils::plural,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Path as shown to the user, without a leading `./`.
pub fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print every pending change of a dry run.
pub fn print_preview(files: &[FileResult]) {
    print_preview_to(files, &mut io::stdout().lock());
}

pub fn print_preview_to<W: Write>(files: &[FileResult], writer: &mut W) {
    for file in files {
        let path = display_path(&file.path);
        for change in &file.rewrite.changes {
            print_change(&path, change, writer);
        }
        if file.rewrite.using_inserted {
            let _ = writeln!(
                writer,
                "  {} {}: {} {}",
                "-->".blue(),
                path,
                "+".green().bold(),
                LOCALIZATION_USING.green()
            );
            let _ = writeln!(writer);
        }
    }
}

fn print_change<W: Write>(path: &str, change: &LineChange, writer: &mut W) {
    let prefix = change.before.get(..change.offset).unwrap_or(&change.before);
    let col = prefix.chars().count() + 1;

    // Clickable location: --> path:line:col
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        path,
        change.line,
        col
    );
    let _ = writeln!(writer, "     {}", "|".blue());
    let _ = writeln!(
        writer,
        " {:>3} {} {}",
        change.line.to_string().blue(),
        "-".red().bold(),
        change.before
    );

    let caret_padding = UnicodeWidthStr::width(prefix);
    let _ = writeln!(
        writer,
        "     {} {:>padding$}{}",
        "|".blue(),
        "",
        "^".red(),
        padding = caret_padding
    );
    let _ = writeln!(
        writer,
        " {:>3} {} {}",
        change.line.to_string().blue(),
        "+".green().bold(),
        change.after.green()
    );
    let _ = writeln!(writer);
}

/// List the files a run touched (verbose mode).
pub fn print_updated_files(files: &[FileResult], apply: bool) {
    print_updated_files_to(files, apply, &mut io::stdout().lock());
}

pub fn print_updated_files_to<W: Write>(files: &[FileResult], apply: bool, writer: &mut W) {
    let verb = if apply { "Updated" } else { "Would update" };
    for file in files {
        let _ = write!(
            writer,
            "{} {} ({})",
            verb,
            display_path(&file.path),
            plural(file.rewrite.changes.len(), "line", "lines")
        );
        if file.backup_created {
            let _ = write!(writer, ", backup created");
        }
        let _ = writeln!(writer);
    }
}

/// Print per-group counts and the closing status line of an extract run.
pub fn print_extract_summary(report: &ExtractReport, apply: bool) {
    print_extract_summary_to(report, apply, &mut io::stdout().lock());
}

pub fn print_extract_summary_to<W: Write>(report: &ExtractReport, apply: bool, writer: &mut W) {
    let _ = writeln!(writer, "{}", group_line("C# files", &report.code));
    let _ = writeln!(writer, "{}", group_line("cfg files", &report.cfg));
    if report.seeded > 0 {
        let _ = writeln!(
            writer,
            "Reused {} from the existing catalog",
            plural(report.seeded, "key", "keys")
        );
    }

    let file_count = report.files.len();
    let new_keys = report.registry.created_count();

    if file_count == 0 {
        let checked = report.code.scanned + report.cfg.scanned;
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} - nothing to localize",
                plural(checked, "file", "files")
            )
            .green()
        );
    } else if apply {
        let _ = writeln!(
            writer,
            "{} {} with {}.",
            "Updated".green().bold(),
            plural(file_count, "file", "files"),
            plural(new_keys, "new key", "new keys")
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} with {}.",
            "Would update".yellow().bold(),
            plural(file_count, "file", "files"),
            plural(new_keys, "new key", "new keys")
        );
        let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
    }

    if !report.catalog_files.is_empty() {
        let names: Vec<String> = report
            .catalog_files
            .iter()
            .map(|p| display_path(p))
            .collect();
        let _ = writeln!(
            writer,
            "{} Wrote catalog ({}): {}",
            SUCCESS_MARK.green(),
            plural(report.registry.len(), "key", "keys"),
            names.join(", ")
        );
    }
}

fn group_line(name: &str, stats: &GroupStats) -> String {
    format!(
        "{}: {} scanned, {} modified, {}",
        name,
        stats.scanned,
        stats.modified,
        plural(stats.new_keys, "new key", "new keys")
    )
}

/// Print a warning about paths that could not be read.
pub fn print_skipped_warning(count: usize, verbose: bool) {
    print_skipped_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} skipped due to access errors{}",
            "warning:".bold().yellow(),
            plural(count, "path", "paths"),
            if verbose { "" } else { " (use -v for details)" }
        );
    }
}
