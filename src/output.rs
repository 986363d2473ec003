//! CLI output formatting.
//!
//! Each piece of output has a `format_*` function returning plain lines, for
//! testability, and a `print_*` wrapper that writes them. Format functions are
//! pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ```text
//! ==> Extracting /Volumes/Backup/iPhoto Library → out
//! Not found: Masters/2009/IMG_0001.JPG        (verbose only)
//! Albums → out/albums.txt
//!     12 written
//!     4 built-in skipped
//! Photos
//!     1840 of 2113 copied
//!     273 not found
//! Captions
//!     96 index files
//! ==> Extraction complete: out
//! ```
//!
//! Warnings about catalog collisions go to stderr so they stay visible when
//! stdout is redirected.

use std::path::Path;

use crate::extract::ExtractReport;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a count: `1 file`, `2 files`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

pub fn format_not_found(rel_path: &str) -> String {
    format!("Not found: {rel_path}")
}

/// Print a verbose-mode line for an image whose file is missing.
pub fn print_not_found(rel_path: &str) {
    println!("{}", format_not_found(rel_path));
}

/// Format warnings for last-write-wins collisions in the catalog.
pub fn format_warnings(report: &ExtractReport) -> Vec<String> {
    let albums = report.album_collisions.iter().map(|name| {
        format!("warning: album '{name}' appears more than once; keeping the last one")
    });
    let captions = report.caption_collisions.iter().map(|path| {
        format!("warning: {path} is listed more than once; keeping the last caption")
    });
    albums.chain(captions).collect()
}

pub fn print_warnings(report: &ExtractReport) {
    for line in format_warnings(report) {
        eprintln!("{}", line);
    }
}

/// Format the end-of-run summary.
pub fn format_summary(report: &ExtractReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Albums \u{2192} {}", report.album_index.display()));
    lines.push(format!("{}{} written", indent(1), report.albums_written));
    if report.albums_skipped > 0 {
        lines.push(format!(
            "{}{} built-in skipped",
            indent(1),
            report.albums_skipped
        ));
    }

    lines.push("Photos".to_string());
    lines.push(format!(
        "{}{} of {} copied",
        indent(1),
        report.copied,
        report.images_in_catalog
    ));
    if !report.missing.is_empty() {
        lines.push(format!("{}{} not found", indent(1), report.missing.len()));
    }

    lines.push("Captions".to_string());
    lines.push(format!(
        "{}{}",
        indent(1),
        count(report.caption_indices.len(), "index file", "index files")
    ));

    lines
}

pub fn print_summary(report: &ExtractReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

pub fn format_start(source: &Path, dest: &Path) -> String {
    format!(
        "==> Extracting {} \u{2192} {}",
        source.display(),
        dest.display()
    )
}

pub fn format_complete(dest: &Path) -> String {
    format!("==> Extraction complete: {}", dest.display())
}
