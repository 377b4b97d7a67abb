use crate::report::{FileError, Finding, LintReport};
use crate::rules::RuleMetadata;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("linting...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn category_color(category: &str) -> Color {
    match category {
        crate::rules::CAT_FUNCTIONALITY => Color::Red,
        crate::rules::CAT_MAINTAINABILITY => Color::Yellow,
        _ => Color::Blue,
    }
}

/// Print the available rules as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_rule_list(writer: &mut impl Write, rules: &[RuleMetadata]) -> std::io::Result<()> {
    let mut table = create_table(vec!["Rule ID", "Category", "Type Info", "Fix", "Description"]);
    for meta in rules {
        table.add_row(vec![
            Cell::new(meta.id).add_attribute(Attribute::Bold),
            Cell::new(meta.category).fg(category_color(meta.category)),
            Cell::new(if meta.requires_type_info { "yes" } else { "no" }),
            Cell::new(if meta.produces_fix { "yes" } else { "no" }),
            Cell::new(meta.description),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print findings one per line as `path:line:col  rule-id  message`.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(writer: &mut impl Write, findings: &[Finding]) -> std::io::Result<()> {
    for f in findings {
        let location = format!("{}:{}:{}", f.file, f.line, f.column);
        let marker = if f.is_fixable() {
            format!("  {}", "[fixable]".green())
        } else {
            String::new()
        };
        writeln!(
            writer,
            "{}  {}  {}{}",
            location.bold(),
            f.diagnostic.rule_id.dimmed(),
            f.diagnostic.message,
            marker
        )?;
    }
    Ok(())
}

/// Print files that could not be processed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_errors(
    writer: &mut impl Write,
    title: &str,
    errors: &[FileError],
) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n{}", title.bold().underline().red())?;
    for e in errors {
        writeln!(writer, "  {}: {}", e.file.bold(), e.error.red())?;
    }
    Ok(())
}

/// Print the files changed (or that would be changed) by fixes.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_fix_results(
    writer: &mut impl Write,
    report: &LintReport,
    dry_run: bool,
) -> std::io::Result<()> {
    let verb = if dry_run { "Would fix" } else { "Fixed" };
    for fixed in &report.fixed_files {
        writeln!(
            writer,
            "{} {} ({} fix(es))",
            verb.green().bold(),
            fixed.file,
            fixed.fixes_applied
        )?;
    }
    print_errors(writer, "Rejected Fixes", &report.rejected_fixes)
}

/// Print the closing summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(writer: &mut impl Write, report: &LintReport) -> std::io::Result<()> {
    let analyzed = format!("Analyzed {} file(s)", report.files_analyzed);
    if report.is_clean() {
        writeln!(
            writer,
            "\n{}  {}",
            analyzed.dimmed(),
            "✓ All clean! No problems found.".green()
        )?;
        return Ok(());
    }

    let problems = format!("{} problem(s)", report.findings.len());
    let fixable = format!("{} fixable with --fix", report.fixable_count());
    let mut line = format!("{}  {}", analyzed.dimmed(), problems.red().bold());
    if report.fixable_count() > 0 {
        line.push_str(&format!(" ({})", fixable.yellow()));
    }
    if !report.errors.is_empty() {
        let failed = format!("{} file(s) failed", report.errors.len());
        line.push_str(&format!("  {}", failed.red()));
    }
    writeln!(writer, "\n{line}")?;
    Ok(())
}

/// Print the full human-readable report.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report(
    writer: &mut impl Write,
    report: &LintReport,
    fix_mode: Option<bool>,
) -> std::io::Result<()> {
    print_findings(writer, &report.findings)?;
    print_errors(writer, "Errors", &report.errors)?;
    if let Some(dry_run) = fix_mode {
        print_fix_results(writer, report, dry_run)?;
    }
    print_summary(writer, report)
}

/// Serialise the report as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialisation or writing fails.
pub fn print_json(writer: &mut impl Write, report: &LintReport) -> anyhow::Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
