use crate::cli::Cli;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::error::LintError;
use crate::linter::{FixOutcome, Linter};
use crate::output;
use crate::report::{FileError, FileReport, Finding, FixedFile, LintReport};
use crate::rules::RuleRegistry;
use crate::tree::Dialect;
use crate::types::{TypeFactsIndex, TypeOracle};
use crate::utils::{
    collect_source_files_gitignore, get_ignored_lines, normalize_display_path, LineIndex,
};
use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Exit code when no problems remain.
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when diagnostics remain or a file could not be processed.
pub const EXIT_PROBLEMS: i32 = 1;
/// Exit code for configuration and usage errors.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// What to do with fixes for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixMode {
    Report,
    DryRun,
    Write,
}

impl FixMode {
    fn from_cli(cli: &Cli) -> Self {
        match (cli.fix.fix, cli.fix.dry_run) {
            (false, _) => Self::Report,
            (true, true) => Self::DryRun,
            (true, false) => Self::Write,
        }
    }
}

/// Runs the linter with the given arguments.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run reactlint with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["reactlint".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(EXIT_CLEAN);
            }
            _ => {
                eprint!("{e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        },
    };

    init_logging(cli_var.output.verbose);

    if cli_var.list_rules {
        let metadata = RuleRegistry::all(&Config::default()).metadata();
        if cli_var.output.json {
            writeln!(writer, "{}", serde_json::to_string_pretty(&metadata)?)?;
        } else {
            output::print_rule_list(writer, &metadata)?;
        }
        return Ok(EXIT_CLEAN);
    }

    let config = match load_config(&cli_var) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(EXIT_CONFIG_ERROR);
        }
    };
    if let Some(path) = &config.config_file_path {
        log::debug!("using configuration {}", path.display());
    }

    let type_facts = match cli_var.type_facts.as_deref().map(TypeFactsIndex::load) {
        None => None,
        Some(Ok(index)) => Some(index),
        Some(Err(e)) => {
            eprintln!("Error: {e:#}");
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let registry = match build_registry(&cli_var.rules, &config, type_facts.is_some()) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }
    };
    log::debug!("rules: {registry:?}");
    let linter = Linter::new(registry);

    let mut exclude_folders = config.reactlint.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli_var.exclude_folders.iter().cloned());

    let roots = if cli_var.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli_var.paths.clone()
    };
    let mut files = Vec::new();
    for root in &roots {
        if !root.exists() {
            eprintln!(
                "Error: The file or directory '{}' does not exist.",
                root.display()
            );
            return Ok(EXIT_CONFIG_ERROR);
        }
        files.extend(collect_source_files_gitignore(root, &exclude_folders));
    }
    files.sort();
    files.dedup();
    log::debug!(
        "linting {} file(s) on {} thread(s), excluding {exclude_folders:?}",
        files.len(),
        rayon::current_num_threads()
    );

    let mode = FixMode::from_cli(&cli_var);
    let show_progress = !cli_var.output.json && !cli_var.output.quiet;
    let progress = if show_progress {
        output::create_progress_bar(files.len() as u64)
    } else {
        indicatif::ProgressBar::hidden()
    };

    let per_file: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            let report = lint_file(&linter, file, type_facts.as_ref(), mode);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();

    let report = LintReport::from_files(per_file);

    if cli_var.output.json {
        output::print_json(writer, &report)?;
    } else if cli_var.output.quiet {
        output::print_summary(writer, &report)?;
    } else {
        let fix_mode = match mode {
            FixMode::Report => None,
            FixMode::DryRun => Some(true),
            FixMode::Write => Some(false),
        };
        output::print_report(writer, &report, fix_mode)?;
    }
    writer.flush()?;

    Ok(if report.is_clean() {
        EXIT_CLEAN
    } else {
        EXIT_PROBLEMS
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    // A second run in the same process keeps the first logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load_from_file(path);
    }
    let start = cli.paths.first().map_or(Path::new("."), PathBuf::as_path);
    Ok(Config::load_from_path(start))
}

/// Rules for this run.
///
/// `--rules` overrides the configured selection. Type-aware rules are left
/// out when no type facts were given, unless they were asked for by name.
fn build_registry(
    requested: &[String],
    config: &Config,
    has_type_facts: bool,
) -> Result<RuleRegistry, LintError> {
    if !requested.is_empty() {
        let registry = RuleRegistry::all(config).select(requested)?;
        if !has_type_facts {
            if let Some(rule) = registry.iter().find(|rule| rule.requires_type_info()) {
                return Err(LintError::OracleUnavailable { rule: rule.id() });
            }
        }
        return Ok(registry);
    }

    let mut registry = RuleRegistry::from_config(config)?;
    if !has_type_facts {
        registry.retain(|rule| {
            if rule.requires_type_info() {
                log::debug!("skipping {} (no --type-facts)", rule.id());
                return false;
            }
            true
        });
    }
    Ok(registry)
}

fn lint_file(
    linter: &Linter,
    path: &Path,
    type_facts: Option<&TypeFactsIndex>,
    mode: FixMode,
) -> FileReport {
    let display = normalize_display_path(path);
    log::debug!("linting {display}");
    match analyze_file(linter, path, &display, type_facts, mode) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("{display}: {e:#}");
            FileReport {
                error: Some(FileError {
                    file: display,
                    error: format!("{e:#}"),
                }),
                ..FileReport::default()
            }
        }
    }
}

fn analyze_file(
    linter: &Linter,
    path: &Path,
    display: &str,
    type_facts: Option<&TypeFactsIndex>,
    mode: FixMode,
) -> Result<FileReport> {
    let source = std::fs::read_to_string(path).context("failed to read file")?;
    let dialect = Dialect::from_path(path).context("unsupported file extension")?;
    let types = type_facts.map(|facts| facts.oracle_for(path) as &dyn TypeOracle);
    let index = LineIndex::new(&source);

    let diagnostics = linter.lint_source(&source, dialect, types)?;
    let diagnostics = unsuppressed(&source, &index, diagnostics);
    let locate = |diagnostics: Vec<Diagnostic>| -> Vec<Finding> {
        diagnostics
            .into_iter()
            .map(|d| Finding::locate(display, &source, &index, d))
            .collect()
    };

    if mode == FixMode::Report {
        return Ok(FileReport {
            findings: locate(diagnostics),
            ..FileReport::default()
        });
    }

    let outcome = FixOutcome::apply(&source, diagnostics);
    let mut report = FileReport {
        rejected_fix: outcome.rejected.as_ref().map(|e| FileError {
            file: display.to_owned(),
            error: e.to_string(),
        }),
        ..FileReport::default()
    };
    if outcome.is_changed() {
        report.fixed = Some(FixedFile {
            file: display.to_owned(),
            fixes_applied: outcome.fixes_applied(),
        });
    }
    if mode == FixMode::DryRun || !outcome.is_changed() {
        report.findings = locate(outcome.diagnostics);
        return Ok(report);
    }

    std::fs::write(path, outcome.output()).context("failed to write fixed file")?;
    // Unfixed diagnostics keep their positions in the text as it was read
    let remaining = outcome
        .diagnostics
        .into_iter()
        .filter(|d| !d.has_fix())
        .collect();
    report.findings = locate(remaining);
    Ok(report)
}

/// Drop diagnostics silenced by `reactlint-disable-*` comments.
fn unsuppressed(source: &str, index: &LineIndex, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let ignored = get_ignored_lines(source);
    if ignored.is_empty() {
        return diagnostics;
    }
    diagnostics
        .into_iter()
        .filter(|d| {
            let line = index.line_index(d.span.start);
            !ignored
                .get(&line)
                .is_some_and(|suppression| suppression.covers(d.rule_id))
        })
        .collect()
}
