use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.reactlint.toml):
  Create this file in your project root to set defaults.
  A \"reactlint\" key in package.json is read as well.

  [reactlint]
  rules = [\"sort-interfaces\"]            # Allow-list (default: every rule)
  ignore = [\"react-dont-mutate-state\"]   # Rules to disable
  promise_sentinel = \"Promise\"           # Constructor flagged by favor-async-to-new-promises
  exclude_folders = [\"generated\"]        # On top of node_modules, dist, build, ...

SUPPRESSION COMMENTS:
  // reactlint-disable-line [rule-id, ...]
  // reactlint-disable-next-line [rule-id, ...]
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being analyzed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: print only the summary line.
    #[arg(long, conflicts_with = "json")]
    pub quiet: bool,
}

/// Options controlling automatic fixes.
#[derive(Args, Debug, Default, Clone)]
pub struct FixOptions {
    /// Apply the fixes proposed by fix-producing rules in place.
    #[arg(long)]
    pub fix: bool,

    /// With --fix, report what would change without writing files.
    #[arg(long, requires = "fix")]
    pub dry_run: bool,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    name = "reactlint",
    author,
    version,
    about = "reactlint - rule-based linter for TypeScript and React sources, with autofix",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Paths to analyze (files or directories).
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Configuration file to use instead of searching for one.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated rule ids to run (overrides the configured selection).
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// JSON file of pre-computed type facts, required by type-aware rules.
    /// Offsets are UTF-8 bytes unless the file names an "encoding"
    /// ("utf16" or "codepoint").
    #[arg(long)]
    pub type_facts: Option<PathBuf>,

    /// Folders to exclude from analysis.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// List the available rules and exit.
    #[arg(long)]
    pub list_rules: bool,

    /// Fix options.
    #[command(flatten)]
    pub fix: FixOptions,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}
