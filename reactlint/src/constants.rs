use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the dedicated configuration file.
pub const CONFIG_FILENAME: &str = ".reactlint.toml";

/// Name of the npm manifest, which may carry a `"reactlint"` section.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";

/// Constructor name flagged by the async rule unless configured otherwise.
pub const DEFAULT_PROMISE_SENTINEL: &str = "Promise";

/// File extensions the host analyses.
pub const SOURCE_EXTENSIONS: [&str; 8] = ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Regex for `reactlint-disable-line` and `reactlint-disable-next-line`
/// comments.
///
/// Group 1 is the directive, group 2 the (possibly empty) list of rule ids.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_suppression_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"reactlint-disable-(next-line|line)\b((?:[\s,]+[A-Za-z0-9_-]+)*)")
            .expect("Invalid suppression regex pattern")
    })
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("node_modules");
        s.insert(".git");
        s.insert("dist");
        s.insert("build");
        s.insert("coverage");
        s.insert(".next");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_suppression_re as SUPPRESSION_RE;
