use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, DEFAULT_PROMISE_SENTINEL, PACKAGE_JSON_FILENAME};

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section.
    pub reactlint: ReactLintConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during loading, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
/// Rule selection and tuning.
pub struct ReactLintConfig {
    /// Allow-list of rule ids. `None` enables every rule.
    pub rules: Option<Vec<String>>,
    /// Rule ids to disable.
    pub ignore: Option<Vec<String>>,
    /// Constructor name flagged by `favor-async-to-new-promises`.
    pub promise_sentinel: Option<String>,
    /// List of folders to exclude, on top of the defaults.
    pub exclude_folders: Option<Vec<String>>,
}

impl ReactLintConfig {
    /// Constructor name the async rule looks for.
    #[must_use]
    pub fn promise_sentinel(&self) -> &str {
        self.promise_sentinel
            .as_deref()
            .unwrap_or(DEFAULT_PROMISE_SENTINEL)
    }

    /// Whether a rule id survives the allow-list and the ignore list.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        let allowed = self
            .rules
            .as_ref()
            .is_none_or(|rules| rules.iter().any(|r| r == id));
        let ignored = self
            .ignore
            .as_ref()
            .is_some_and(|ignore| ignore.iter().any(|r| r == id));
        allowed && !ignored
    }
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    reactlint: Option<ReactLintConfig>,
}

impl Config {
    /// Loads configuration from default locations (.reactlint.toml or package.json in current dir).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Unreadable or invalid files are skipped with a warning; the first
    /// usable file wins.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let toml_path = current.join(CONFIG_FILENAME);
            if toml_path.exists() {
                match Self::load_from_file(&toml_path) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("ignoring {}: {e:#}", toml_path.display()),
                }
            }

            // 2. Try PACKAGE_JSON_FILENAME
            let package_json = current.join(PACKAGE_JSON_FILENAME);
            if package_json.exists() {
                match Self::load_package_json(&package_json) {
                    Ok(Some(config)) => return config,
                    Ok(None) => {}
                    Err(e) => log::warn!("ignoring {}: {e:#}", package_json.display()),
                }
            }

            if !current.pop() {
                break;
            }
        }

        log::debug!("no configuration found, using defaults");
        Config::default()
    }

    /// Loads an explicit TOML configuration file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid configuration
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        config.config_file_path = Some(path.to_path_buf());
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    fn load_package_json(path: &Path) -> Result<Option<Self>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manifest: PackageJson = serde_json::from_str(&content)
            .with_context(|| format!("invalid package manifest {}", path.display()))?;
        Ok(manifest.reactlint.map(|reactlint| Config {
            reactlint,
            config_file_path: Some(path.to_path_buf()),
        }))
    }
}
