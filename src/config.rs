//! Configuration management for linewrap.
//!
//! This module provides the [`Config`] struct which controls wrapping
//! behavior. Configuration can be loaded from:
//! - TOML files (`linewrap.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories of the
//! current working directory up to the filesystem root, plus the user's home
//! directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::CliArgs;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["linewrap.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Main configuration struct for linewrap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output width in columns; 0 means detect the terminal width (default: 0)
    #[serde(default)]
    pub width: usize,

    /// String emitted at the start of every output line (default: empty)
    #[serde(default)]
    pub prefix: String,

    /// Reflow blank-line-separated paragraphs instead of individual lines (default: false)
    #[serde(default)]
    pub fill: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub width: Option<usize>,
    pub prefix: Option<String>,
    pub fill: Option<bool>,
}

impl Config {
    /// Maximum reasonable output width
    const MAX_WIDTH: usize = 10_000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.width > Self::MAX_WIDTH {
            return Some(format!(
                "width {} exceeds maximum of {}",
                self.width,
                Self::MAX_WIDTH
            ));
        }
        let prefix_columns = self.prefix.chars().count();
        if self.width != 0 && self.width <= prefix_columns {
            return Some(format!(
                "width {} leaves no room after the {prefix_columns}-column prefix",
                self.width
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Build a configuration from auto-discovered config files, applied in
    /// order from least to most specific. Malformed or unreadable files are
    /// skipped with a warning unless `silent` is set.
    #[must_use]
    pub fn from_discovery(silent: bool) -> Self {
        let mut config = Self::default();

        for path in Self::discover_config_files() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(err) => {
                        if !silent {
                            eprintln!("Warning: ignoring malformed {}: {err}", path.display());
                        }
                    }
                },
                Err(err) => {
                    if !silent {
                        eprintln!("Warning: cannot read {}: {err}", path.display());
                    }
                }
            }
        }

        config
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.width {
            self.width = v;
        }
        if let Some(v) = &partial.prefix {
            self.prefix = v.clone();
        }
        if let Some(v) = partial.fill {
            self.fill = v;
        }
    }

    /// Apply CLI arguments on top of file-based settings
    pub fn merge_cli_args(&mut self, args: &CliArgs) {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(prefix) = &args.prefix {
            self.prefix = prefix.clone();
        }
        if args.fill {
            self.fill = true;
        }
    }

    /// Discover config files from the current working directory and home
    ///
    /// Searches from the working directory up to the root, plus the home
    /// directory. Returns config file paths in order of priority (least
    /// specific first).
    #[must_use]
    pub fn discover_config_files() -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        if let Ok(dir) = std::env::current_dir() {
            let mut ancestors: Vec<PathBuf> =
                dir.ancestors().map(std::path::Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let candidate = ancestor.join(config_name);
                    if candidate.is_file() && !config_files.contains(&candidate) {
                        config_files.push(candidate);
                    }
                }
            }
        }

        config_files
    }
}
