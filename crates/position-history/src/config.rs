// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for position-history
//!
//! Values come from command-line flags, falling back to environment
//! variables (which `main` may populate from a `.env` file). [`Config`] is
//! the raw parse; [`Config::settings`] validates it into the immutable
//! [`Settings`] handed to the extraction loop.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Symbol tracked when none is configured
pub const DEFAULT_SYMBOL: &str = "SGML";

/// Extract a position's value history from the git history of a JSON file
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "position-history")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Git working tree containing the tracked file
    ///
    /// Relative paths are resolved against the current directory.
    #[arg(long, env = "SUBMODULE_DIR")]
    pub submodule_dir: Option<String>,

    /// Path of the tracked JSON file, relative to the working tree
    #[arg(long, env = "TARGET_JSON_PATH")]
    pub target_json_path: Option<String>,

    /// Where to write the report
    ///
    /// Parent directories are created as needed; an existing file is replaced.
    #[arg(long, env = "OUTPUT_PATH")]
    pub output_path: Option<String>,

    /// Only process the N oldest revisions (0 means no limit)
    #[arg(long, env = "MAX_COMMITS")]
    pub max_commits: Option<usize>,

    /// Symbol of the position to track
    #[arg(long, env = "POSITION_SYMBOL")]
    pub symbol: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Validated, immutable run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Working tree directory, as given
    pub submodule_dir: String,
    /// Tracked file path within the working tree, as given
    pub target_json_path: String,
    /// Report destination, as given
    pub output_path: String,
    /// Cap on the number of (oldest) revisions processed
    pub max_commits: Option<usize>,
    /// Symbol of the position to extract
    pub symbol: String,
}

impl Settings {
    /// Working tree directory resolved against `base`
    #[must_use]
    pub fn submodule_path(&self, base: &Path) -> PathBuf {
        base.join(&self.submodule_dir)
    }

    /// Report destination resolved against `base`
    #[must_use]
    pub fn output_file(&self, base: &Path) -> PathBuf {
        base.join(&self.output_path)
    }
}

impl Config {
    /// Validate the configuration into [`Settings`]
    ///
    /// Empty values count as missing. A cap of zero is treated as no cap.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` naming every required value
    /// that is absent.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let (Some(submodule_dir), Some(target_json_path), Some(output_path)) = (
            non_empty(&self.submodule_dir),
            non_empty(&self.target_json_path),
            non_empty(&self.output_path),
        ) else {
            return Err(ConfigError::MissingRequired(self.missing_required()));
        };

        Ok(Settings {
            submodule_dir,
            target_json_path,
            output_path,
            max_commits: self.max_commits.filter(|&n| n > 0),
            symbol: non_empty(&self.symbol).unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        })
    }

    fn missing_required(&self) -> Vec<&'static str> {
        [
            ("SUBMODULE_DIR", &self.submodule_dir),
            ("TARGET_JSON_PATH", &self.target_json_path),
            ("OUTPUT_PATH", &self.output_path),
        ]
        .into_iter()
        .filter_map(|(name, value)| non_empty(value).is_none().then_some(name))
        .collect()
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One or more required values are absent
    #[error(
        "Missing env vars: {}. Required: SUBMODULE_DIR, TARGET_JSON_PATH, OUTPUT_PATH",
        .0.join(", ")
    )]
    MissingRequired(Vec<&'static str>),
}
