// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report model and writer
//!
//! The report is serialized once, at the end of a run, as pretty-printed JSON
//! with two-space indentation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;

/// Report writing errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output directory could not be created
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The report file could not be written
    #[error("Failed to write report {}: {source}", path.display())]
    Write {
        /// The file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// One entry of the report's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    /// The position's values at a revision
    Value {
        /// Committer date of the revision, ISO 8601
        timestamp: String,
        /// Market value, verbatim from the document
        #[serde(rename = "marketValue")]
        market_value: Value,
        /// Cost basis, verbatim; omitted when the position has none
        #[serde(rename = "costBasis", default, skip_serializing_if = "Option::is_none")]
        cost_basis: Option<Value>,
    },
    /// A revision whose content could not be used
    Error {
        /// Full hash of the revision
        sha: String,
        /// Error code and message
        error: String,
    },
}

impl Snapshot {
    /// Whether this entry records a failure
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// The report written to the output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Working tree directory, as configured
    pub submodule: String,
    /// Tracked file path, as configured
    pub file: String,
    /// Generation time, ISO 8601 UTC with milliseconds
    pub last_updated: String,
    /// Number of entries in `history`
    pub count: usize,
    /// Snapshots in commit order, oldest first
    #[serde(rename = "sgmlHistoryData")]
    pub history: Vec<Snapshot>,
}

impl Report {
    /// Assemble a report from the extracted snapshots
    #[must_use]
    pub fn new(settings: &Settings, history: Vec<Snapshot>, generated_at: DateTime<Utc>) -> Self {
        Self {
            submodule: settings.submodule_dir.clone(),
            file: settings.target_json_path.clone(),
            last_updated: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            count: history.len(),
            history,
        }
    }

    /// Serialize as pretty JSON with two-space indentation
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`, creating parent directories and replacing
    /// any existing file
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), count = self.count, "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings {
            submodule_dir: "portfolio-data".to_string(),
            target_json_path: "accounts/main.json".to_string(),
            output_path: "out/history.json".to_string(),
            max_commits: None,
            symbol: "SGML".to_string(),
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap()
    }

    fn sample_history() -> Vec<Snapshot> {
        vec![
            Snapshot::Value {
                timestamp: "2026-01-15T10:00:00+00:00".to_string(),
                market_value: json!(500),
                cost_basis: Some(json!(450)),
            },
            Snapshot::Error {
                sha: "a".repeat(40),
                error: "JSON_PARSE_FAILED: EOF while parsing an object at line 1 column 1"
                    .to_string(),
            },
        ]
    }

    #[test]
    fn test_count_matches_history() {
        let report = Report::new(&settings(), sample_history(), generated_at());
        assert_eq!(report.count, 2);
        assert_eq!(report.count, report.history.len());
    }

    #[test]
    fn test_last_updated_format() {
        let report = Report::new(&settings(), Vec::new(), generated_at());
        assert_eq!(report.last_updated, "2026-01-17T02:33:06.000Z");
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::new(&settings(), sample_history(), generated_at());
        let value: Value = serde_json::from_str(&report.to_json().expect("json")).expect("parse");
        assert_eq!(
            value,
            json!({
                "submodule": "portfolio-data",
                "file": "accounts/main.json",
                "lastUpdated": "2026-01-17T02:33:06.000Z",
                "count": 2,
                "sgmlHistoryData": [
                    {
                        "timestamp": "2026-01-15T10:00:00+00:00",
                        "marketValue": 500,
                        "costBasis": 450
                    },
                    {
                        "sha": "a".repeat(40),
                        "error": "JSON_PARSE_FAILED: EOF while parsing an object at line 1 column 1"
                    }
                ]
            })
        );
    }

    #[test]
    fn test_report_uses_two_space_indent_and_key_order() {
        let report = Report::new(&settings(), Vec::new(), generated_at());
        let json = report.to_json().expect("json");
        assert_eq!(
            json,
            "{\n  \"submodule\": \"portfolio-data\",\n  \"file\": \"accounts/main.json\",\n  \
             \"lastUpdated\": \"2026-01-17T02:33:06.000Z\",\n  \"count\": 0,\n  \
             \"sgmlHistoryData\": []\n}"
        );
    }

    #[test]
    fn test_missing_cost_basis_is_omitted() {
        let snapshot = Snapshot::Value {
            timestamp: "2026-01-15T10:00:00+00:00".to_string(),
            market_value: json!(1),
            cost_basis: None,
        };
        let json = serde_json::to_string(&snapshot).expect("serialize");
        assert_eq!(
            json,
            r#"{"timestamp":"2026-01-15T10:00:00+00:00","marketValue":1}"#
        );
    }

    #[test]
    fn test_snapshot_deserializes_both_shapes() {
        let history: Vec<Snapshot> = serde_json::from_value(json!([
            {"sha": "abc", "error": "JSON_PARSE_FAILED: x"},
            {"timestamp": "t", "marketValue": 2, "costBasis": 1}
        ]))
        .expect("deserialize");
        assert!(history[0].is_error());
        assert!(!history[1].is_error());
    }

    #[test]
    fn test_write_creates_parent_directories_and_overwrites() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested/deeper/history.json");
        std::fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        std::fs::write(&path, "stale content that is longer than the report").expect("seed");

        let report = Report::new(&settings(), sample_history(), generated_at());
        report.write_to(&path).expect("write");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, report.to_json().expect("json"));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("a/b/c/report.json");
        Report::new(&settings(), Vec::new(), generated_at())
            .write_to(&path)
            .expect("write");
        assert!(path.exists());
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let temp = TempDir::new().expect("temp dir");
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").expect("seed");

        let result =
            Report::new(&settings(), Vec::new(), generated_at()).write_to(&blocker.join("r.json"));
        assert!(matches!(result, Err(ReportError::CreateDir { .. })));
    }
}
