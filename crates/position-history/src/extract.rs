// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Extraction of position snapshots from a file's revision history
//!
//! # Example
//!
//! ```no_run
//! use position_history::config::Config;
//! use position_history::extract::Extractor;
//! use position_history_git::GitRepo;
//!
//! let config = Config {
//!     submodule_dir: Some("portfolio".into()),
//!     target_json_path: Some("positions.json".into()),
//!     output_path: Some("out/history.json".into()),
//!     ..Default::default()
//! };
//! let settings = config.settings().expect("valid config");
//! let repo = GitRepo::open(&settings.submodule_dir).expect("open repo");
//! let extraction = Extractor::new(&repo, &settings).run().expect("extract");
//! println!("{} snapshots", extraction.snapshots.len());
//! ```

use position_history_git::{FileContent, FileHistory, GitError, Revision};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::position::{PositionValues, find_position};
use crate::report::Snapshot;

/// Error code recorded for content that is not valid JSON
pub const JSON_PARSE_FAILED: &str = "JSON_PARSE_FAILED";

/// Error code recorded for documents without a `positions` array
pub const POSITIONS_MISSING: &str = "POSITIONS_MISSING";

// ============================================================================
// Error Types
// ============================================================================

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Git error
    #[error("Git error: {0}")]
    Git(#[from] GitError),
}

// ============================================================================
// Progress Reporting
// ============================================================================

/// Progress callback signature
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent)>;

/// Progress event during extraction
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Revisions have been listed
    Started {
        /// Revisions that touched the file
        detected: usize,
        /// Revisions that will be processed after applying the cap
        to_process: usize,
    },
    /// About to process a revision
    Processing {
        /// Zero-based position in the processing order
        index: usize,
        /// The revision being processed
        revision: Revision,
    },
    /// A revision produced an error entry
    Warning {
        /// The revision that failed
        revision: Revision,
        /// The recorded error
        message: String,
    },
    /// Extraction completed
    Completed {
        /// Statistics from the run
        stats: ExtractStats,
    },
}

// ============================================================================
// Statistics
// ============================================================================

/// Statistics from an extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Revisions that touched the file
    pub revisions_detected: usize,
    /// Revisions whose content was requested
    pub revisions_processed: usize,
    /// Revisions where the file was absent or empty
    pub skipped_missing: usize,
    /// Revisions whose content was not valid JSON
    pub parse_failures: usize,
    /// Revisions whose document had no `positions` array
    pub malformed_documents: usize,
    /// Revisions without a matching position with a market value
    pub no_position: usize,
    /// Snapshots with position values
    pub positions_found: usize,
}

impl ExtractStats {
    /// Number of error entries recorded
    #[must_use]
    pub fn errors_recorded(&self) -> usize {
        self.parse_failures + self.malformed_documents
    }
}

/// Result of an extraction run
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Snapshots in commit order, oldest first
    pub snapshots: Vec<Snapshot>,
    /// Run statistics
    pub stats: ExtractStats,
}

/// What a single revision contributed
enum Outcome {
    Skipped,
    NoPosition,
    Recorded(Snapshot),
}

// ============================================================================
// Extractor
// ============================================================================

/// Walks a file's history and collects position snapshots
pub struct Extractor<'a, H: FileHistory> {
    history: &'a H,
    settings: &'a Settings,
    progress: Option<ProgressCallback>,
}

impl<'a, H: FileHistory> Extractor<'a, H> {
    /// Create an extractor reading `history` according to `settings`
    #[must_use]
    pub fn new(history: &'a H, settings: &'a Settings) -> Self {
        Self {
            history,
            settings,
            progress: None,
        }
    }

    /// Set a progress callback
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn report(&self, event: ProgressEvent) {
        if let Some(ref callback) = self.progress {
            callback(&event);
        }
    }

    /// Process every revision (up to the configured cap) in commit order
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Git` if history cannot be listed or a git query
    /// fails for a reason other than the file being absent. Nothing is
    /// returned for revisions already processed in that case.
    pub fn run(&self) -> Result<Extraction, ExtractError> {
        let path = self.settings.target_json_path.as_str();
        let mut revisions = self.history.file_revisions(path)?;
        let detected = revisions.len();

        debug!(detected, path, "listed revisions");
        if let Some(cap) = self.settings.max_commits {
            revisions.truncate(cap);
        }
        self.report(ProgressEvent::Started {
            detected,
            to_process: revisions.len(),
        });

        let mut stats = ExtractStats {
            revisions_detected: detected,
            ..Default::default()
        };
        let mut snapshots = Vec::new();

        for (index, revision) in revisions.into_iter().enumerate() {
            debug!(revision = %revision.short_sha(), "processing");
            self.report(ProgressEvent::Processing {
                index,
                revision: revision.clone(),
            });
            stats.revisions_processed += 1;

            match self.extract_revision(&revision, &mut stats)? {
                Outcome::Skipped => stats.skipped_missing += 1,
                Outcome::NoPosition => stats.no_position += 1,
                Outcome::Recorded(snapshot) => {
                    if let Snapshot::Error { ref error, .. } = snapshot {
                        warn!(revision = %revision.short_sha(), %error, "recorded error entry");
                        self.report(ProgressEvent::Warning {
                            revision: revision.clone(),
                            message: error.clone(),
                        });
                    } else {
                        stats.positions_found += 1;
                    }
                    snapshots.push(snapshot);
                }
            }
        }

        info!(
            processed = stats.revisions_processed,
            found = stats.positions_found,
            errors = stats.errors_recorded(),
            skipped = stats.skipped_missing,
            "extraction complete"
        );
        self.report(ProgressEvent::Completed {
            stats: stats.clone(),
        });

        Ok(Extraction { snapshots, stats })
    }

    fn extract_revision(
        &self,
        revision: &Revision,
        stats: &mut ExtractStats,
    ) -> Result<Outcome, ExtractError> {
        let path = self.settings.target_json_path.as_str();
        let raw = match self.history.file_at(revision, path)? {
            FileContent::Found(raw) if !raw.is_empty() => raw,
            FileContent::Found(_) | FileContent::Missing => {
                debug!(revision = %revision.short_sha(), "no content, skipping");
                return Ok(Outcome::Skipped);
            }
        };

        let document: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                stats.parse_failures += 1;
                return Ok(Outcome::Recorded(error_entry(revision, JSON_PARSE_FAILED, e)));
            }
        };

        let timestamp = self.history.committer_timestamp(revision)?;

        let position = match find_position(&document, &self.settings.symbol) {
            Ok(position) => position,
            Err(e) => {
                stats.malformed_documents += 1;
                return Ok(Outcome::Recorded(error_entry(revision, POSITIONS_MISSING, e)));
            }
        };

        match position.filter(PositionValues::has_market_value) {
            Some(PositionValues {
                market_value: Some(market_value),
                cost_basis,
            }) => Ok(Outcome::Recorded(Snapshot::Value {
                timestamp,
                market_value,
                cost_basis,
            })),
            _ => {
                debug!(
                    revision = %revision.short_sha(),
                    symbol = %self.settings.symbol,
                    "no position with a market value"
                );
                Ok(Outcome::NoPosition)
            }
        }
    }
}

fn error_entry(revision: &Revision, code: &str, error: impl std::fmt::Display) -> Snapshot {
    Snapshot::Error {
        sha: revision.to_string(),
        error: format!("{code}: {error}"),
    }
}
