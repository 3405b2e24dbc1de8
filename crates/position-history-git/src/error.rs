// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for position-history-git

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while querying a repository through the git CLI
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be started
    #[error("Failed to run git {args}: {source}")]
    Spawn {
        /// The arguments passed to git, space separated
        args: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The directory is not inside a git working tree
    #[error("Not a git working tree: {}", path.display())]
    NotAWorkTree {
        /// The directory that was checked
        path: PathBuf,
    },

    /// git exited with a non-zero status for a reason other than a missing path
    #[error("git {args} failed ({status}): {stderr}")]
    CommandFailed {
        /// The arguments passed to git, space separated
        args: String,
        /// Exit status description
        status: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// A committer date could not be parsed as ISO 8601
    #[error("Invalid committer timestamp for {revision}: {value:?}")]
    InvalidTimestamp {
        /// The revision whose date was queried
        revision: String,
        /// The raw value printed by git
        value: String,
    },
}
