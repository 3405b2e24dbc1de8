// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git CLI access to the history of a single file
//!
//! Every query shells out to the `git` binary found on `PATH`, blocking until
//! it exits.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::DateTime;
use tracing::debug;

use crate::error::GitError;
use crate::revision::{Revision, parse_revision_list};

/// Content of a file at one revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// The file existed; its content decoded as UTF-8 (lossily)
    Found(String),
    /// The path does not exist at that revision
    Missing,
}

/// Read access to the revision history of files in a repository
///
/// Implemented by [`GitRepo`]; the extraction loop is written against this
/// trait so it can be driven by an in-memory history in tests.
pub trait FileHistory {
    /// Revisions that touched `path`, oldest first, following renames
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be listed.
    fn file_revisions(&self, path: &str) -> Result<Vec<Revision>, GitError>;

    /// Content of `path` as it existed at `revision`
    ///
    /// # Errors
    ///
    /// Returns `GitError` for failures other than the path being absent.
    fn file_at(&self, revision: &Revision, path: &str) -> Result<FileContent, GitError>;

    /// Committer date of `revision` in strict ISO 8601 form
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the date cannot be read or parsed.
    fn committer_timestamp(&self, revision: &Revision) -> Result<String, GitError>;
}

/// A git working tree queried through the `git` command line
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Open the working tree at `path`
    ///
    /// Runs `git rev-parse --is-inside-work-tree` in the directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotAWorkTree` if the directory does not exist or git
    /// does not report it as a working tree, and `GitError::Spawn` if git
    /// cannot be started.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let workdir = path.as_ref().to_path_buf();
        if !workdir.is_dir() {
            return Err(GitError::NotAWorkTree { path: workdir });
        }

        let repo = Self { workdir };
        let output = repo.output(&["rev-parse", "--is-inside-work-tree"])?;
        if !output.status.success() || String::from_utf8_lossy(&output.stdout).trim() != "true" {
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "work tree check failed"
            );
            return Err(GitError::NotAWorkTree {
                path: repo.workdir,
            });
        }

        Ok(repo)
    }

    /// Get the working directory path
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git and capture its output regardless of exit status
    fn output(&self, args: &[&str]) -> Result<Output, GitError> {
        debug!(args = %args.join(" "), "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            // Stable, untranslated diagnostics for missing-path detection
            .env("LC_ALL", "C")
            .output()
            .map_err(|source| GitError::Spawn {
                args: args.join(" "),
                source,
            })
    }

    /// Run git, requiring success, and return trimmed stdout
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(command_failed(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl FileHistory for GitRepo {
    fn file_revisions(&self, path: &str) -> Result<Vec<Revision>, GitError> {
        let raw = self.run(&[
            "log",
            "--reverse",
            "--follow",
            "--pretty=format:%H",
            "--",
            path,
        ])?;
        Ok(parse_revision_list(&raw))
    }

    fn file_at(&self, revision: &Revision, path: &str) -> Result<FileContent, GitError> {
        let spec = format!("{revision}:{path}");
        let args = ["show", spec.as_str()];
        let output = self.output(&args)?;

        if output.status.success() {
            return Ok(FileContent::Found(
                String::from_utf8_lossy(&output.stdout).into_owned(),
            ));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_missing_path(&stderr) {
            debug!(revision = %revision.short_sha(), path, "path absent at revision");
            return Ok(FileContent::Missing);
        }
        Err(command_failed(&args, &output))
    }

    fn committer_timestamp(&self, revision: &Revision) -> Result<String, GitError> {
        let value = self.run(&["show", "-s", "--format=%cI", revision.as_str()])?;
        if DateTime::parse_from_rfc3339(&value).is_err() {
            return Err(GitError::InvalidTimestamp {
                revision: revision.to_string(),
                value,
            });
        }
        Ok(value)
    }
}

/// Whether `git show <rev>:<path>` stderr reports the path as absent
fn is_missing_path(stderr: &str) -> bool {
    stderr.contains("does not exist in") || stderr.contains("exists on disk, but not in")
}

fn command_failed(args: &[&str], output: &Output) -> GitError {
    GitError::CommandFailed {
        args: args.join(" "),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
