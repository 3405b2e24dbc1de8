// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! position-history-git: file history queries for position-history
//!
//! This library crate wraps the `git` command line to list the revisions
//! that touched a file and to read that file as it was at each of them.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use position_history_git::{FileContent, FileHistory, GitRepo};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! for rev in repo.file_revisions("portfolio.json").expect("list revisions") {
//!     if let FileContent::Found(text) = repo.file_at(&rev, "portfolio.json").expect("show") {
//!         println!("{} - {} bytes", rev.short_sha(), text.len());
//!     }
//! }
//! ```

pub mod error;
pub mod repo;
pub mod revision;

pub use error::GitError;
pub use repo::{FileContent, FileHistory, GitRepo};
pub use revision::{Revision, parse_revision_list};

