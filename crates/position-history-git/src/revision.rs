//! Revision identifiers and log output parsing

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque revision hash as printed by `git log --pretty=format:%H`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// Wrap a revision hash
    #[must_use]
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// The full hash
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split `git log` output into revisions, one per non-blank line
///
/// Lines are trimmed and order is preserved.
#[must_use]
pub fn parse_revision_list(raw: &str) -> Vec<Revision> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Revision::new)
        .collect()
}
