//! Patch is a batch of quad store changes.
//!
//! See <https://www.w3.org/DesignIssues/Diff.html>.

use super::Quad;
use serde::{Deserialize, Serialize};

/// One logical mutation: the quads a single store call added and removed.
///
/// Order within each list follows the order the caller passed them in.
/// Duplicates are allowed; consumers must treat them idempotently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// Quads that were added
    #[serde(default)]
    pub insertions: Vec<Quad>,
    /// Quads that were removed
    #[serde(default)]
    pub deletions: Vec<Quad>,
}

impl Patch {
    /// Create a patch from both lists
    pub fn new(insertions: Vec<Quad>, deletions: Vec<Quad>) -> Self {
        Self {
            insertions,
            deletions,
        }
    }

    /// Patch that only inserts
    pub fn insert(insertions: Vec<Quad>) -> Self {
        Self::new(insertions, Vec::new())
    }

    /// Patch that only deletes
    pub fn delete(deletions: Vec<Quad>) -> Self {
        Self::new(Vec::new(), deletions)
    }

    /// Total number of quads touched
    pub fn len(&self) -> usize {
        self.insertions.len() + self.deletions.len()
    }

    /// Check if the patch touches nothing
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.deletions.is_empty()
    }
}
