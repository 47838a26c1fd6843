//! # Grouper Module
//!
//! Turns per-file hashes into duplicate groups.
//!
//! Two strategies:
//! - `exact` - bucket by equal key (content digest, or perceptual hash
//!   treated as an exact value)
//! - `similar` - greedy single-pass clustering by Hamming distance
//!   against a threshold
//!
//! Both only emit groups with 2+ members; a singleton represents no
//! storage-reclaim opportunity.

mod exact;
mod similar;

pub use exact::group_by_key;
pub use similar::{cluster_by_distance, DEFAULT_SIMILARITY_THRESHOLD};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A group of 2+ files judged equivalent under one detection criterion.
///
/// Member order follows discovery order. The first member is the
/// conventional keep candidate, but retention is a caller decision -
/// the engine never deletes anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// All files in the group, in discovery order
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a group from member paths
    pub fn new(files: Vec<PathBuf>) -> Self {
        debug_assert!(files.len() >= 2, "duplicate groups have 2+ members");
        Self { files }
    }

    /// The conventional keep candidate (first discovered member)
    pub fn representative(&self) -> &PathBuf {
        &self.files[0]
    }

    /// Files beyond the first - the ones a caller could delete
    pub fn duplicates(&self) -> &[PathBuf] {
        &self.files[1..]
    }

    /// Number of deletable files in this group
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_is_first_member() {
        let group = DuplicateGroup::new(vec![
            PathBuf::from("/a.jpg"),
            PathBuf::from("/b.jpg"),
            PathBuf::from("/c.jpg"),
        ]);

        assert_eq!(group.representative(), &PathBuf::from("/a.jpg"));
        assert_eq!(group.duplicate_count(), 2);
        assert_eq!(
            group.duplicates(),
            &[PathBuf::from("/b.jpg"), PathBuf::from("/c.jpg")]
        );
    }
}
