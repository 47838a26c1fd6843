//! # Statistics Module
//!
//! Derived, read-only summary over a set of duplicate groups.
//!
//! Statistics are computed fresh on every call and are best-effort:
//! a file that vanished between detection and aggregation is silently
//! skipped from the size totals, never an error.

use crate::core::grouper::DuplicateGroup;
use serde::{Deserialize, Serialize};
use std::fs;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Summary statistics over a set of duplicate groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Number of duplicate groups
    pub total_groups: usize,
    /// Total files across all groups
    pub total_files: usize,
    /// Files beyond the first in each group - the deletable ones
    pub total_duplicates: usize,
    /// Aggregate byte size of every non-first file in every group
    pub reclaimable_bytes: u64,
    /// The same, in megabytes
    pub total_size_mb: f64,
}

impl DetectionStats {
    /// Compute statistics over a set of groups.
    ///
    /// Sizes come from fresh filesystem lookups; lookup failures are
    /// skipped without propagating.
    pub fn compute(groups: &[DuplicateGroup]) -> Self {
        let total_groups = groups.len();
        let total_files: usize = groups.iter().map(|g| g.files.len()).sum();
        let total_duplicates = total_files - total_groups;

        let mut reclaimable_bytes = 0u64;
        for group in groups {
            for path in group.duplicates() {
                if let Ok(metadata) = fs::metadata(path) {
                    reclaimable_bytes += metadata.len();
                }
            }
        }

        Self {
            total_groups,
            total_files,
            total_duplicates,
            reclaimable_bytes,
            total_size_mb: reclaimable_bytes as f64 / BYTES_PER_MB,
        }
    }
}
