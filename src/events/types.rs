//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the detection engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Discovery phase events
    Scan(ScanEvent),
    /// Hashing phase events
    Hash(HashEvent),
    /// Detection-level events
    Detect(DetectEvent),
}

/// Events during the discovery phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Discovery has started
    Started { root: PathBuf },
    /// A candidate image was found
    FileFound { path: PathBuf },
    /// An error occurred but discovery continues
    Error { path: PathBuf, message: String },
    /// Discovery completed
    Completed { total_files: usize },
}

/// Events during the hashing phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Hashing has started
    Started { total_files: usize },
    /// Progress update during hashing
    Progress(HashProgress),
    /// A file failed to hash and was excluded
    Skipped { path: PathBuf, message: String },
    /// Hashing completed
    Completed {
        total_hashed: usize,
        total_skipped: usize,
    },
}

/// Progress information during hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of files hashed so far
    pub completed: usize,
    /// Total number of files to hash
    pub total: usize,
    /// Current file being hashed
    pub current_path: PathBuf,
}

/// Detection-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DetectEvent {
    /// Detection has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: DetectPhase },
    /// Detection completed successfully
    Completed { summary: DetectSummary },
}

/// Phases of a detection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectPhase {
    Scanning,
    Hashing,
    Grouping,
}

/// Summary of a completed detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectSummary {
    /// Total candidate files discovered
    pub total_files: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding the first in each group)
    pub duplicate_count: usize,
    /// Files excluded because they could not be read or decoded
    pub skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for DetectPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectPhase::Scanning => write!(f, "Scanning"),
            DetectPhase::Hashing => write!(f, "Hashing"),
            DetectPhase::Grouping => write!(f, "Grouping"),
        }
    }
}
