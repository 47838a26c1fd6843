//! # Detector Module
//!
//! Ties the phases together behind the engine's public boundary:
//! discover, hash, group, summarize.
//!
//! ## Modes
//! - `exact` - content digest bucketing (byte identity)
//! - `perceptual` - perceptual-hash equality bucketing
//! - `find_similar` - perceptual hashing plus distance-threshold
//!   clustering (a separate entry point, per the original API)
//!
//! Per-file failures never abort a run; they are collected as
//! [`SkippedFile`] outcomes so callers can tell "excluded due to error"
//! from "legitimately unique".

use crate::core::grouper::{
    cluster_by_distance, group_by_key, DuplicateGroup, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::core::hasher::{self, ContentDigest, PerceptualHash};
use crate::core::scanner::{ImageFile, ScanConfig, WalkDirScanner};
use crate::core::stats::DetectionStats;
use crate::error::{DetectorError, DupeError, HashError};
use crate::events::{
    null_sender, DetectEvent, DetectPhase, DetectSummary, Event, EventSender, HashEvent,
    HashProgress,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Hamming distance spans 0..=64 bits for the 8x8 hash
const MAX_THRESHOLD: u32 = 64;

/// Detection method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMode {
    /// Byte-identity via content digest
    Exact,
    /// Identical perceptual fingerprint (misses near-duplicates whose
    /// hashes differ by even one bit - faster, less tolerant)
    Perceptual,
}

impl FromStr for DetectionMode {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(DetectionMode::Exact),
            "perceptual" => Ok(DetectionMode::Perceptual),
            other => Err(DetectorError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionMode::Exact => write!(f, "exact"),
            DetectionMode::Perceptual => write!(f, "perceptual"),
        }
    }
}

/// Why a file was excluded from grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// I/O failure while reading the file
    Unreadable,
    /// Corrupt or unsupported-codec image
    Undecodable,
}

/// A file excluded from grouping, with the reason
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
    pub message: String,
}

impl From<HashError> for SkippedFile {
    fn from(error: HashError) -> Self {
        let reason = match &error {
            HashError::Io { .. } => SkipReason::Unreadable,
            HashError::Decode { .. } => SkipReason::Undecodable,
        };
        Self {
            path: error.path().clone(),
            reason,
            message: error.to_string(),
        }
    }
}

/// Result of one detection run
#[derive(Debug)]
pub struct Detection {
    /// Duplicate groups in first-seen order, members in discovery order
    pub groups: Vec<DuplicateGroup>,
    /// Total candidate files discovered
    pub total_files: usize,
    /// Files excluded from grouping because hashing failed
    pub skipped: Vec<SkippedFile>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl Detection {
    /// Compute summary statistics over this run's groups.
    ///
    /// Computed fresh on each call; size lookups are best-effort.
    pub fn stats(&self) -> DetectionStats {
        DetectionStats::compute(&self.groups)
    }
}

/// Configuration for the detector
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Maximum Hamming distance for `find_similar`
    pub threshold: u32,
    /// Scanner configuration
    pub scan_config: ScanConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            scan_config: ScanConfig::default(),
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold (0-64 bits)
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Follow symbolic links during discovery
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.scan_config.follow_symlinks = follow;
        self
    }

    /// Limit directory traversal depth
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.scan_config.max_depth = depth;
        self
    }
}

/// The duplicate detection engine.
///
/// Owns no persistent state; every call is one self-contained scan.
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Create a detector with the given configuration.
    ///
    /// Fails before any work if the threshold is out of range.
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorError> {
        if config.threshold > MAX_THRESHOLD {
            return Err(DetectorError::InvalidThreshold {
                value: config.threshold,
            });
        }
        Ok(Self { config })
    }

    /// Find duplicate groups under `root` using the given mode
    pub fn find_duplicates(
        &self,
        root: &Path,
        mode: DetectionMode,
    ) -> Result<Detection, DupeError> {
        self.find_duplicates_with_events(root, mode, &null_sender())
    }

    /// Find duplicate groups with progress reporting via events
    pub fn find_duplicates_with_events(
        &self,
        root: &Path,
        mode: DetectionMode,
        events: &EventSender,
    ) -> Result<Detection, DupeError> {
        let start = Instant::now();
        events.send(Event::Detect(DetectEvent::Started));

        let files = self.scan_phase(root, events)?;
        if files.is_empty() {
            return Ok(self.complete(Vec::new(), 0, Vec::new(), start, events));
        }
        let total_files = files.len();

        let (groups, skipped) = match mode {
            DetectionMode::Exact => {
                let (entries, skipped) =
                    self.hash_phase(&files, events, |path| hasher::digest_file(path));
                (self.group_phase::<ContentDigest>(entries, None, events), skipped)
            }
            DetectionMode::Perceptual => {
                let (entries, skipped) =
                    self.hash_phase(&files, events, |path| hasher::hash_file(path));
                (self.group_phase::<PerceptualHash>(entries, None, events), skipped)
            }
        };

        Ok(self.complete(groups, total_files, skipped, start, events))
    }

    /// Find near-duplicate groups by Hamming-distance clustering.
    ///
    /// Uses the configured threshold (default 5 bits).
    pub fn find_similar(&self, root: &Path) -> Result<Detection, DupeError> {
        self.find_similar_with_events(root, &null_sender())
    }

    /// Find near-duplicate groups with progress reporting via events
    pub fn find_similar_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<Detection, DupeError> {
        let start = Instant::now();
        events.send(Event::Detect(DetectEvent::Started));

        let files = self.scan_phase(root, events)?;
        if files.is_empty() {
            return Ok(self.complete(Vec::new(), 0, Vec::new(), start, events));
        }
        let total_files = files.len();

        let (entries, skipped) = self.hash_phase(&files, events, |path| hasher::hash_file(path));
        let groups = self.group_phase(entries, Some(self.config.threshold), events);

        Ok(self.complete(groups, total_files, skipped, start, events))
    }

    /// Phase 1: discovery. A missing root is fatal; per-entry errors are
    /// logged and dropped.
    fn scan_phase(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<Vec<ImageFile>, DupeError> {
        events.send(Event::Detect(DetectEvent::PhaseChanged {
            phase: DetectPhase::Scanning,
        }));

        let scanner = WalkDirScanner::new(self.config.scan_config.clone());
        let result = scanner.scan_with_events(root, events)?;

        for error in &result.errors {
            warn!(error = %error, "scan entry failed");
        }
        info!(
            root = %root.display(),
            files = result.files.len(),
            "discovery complete"
        );

        Ok(result.files)
    }

    /// Phase 2: hashing, parallel across files.
    ///
    /// `par_iter().map().collect()` preserves input order, so the
    /// surviving entries stay in discovery order for the grouping phase.
    fn hash_phase<K, F>(
        &self,
        files: &[ImageFile],
        events: &EventSender,
        hash_fn: F,
    ) -> (Vec<(PathBuf, K)>, Vec<SkippedFile>)
    where
        K: Send,
        F: Fn(&Path) -> Result<K, HashError> + Sync,
    {
        events.send(Event::Detect(DetectEvent::PhaseChanged {
            phase: DetectPhase::Hashing,
        }));
        events.send(Event::Hash(HashEvent::Started {
            total_files: files.len(),
        }));

        let completed = AtomicUsize::new(0);
        let total = files.len();

        let outcomes: Vec<Result<(PathBuf, K), SkippedFile>> = files
            .par_iter()
            .map(|file| {
                let outcome = hash_fn(&file.path)
                    .map(|key| (file.path.clone(), key))
                    .map_err(SkippedFile::from);

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                match &outcome {
                    Ok(_) => {
                        events.send(Event::Hash(HashEvent::Progress(HashProgress {
                            completed: done,
                            total,
                            current_path: file.path.clone(),
                        })));
                    }
                    Err(skip) => {
                        warn!(path = %skip.path.display(), reason = ?skip.reason, "file excluded from grouping");
                        events.send(Event::Hash(HashEvent::Skipped {
                            path: skip.path.clone(),
                            message: skip.message.clone(),
                        }));
                    }
                }
                outcome
            })
            .collect();

        let mut entries = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(entry) => entries.push(entry),
                Err(skip) => skipped.push(skip),
            }
        }

        events.send(Event::Hash(HashEvent::Completed {
            total_hashed: entries.len(),
            total_skipped: skipped.len(),
        }));
        debug!(hashed = entries.len(), skipped = skipped.len(), "hashing complete");

        (entries, skipped)
    }

    /// Phase 3: grouping. `threshold` selects distance clustering;
    /// `None` selects equality bucketing.
    fn group_phase<K>(
        &self,
        entries: Vec<(PathBuf, K)>,
        threshold: Option<u32>,
        events: &EventSender,
    ) -> Vec<DuplicateGroup>
    where
        K: GroupKey,
    {
        events.send(Event::Detect(DetectEvent::PhaseChanged {
            phase: DetectPhase::Grouping,
        }));

        let groups = K::group(entries, threshold);
        info!(groups = groups.len(), "grouping complete");
        groups
    }

    fn complete(
        &self,
        groups: Vec<DuplicateGroup>,
        total_files: usize,
        skipped: Vec<SkippedFile>,
        start: Instant,
        events: &EventSender,
    ) -> Detection {
        let duration_ms = start.elapsed().as_millis() as u64;
        let duplicate_count = groups.iter().map(|g| g.duplicate_count()).sum();

        events.send(Event::Detect(DetectEvent::Completed {
            summary: DetectSummary {
                total_files,
                duplicate_groups: groups.len(),
                duplicate_count,
                skipped: skipped.len(),
                duration_ms,
            },
        }));

        Detection {
            groups,
            total_files,
            skipped,
            duration_ms,
        }
    }
}

/// Dispatch from key type to grouping strategy.
///
/// Content digests only support equality bucketing; perceptual hashes
/// support both equality bucketing and distance clustering.
trait GroupKey: Eq + std::hash::Hash + Send + Sized {
    fn group(entries: Vec<(PathBuf, Self)>, threshold: Option<u32>) -> Vec<DuplicateGroup>;
}

impl GroupKey for ContentDigest {
    fn group(entries: Vec<(PathBuf, Self)>, _threshold: Option<u32>) -> Vec<DuplicateGroup> {
        group_by_key(entries)
    }
}

impl GroupKey for PerceptualHash {
    fn group(entries: Vec<(PathBuf, Self)>, threshold: Option<u32>) -> Vec<DuplicateGroup> {
        match threshold {
            Some(threshold) => cluster_by_distance(entries, threshold),
            None => group_by_key(entries),
        }
    }
}
