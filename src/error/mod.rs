//! # Error Module
//!
//! Error types for the duplicate photo engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file failures are not fatal** - only directory-level or
//!   configuration-level failures abort a scan

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DupeError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Detector error: {0}")]
    Detector(#[from] DetectorError),
}

/// Errors that occur during photo discovery
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory entry {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while hashing a single file
///
/// These are per-file: the detector records them and keeps going.
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

impl HashError {
    /// The file this error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            HashError::Io { path, .. } => path,
            HashError::Decode { path, .. } => path,
        }
    }
}

/// Errors that occur at the detector boundary
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Unknown detection mode: {mode} (expected 'exact' or 'perceptual')")]
    InvalidMode { mode: String },

    #[error("Invalid threshold: {value} (must be 0-64)")]
    InvalidThreshold { value: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DupeError>;
