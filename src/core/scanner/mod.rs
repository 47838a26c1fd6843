//! # Scanner Module
//!
//! Discovers candidate image files beneath a root directory.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - BMP (.bmp)
//! - TIFF (.tiff)
//! - WebP (.webp)
//! - HEIC (.heic, .heif) - iPhone photos
//!
//! Traversal is recursive and deterministic: entries are visited in
//! file-name order so the same directory always yields the same list.
//! The rest of the engine treats that order as significant (it decides
//! which file in a group is the conventional keep candidate).

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A discovered candidate image file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes at discovery time
    pub size: u64,
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Successfully discovered files, in traversal order
    pub files: Vec<ImageFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}
