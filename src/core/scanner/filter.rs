//! File filtering logic for the scanner.

use std::path::Path;

/// Recognized image extensions, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tiff", "webp", "heic", "heif",
];

/// Filters files to the recognized image extensions
pub struct ImageFilter {
    extensions: std::collections::HashSet<&'static str>,
}

impl ImageFilter {
    /// Create a filter over the fixed supported extension set
    pub fn new() -> Self {
        Self {
            extensions: SUPPORTED_EXTENSIONS.iter().copied().collect(),
        }
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.contains(ext.to_lowercase().as_str()),
            None => false,
        }
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
