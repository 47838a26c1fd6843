//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ImageFile, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            filter: ImageFilter::new(),
        }
    }

    /// Scan a root directory for candidate image files.
    ///
    /// A missing root is fatal; per-entry failures are collected and
    /// the scan continues.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(root, &crate::events::null_sender())
    }

    /// Scan with progress reporting via events
    pub fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut files = Vec::new();
        let mut errors = Vec::new();

        // Sorted traversal keeps discovery order stable run to run, which
        // the grouping phases rely on.
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.filter.should_include(path) {
                        continue;
                    }

                    match fs::metadata(path) {
                        Ok(metadata) => {
                            let file = ImageFile {
                                path: path.to_path_buf(),
                                size: metadata.len(),
                            };

                            events.send(Event::Scan(ScanEvent::FileFound {
                                path: file.path.clone(),
                            }));

                            files.push(file);
                        }
                        Err(e) => {
                            let error = ScanError::ReadEntry {
                                path: path.to_path_buf(),
                                source: e,
                            };

                            events.send(Event::Scan(ScanEvent::Error {
                                path: path.to_path_buf(),
                                message: error.to_string(),
                            }));

                            errors.push(error);
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadEntry {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));

                    errors.push(error);
                }
            }
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: files.len(),
        }));

        Ok(ScanResult { files, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_photo(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        // Minimal JPEG header; the scanner only looks at the extension
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_finds_single_photo() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "photo.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("photo.jpg"));
    }

    #[test]
    fn scan_excludes_non_image_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "photo.jpg");
        File::create(temp_dir.path().join("document.txt")).unwrap();
        File::create(temp_dir.path().join("document.pdf")).unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("photo.jpg"));
    }

    #[test]
    fn scan_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        create_test_photo(temp_dir.path(), "root.jpg");
        create_test_photo(&subdir, "nested.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn scan_order_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "b.jpg");
        create_test_photo(temp_dir.path(), "a.jpg");
        create_test_photo(temp_dir.path(), "c.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let first = scanner.scan(temp_dir.path()).unwrap();
        let second = scanner.scan(temp_dir.path()).unwrap();

        let first_paths: Vec<_> = first.files.iter().map(|f| f.path.clone()).collect();
        let second_paths: Vec<_> = second.files.iter().map(|f| f.path.clone()).collect();

        assert_eq!(first_paths, second_paths);
        assert!(first_paths[0].ends_with("a.jpg"));
        assert!(first_paths[2].ends_with("c.jpg"));
    }

    #[test]
    fn scan_records_file_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0u8; 100]).unwrap();
        drop(file);

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files[0].size, 100);
    }

    #[test]
    fn scan_nonexistent_directory_is_fatal() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(matches!(
            result,
            Err(ScanError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn scan_respects_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        create_test_photo(temp_dir.path(), "root.jpg");
        create_test_photo(&subdir, "nested.jpg");

        let scanner = WalkDirScanner::new(ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        });
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("root.jpg"));
    }
}
