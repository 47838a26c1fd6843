//! Content digest: SHA-256 over a file's full byte content.

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Chunk size for streaming file reads.
///
/// Files are never loaded whole; this matters for large originals.
pub const DIGEST_CHUNK_SIZE: usize = 8 * 1024;

/// A 256-bit content digest.
///
/// Two files with equal digests are byte-identical with cryptographic
/// confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// The raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The digest as a lowercase hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute the content digest of a file by streaming its bytes.
///
/// Any I/O failure (permissions, file vanished mid-read) is returned as
/// `HashError::Io`; the caller excludes the file and continues the batch.
pub fn digest_file(path: &Path) -> Result<ContentDigest, HashError> {
    let file = File::open(path).map_err(|source| HashError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; DIGEST_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer).map_err(|source| HashError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(ContentDigest(hasher.finalize().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn identical_content_produces_identical_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.jpg", b"same bytes");
        let b = write_file(&temp_dir, "b.jpg", b"same bytes");

        assert_eq!(digest_file(&a).unwrap(), digest_file(&b).unwrap());
    }

    #[test]
    fn different_content_produces_different_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.jpg", b"some bytes");
        let b = write_file(&temp_dir, "b.jpg", b"other bytes");

        assert_ne!(digest_file(&a).unwrap(), digest_file(&b).unwrap());
    }

    #[test]
    fn digest_matches_known_sha256() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "abc.bin", b"abc");

        // SHA-256("abc")
        assert_eq!(
            digest_file(&path).unwrap().to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_of_file_larger_than_chunk_size() {
        let temp_dir = TempDir::new().unwrap();
        let big = vec![0xABu8; DIGEST_CHUNK_SIZE * 3 + 17];
        let a = write_file(&temp_dir, "a.bin", &big);
        let b = write_file(&temp_dir, "b.bin", &big);

        assert_eq!(digest_file(&a).unwrap(), digest_file(&b).unwrap());
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = digest_file(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(HashError::Io { .. })));
    }

    #[test]
    fn digest_display_is_hex() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "x.bin", b"x");
        let digest = digest_file(&path).unwrap();

        let hex = digest.to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
