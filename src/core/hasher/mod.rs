//! # Hasher Module
//!
//! Computes the two fingerprints the engine groups by:
//!
//! - **Content digest** - SHA-256 over the file's exact bytes. Equal
//!   digests mean byte-identical files; collision probability is treated
//!   as zero.
//! - **Perceptual hash** - 64-bit average hash (aHash) over an 8x8
//!   grayscale grid. Robust to minor recompression and resizing, fragile
//!   to rotation/crop/mirroring - a known limitation, not a defect.
//!
//! Both are explicit value types with defined equality; the perceptual
//! hash additionally defines Hamming distance for similarity clustering.

mod content;
mod perceptual;

pub use content::{digest_file, ContentDigest, DIGEST_CHUNK_SIZE};
pub use perceptual::{hash_file, hash_image, PerceptualHash, HASH_GRID_SIZE};
