//! Average hash (aHash) perceptual fingerprint.
//!
//! The hash works by:
//! 1. Decoding the image and normalizing the color mode to RGB
//! 2. Converting to grayscale
//! 3. Resampling to an 8x8 luminance grid
//! 4. For each cell: bit = 1 if brighter than the grid mean, else 0
//!
//! Hashes are compared by Hamming distance. Equality is only meaningful
//! as an exact perceptual-bucket key; similarity always goes through
//! `distance`.

use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Side length of the luminance grid (8x8 = 64 bits).
pub const HASH_GRID_SIZE: u32 = 8;

/// A 64-bit average-hash fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerceptualHash([u8; 8]);

impl PerceptualHash {
    /// Build a hash from raw bytes (MSB-first bit order)
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// The raw hash bytes
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Hamming distance: the number of bits that differ.
    ///
    /// Lower distance = more similar images.
    pub fn distance(&self, other: &Self) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// The hash as a lowercase hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl std::fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute the average hash of an already-decoded image.
pub fn hash_image(image: &DynamicImage) -> PerceptualHash {
    // Normalize paletted/alpha sources to RGB before grayscale so
    // unrelated channels can't leak into the luminance bits.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let gray = rgb.to_luma8();

    let resized = image::imageops::resize(
        &gray,
        HASH_GRID_SIZE,
        HASH_GRID_SIZE,
        image::imageops::FilterType::Lanczos3,
    );

    // Integer mean of the 64 luminance samples
    let total: u64 = resized.pixels().map(|p| p[0] as u64).sum();
    let count = (HASH_GRID_SIZE * HASH_GRID_SIZE) as u64;
    let average = (total / count) as u8;

    // Pack bits MSB-first, row-major: 1 if the cell is brighter than average
    let mut bytes = [0u8; 8];
    let mut bit_index = 0usize;

    for y in 0..HASH_GRID_SIZE {
        for x in 0..HASH_GRID_SIZE {
            if resized.get_pixel(x, y)[0] > average {
                bytes[bit_index / 8] |= 1 << (7 - (bit_index % 8));
            }
            bit_index += 1;
        }
    }

    PerceptualHash(bytes)
}

/// Compute the average hash directly from a file path.
///
/// Corrupt or unsupported-codec files return `HashError::Decode`; the
/// caller excludes the file and continues the batch.
pub fn hash_file(path: &Path) -> Result<PerceptualHash, HashError> {
    let image = image::open(path).map_err(|e| HashError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(hash_image(&image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid_image(r: u8, g: u8, b: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(64, 64, |_, _| Rgb([r, g, b]));
        DynamicImage::ImageRgb8(img)
    }

    /// Left half black, right half white
    fn split_image() -> DynamicImage {
        let img = ImageBuffer::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgb([0u8, 0, 0])
            } else {
                Rgb([255u8, 255, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let image = split_image();
        assert_eq!(hash_image(&image), hash_image(&image));
    }

    #[test]
    fn solid_image_produces_all_zero_hash() {
        // Every cell equals the mean, so no bit can exceed it
        let hash = hash_image(&solid_image(128, 128, 128));
        assert_eq!(hash.as_bytes(), &[0u8; 8]);
    }

    #[test]
    fn split_image_sets_bright_half_bits() {
        let hash = hash_image(&split_image());

        // Exactly half the cells are above the mean
        let ones: u32 = hash.as_bytes().iter().map(|b| b.count_ones()).sum();
        assert_eq!(ones, 32);
    }

    #[test]
    fn hash_is_stable_across_resolutions() {
        // Same structure at different sizes collapses to the same grid
        let small = split_image();
        let large = DynamicImage::ImageRgb8(ImageBuffer::from_fn(256, 256, |x, _| {
            if x < 128 {
                Rgb([0u8, 0, 0])
            } else {
                Rgb([255u8, 255, 255])
            }
        }));

        assert_eq!(hash_image(&small), hash_image(&large));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let hash = hash_image(&split_image());
        assert_eq!(hash.distance(&hash), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = PerceptualHash::from_bytes([0xFF, 0, 0, 0, 0, 0, 0, 0]);
        let b = PerceptualHash::from_bytes([0, 0xFF, 0, 0, 0, 0, 0, 0]);

        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&b), 16);
    }

    #[test]
    fn distance_counts_differing_bits() {
        let a = PerceptualHash::from_bytes([0b1111_0000, 0, 0, 0, 0, 0, 0, 0]);
        let b = PerceptualHash::from_bytes([0b0000_0000, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(a.distance(&b), 4);
    }

    #[test]
    fn very_different_structures_are_far_apart() {
        let left_right = hash_image(&split_image());
        let solid = hash_image(&solid_image(0, 0, 0));

        assert!(left_right.distance(&solid) > 5);
    }

    #[test]
    fn alpha_channel_does_not_change_hash() {
        use image::Rgba;

        let rgb = split_image();
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgba([0u8, 0, 0, 255])
            } else {
                Rgba([255u8, 255, 255, 255])
            }
        }));

        assert_eq!(hash_image(&rgb), hash_image(&rgba));
    }

    #[test]
    fn to_hex_is_16_chars() {
        let hash = PerceptualHash::from_bytes([0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 1]);
        assert_eq!(hash.to_hex(), "deadbeef00000001");
    }

    #[test]
    fn hash_file_rejects_corrupt_input() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.jpg");
        std::fs::write(&path, b"this is not a valid image").unwrap();

        let result = hash_file(&path);
        assert!(matches!(result, Err(HashError::Decode { .. })));
    }
}
