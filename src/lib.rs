//! # Photo Dupes
//!
//! Finds duplicate and near-duplicate photos in a directory tree.
//!
//! ## Core Philosophy
//! - **Never auto-delete** - the engine reports groups; the caller owns deletion
//! - **Deterministic** - same directory, same groups, same order
//! - **Keep going** - one unreadable or corrupt file never aborts a scan
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - the duplicate detection engine
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::detector::{Detection, DetectionMode, Detector, DetectorConfig};
pub use error::{DupeError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
