//! # Core Engine
//!
//! The GUI-agnostic duplicate detection engine.
//!
//! ## Pipeline
//! 1. `scanner` - discover candidate image files
//! 2. `hasher` - compute content digests or perceptual hashes
//! 3. `grouper` - bucket by equal key or cluster by Hamming distance
//! 4. `stats` - summarize reclaimable space over the groups
//!
//! `detector` ties the phases together behind a single entry point.

pub mod detector;
pub mod grouper;
pub mod hasher;
pub mod scanner;
pub mod stats;
