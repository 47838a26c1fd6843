//! # photo-dupes CLI
//!
//! Command-line interface for the duplicate photo engine.
//!
//! ## Usage
//! ```bash
//! photo-dupes scan ~/Photos --mode similar --threshold 5
//! photo-dupes scan ~/Photos --output json
//! ```

mod cli;

use photo_dupes::Result;

fn main() -> Result<()> {
    photo_dupes::init_tracing();
    cli::run()
}
