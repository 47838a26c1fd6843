//! # CLI Module
//!
//! Command-line interface for the duplicate photo engine.
//!
//! ## Usage
//! ```bash
//! # Byte-identical duplicates
//! photo-dupes scan ~/Photos
//!
//! # Identical perceptual fingerprints
//! photo-dupes scan ~/Photos --mode perceptual
//!
//! # Near-duplicates within a Hamming distance
//! photo-dupes scan ~/Photos --mode similar --threshold 5
//!
//! # JSON output for scripting
//! photo-dupes scan ~/Photos --output json
//! ```
//!
//! The CLI only reports; it never deletes files.

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_dupes::core::detector::{Detection, DetectionMode, Detector, DetectorConfig};
use photo_dupes::core::grouper::DEFAULT_SIMILARITY_THRESHOLD;
use photo_dupes::events::{DetectEvent, Event, EventChannel, HashEvent, ScanEvent};
use photo_dupes::Result;
use std::path::PathBuf;
use std::thread;

/// Photo Dupes - find duplicate and near-duplicate photos
#[derive(Parser, Debug)]
#[command(name = "photo-dupes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory for duplicate photos
    Scan {
        /// Directory to scan
        root: PathBuf,

        /// Detection method
        #[arg(short, long, default_value = "exact")]
        mode: Mode,

        /// Hamming-distance threshold for --mode similar (0-64)
        #[arg(short, long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: u32,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Maximum directory depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Byte-identical content (SHA-256)
    Exact,
    /// Identical perceptual fingerprint
    Perceptual,
    /// Near-duplicates by Hamming distance
    Similar,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (deletable paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            root,
            mode,
            threshold,
            output,
            follow_symlinks,
            max_depth,
            verbose,
        } => run_scan(root, mode, threshold, output, follow_symlinks, max_depth, verbose),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    root: PathBuf,
    mode: Mode,
    threshold: u32,
    output: OutputFormat,
    follow_symlinks: bool,
    max_depth: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Dupes").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let config = DetectorConfig::new()
        .threshold(threshold)
        .follow_symlinks(follow_symlinks)
        .max_depth(max_depth);
    let detector = Detector::new(config).map_err(photo_dupes::DupeError::from)?;

    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose_clone = verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Detect(DetectEvent::PhaseChanged { phase }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("{}", phase));
                    }
                }
                Event::Scan(ScanEvent::Completed { total_files }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_files as u64);
                    }
                }
                Event::Hash(HashEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(p.completed as u64);
                        if verbose_clone {
                            pb.set_message(
                                p.current_path
                                    .file_name()
                                    .unwrap_or_default()
                                    .to_string_lossy()
                                    .into_owned(),
                            );
                        }
                    }
                }
                Event::Detect(DetectEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    let result = match mode {
        Mode::Exact => detector.find_duplicates_with_events(&root, DetectionMode::Exact, &sender),
        Mode::Perceptual => {
            detector.find_duplicates_with_events(&root, DetectionMode::Perceptual, &sender)
        }
        Mode::Similar => detector.find_similar_with_events(&root, &sender),
    };

    // Drop sender to signal the event thread to finish
    drop(sender);
    event_thread.join().ok();

    let detection = result?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &detection, verbose),
        OutputFormat::Json => print_json_results(&detection),
        OutputFormat::Minimal => print_minimal_results(&detection),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, detection: &Detection, verbose: bool) {
    let stats = detection.stats();

    term.write_line("").ok();
    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} photos scanned in {:.1}s",
        style(detection.total_files).cyan(),
        detection.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} duplicate groups found",
        style(stats.total_groups).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} duplicate photos",
        style(stats.total_duplicates).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} potential space savings",
        style(format_bytes(stats.reclaimable_bytes)).yellow()
    ))
    .ok();

    if !detection.skipped.is_empty() {
        term.write_line(&format!(
            "  {} files excluded (unreadable or undecodable)",
            style(detection.skipped.len()).red()
        ))
        .ok();

        if verbose {
            for skip in &detection.skipped {
                term.write_line(&format!(
                    "    {} {}",
                    style("!").red(),
                    skip.message
                ))
                .ok();
            }
        }
    }

    term.write_line("").ok();

    if detection.groups.is_empty() {
        term.write_line(&format!("  {} No duplicates found!", style("🎉").green()))
            .ok();
    } else {
        term.write_line(&format!("{}", style("Duplicate Groups:").bold().underlined()))
            .ok();
        term.write_line("").ok();

        for (i, group) in detection.groups.iter().enumerate() {
            term.write_line(&format!(
                "  {} ({} photos)",
                style(format!("Group {}:", i + 1)).bold(),
                group.files.len(),
            ))
            .ok();

            for photo in &group.files {
                let marker = if photo == group.representative() {
                    style("★").green().to_string()
                } else {
                    style("○").dim().to_string()
                };

                term.write_line(&format!("    {} {}", marker, display_path(photo)))
                    .ok();
            }

            term.write_line("").ok();
        }
    }

    term.write_line(&format!(
        "{}",
        style("Remember: No files were deleted. Review carefully before taking action.").dim()
    ))
    .ok();
}

fn print_json_results(detection: &Detection) {
    let stats = detection.stats();

    let output = serde_json::json!({
        "total_photos": detection.total_files,
        "duplicate_groups": stats.total_groups,
        "duplicate_count": stats.total_duplicates,
        "potential_savings_bytes": stats.reclaimable_bytes,
        "potential_savings_mb": stats.total_size_mb,
        "skipped": detection.skipped,
        "duration_ms": detection.duration_ms,
        "groups": detection.groups.iter().map(|g| {
            serde_json::json!({
                "representative": g.representative(),
                "photos": g.files,
            })
        }).collect::<Vec<_>>()
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_results(detection: &Detection) {
    for group in &detection.groups {
        for photo in group.duplicates() {
            println!("{}", photo.display());
        }
    }
}

fn display_path(path: &std::path::Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_sensible_units() {
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn cli_parses_scan_with_mode() {
        let cli = Cli::try_parse_from([
            "photo-dupes",
            "scan",
            "/photos",
            "--mode",
            "similar",
            "--threshold",
            "10",
        ])
        .unwrap();

        match cli.command {
            Commands::Scan { mode, threshold, .. } => {
                assert!(matches!(mode, Mode::Similar));
                assert_eq!(threshold, 10);
            }
        }
    }

    #[test]
    fn cli_threshold_defaults_to_five() {
        let cli = Cli::try_parse_from(["photo-dupes", "scan", "/photos"]).unwrap();

        match cli.command {
            Commands::Scan { threshold, .. } => assert_eq!(threshold, 5),
        }
    }
}
