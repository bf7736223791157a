//! # encfix engine
//!
//! Classifies text files as UTF-8 or GBK, converts them strictly between the
//! two and writes the result back atomically.
//!
//! - [`detector`]: byte-level classification
//! - [`codec`]: non-lossy transcoding
//! - [`rewriter`]: temp-file + rename commit with permission preservation
//! - [`filesystem`]: candidate file enumeration

pub mod codec;
pub mod config;
pub mod detector;
pub mod encoding;
pub mod error;
pub mod filesystem;
pub mod options;
pub mod processor;
pub mod rewriter;
pub mod stats;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::rewriter::{AtomicRewriter, Commit};
use crate::stats::{FileReport, RunReport};

/// Run the configured command over every candidate file.
///
/// # Errors
///
/// Returns an error only when the file list cannot be produced or the
/// configuration is invalid. Per-file failures are recorded in the report.
pub fn run(config: &Config) -> Result<RunReport> {
    run_with(config, &AtomicRewriter::new(), |_| {})
}

/// Like [`run`], with an explicit rewriter and a callback invoked after each
/// file, in walk order.
///
/// Files are processed one at a time; each is fully detected, converted and
/// committed before the next one is read.
///
/// # Errors
///
/// See [`run`].
pub fn run_with<C, F>(config: &Config, rewriter: &AtomicRewriter<C>, mut on_file: F) -> Result<RunReport>
where
    C: Commit,
    F: FnMut(&FileReport),
{
    if config.max_bytes == 0 {
        return Err(EngineError::Config("max_bytes must be at least 1".into()));
    }

    let files = filesystem::collect_files(&config.walk)?;
    log::info!("{} candidate files", files.len());

    let mut report = RunReport::new(config.command, config.dry_run);
    for path in &files {
        let file = processor::process_file(path, config, rewriter);
        on_file(&file);
        report.push(file);
    }

    log::info!(
        "finished: {} converted, {} skipped, {} failed",
        report.converted,
        report.skipped,
        report.failed
    );
    Ok(report)
}
