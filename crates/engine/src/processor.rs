use crate::codec;
use crate::config::Config;
use crate::detector::{self, Detection};
use crate::encoding::{Direction, EncodingLabel};
use crate::error::Result;
use crate::options::Command;
use crate::rewriter::{AtomicRewriter, Commit};
use crate::stats::{FileReport, Outcome, SkipReason};
use std::path::{Path, PathBuf};

/// Process a single file: detect, then convert and rewrite if the command asks for it.
///
/// Never fails as a whole; every error becomes an [`Outcome::Failed`] for this path.
pub fn process_file<C: Commit>(
    path: &Path,
    config: &Config,
    rewriter: &AtomicRewriter<C>,
) -> FileReport {
    let (content, truncated) = match detector::read_capped(path, config.max_bytes) {
        Ok(read) => read,
        Err(e) => {
            return FileReport {
                path: path.to_path_buf(),
                detection: None,
                outcome: Outcome::failed(&e),
            };
        }
    };

    let detection = detector::detect_buffer(&content, truncated);
    let outcome = match config.command {
        Command::Scan | Command::Verify => Outcome::Skipped {
            reason: SkipReason::Inspected,
        },
        Command::Convert(direction) => {
            convert(path, &content, &detection, direction, config.dry_run, rewriter)
        }
    };

    FileReport {
        path: PathBuf::from(path),
        detection: Some(detection),
        outcome,
    }
}

fn convert<C: Commit>(
    path: &Path,
    content: &[u8],
    detection: &Detection,
    direction: Direction,
    dry_run: bool,
    rewriter: &AtomicRewriter<C>,
) -> Outcome {
    // 切り詰めたバッファは絶対に書き戻さない
    if detection.truncated {
        log::warn!(
            "{}: larger than {} bytes, not converted",
            path.display(),
            detection.bytes_read
        );
        return Outcome::Skipped {
            reason: SkipReason::TooLarge,
        };
    }

    if detection.label != direction.source() {
        let reason = if detection.label == EncodingLabel::Unknown {
            SkipReason::UnknownEncoding
        } else {
            SkipReason::AlreadyTarget
        };
        return Outcome::Skipped { reason };
    }

    match rewrite_converted(path, content, direction, dry_run, rewriter) {
        // ASCII のみのファイルは変換しても同一バイト列になる
        Ok(false) => Outcome::Skipped {
            reason: SkipReason::AlreadyTarget,
        },
        Ok(true) => {
            log::info!("converted {} ({direction})", path.display());
            Outcome::Converted
        }
        Err(e) => {
            log::debug!("conversion of {} failed: {e}", path.display());
            Outcome::failed(&e)
        }
    }
}

fn rewrite_converted<C: Commit>(
    path: &Path,
    content: &[u8],
    direction: Direction,
    dry_run: bool,
    rewriter: &AtomicRewriter<C>,
) -> Result<bool> {
    let converted = codec::transform(content, direction)?;
    if converted == content {
        return Ok(false);
    }
    if !dry_run {
        rewriter.rewrite(path, &converted)?;
    }
    Ok(true)
}
