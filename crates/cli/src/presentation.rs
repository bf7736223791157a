// crates/cli/src/presentation.rs
use encfix_engine::config::Config;
use encfix_engine::encoding::EncodingLabel;
use encfix_engine::options::Command;
use encfix_engine::stats::{FileReport, Outcome, RunReport, SkipReason};
use std::path::Path;

/// First line printed before any per-file output.
#[must_use]
pub fn header(config: &Config) -> String {
    let root = config
        .walk
        .roots
        .first()
        .map_or_else(String::new, |p| p.display().to_string());
    match config.command {
        Command::Scan => format!("Scanning directory: {root}"),
        Command::Verify => format!("Verifying files in: {root}"),
        Command::Convert(direction) if config.dry_run => {
            format!("[dry-run] Converting files to {} in: {root}", direction.target())
        }
        Command::Convert(direction) => {
            format!("Converting files to {} in: {root}", direction.target())
        }
    }
}

/// One line for a processed file, or `None` when the file is not worth mentioning.
#[must_use]
pub fn file_line(file: &FileReport, command: Command, dry_run: bool) -> Option<String> {
    let path = file.path.display();

    if let Outcome::Failed { reason, .. } = &file.outcome {
        return Some(match command {
            Command::Convert(direction) => format!(
                "Converting {} ({direction})... Failed: {reason}",
                base_name(&file.path)
            ),
            Command::Scan | Command::Verify => format!("[Error] {path}: {reason}"),
        });
    }

    let detection = file.detection.as_ref()?;
    let note = if detection.truncated { " (truncated)" } else { "" };

    match command {
        Command::Scan => Some(format!("[{}] {path}{note}", detection.label)),
        Command::Verify => {
            (detection.label == EncodingLabel::Unknown).then(|| format!("[UNKNOWN] {path}{note}"))
        }
        Command::Convert(direction) => match file.outcome {
            Outcome::Converted => {
                let verb = if dry_run { "Would convert" } else { "Converting" };
                let done = if dry_run { "" } else { "... Done" };
                Some(format!(
                    "{verb} {} ({direction}){done}",
                    base_name(&file.path)
                ))
            }
            Outcome::Skipped {
                reason: reason @ (SkipReason::TooLarge | SkipReason::UnknownEncoding),
            } => Some(format!("[Skipped] {path}: {}", reason.describe())),
            _ => None,
        },
    }
}

/// Closing summary line(s).
#[must_use]
pub fn summary(report: &RunReport) -> String {
    match report.command {
        Command::Scan => format!("\nScanned {} files.", report.files.len()),
        Command::Verify => match report.issues().count() {
            0 => "All files have valid encodings (UTF-8 or GBK).".to_string(),
            n => format!("Found {n} files with issues."),
        },
        Command::Convert(_) => {
            let converted = if report.dry_run {
                "would be converted"
            } else {
                "converted"
            };
            format!(
                "\nSummary: {} {converted}, {} skipped, {} failed",
                report.converted, report.skipped, report.failed
            )
        }
    }
}

/// The whole report as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encfix_engine::detector::Detection;
    use encfix_engine::encoding::Direction;
    use encfix_engine::stats::FailureKind;
    use std::path::PathBuf;

    fn file(label: Option<EncodingLabel>, outcome: Outcome) -> FileReport {
        FileReport {
            path: PathBuf::from("proj/Form1.frm"),
            detection: label.map(|label| Detection {
                label,
                bytes_read: 4,
                truncated: false,
            }),
            outcome,
        }
    }

    const INSPECTED: Outcome = Outcome::Skipped {
        reason: SkipReason::Inspected,
    };

    #[test]
    fn scan_lines_show_the_label() {
        let f = file(Some(EncodingLabel::Gbk), INSPECTED);
        assert_eq!(
            file_line(&f, Command::Scan, false).unwrap(),
            format!("[GBK] {}", Path::new("proj/Form1.frm").display())
        );
    }

    #[test]
    fn verify_only_mentions_unknown_files() {
        let ok = file(Some(EncodingLabel::Utf8), INSPECTED);
        let bad = file(Some(EncodingLabel::Unknown), INSPECTED);
        assert!(file_line(&ok, Command::Verify, false).is_none());
        assert!(
            file_line(&bad, Command::Verify, false)
                .unwrap()
                .starts_with("[UNKNOWN]")
        );
    }

    #[test]
    fn convert_lines() {
        let command = Command::Convert(Direction::ToUtf8);
        let converted = file(Some(EncodingLabel::Gbk), Outcome::Converted);
        assert_eq!(
            file_line(&converted, command, false).unwrap(),
            "Converting Form1.frm (GBK -> UTF-8)... Done"
        );
        assert_eq!(
            file_line(&converted, command, true).unwrap(),
            "Would convert Form1.frm (GBK -> UTF-8)"
        );

        let skipped = file(
            Some(EncodingLabel::Utf8),
            Outcome::Skipped {
                reason: SkipReason::AlreadyTarget,
            },
        );
        assert!(file_line(&skipped, command, false).is_none());

        let failed = file(
            Some(EncodingLabel::Gbk),
            Outcome::Failed {
                kind: FailureKind::Rename,
                reason: "disk full".into(),
            },
        );
        assert_eq!(
            file_line(&failed, command, false).unwrap(),
            "Converting Form1.frm (GBK -> UTF-8)... Failed: disk full"
        );
    }

    #[test]
    fn summaries() {
        let mut report = RunReport::new(Command::Convert(Direction::ToGbk), false);
        report.push(file(Some(EncodingLabel::Utf8), Outcome::Converted));
        assert_eq!(summary(&report), "\nSummary: 1 converted, 0 skipped, 0 failed");

        let mut report = RunReport::new(Command::Verify, false);
        report.push(file(Some(EncodingLabel::Utf8), INSPECTED));
        assert_eq!(
            summary(&report),
            "All files have valid encodings (UTF-8 or GBK)."
        );
        report.push(file(Some(EncodingLabel::Unknown), INSPECTED));
        assert_eq!(summary(&report), "Found 1 files with issues.");
    }

    #[test]
    fn json_contains_counters_and_labels() {
        let mut report = RunReport::new(Command::Scan, false);
        report.push(file(Some(EncodingLabel::Gbk), INSPECTED));
        let value: serde_json::Value = serde_json::from_str(&json(&report).unwrap()).unwrap();
        assert_eq!(value["files"][0]["detection"]["label"], "GBK");
        assert_eq!(value["files"][0]["outcome"]["status"], "skipped");
        assert_eq!(value["skipped"], 1);
    }
}
