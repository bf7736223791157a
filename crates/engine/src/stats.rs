use crate::detector::Detection;
use crate::encoding::EncodingLabel;
use crate::error::{EngineError, RewriteError};
use crate::options::Command;
use serde::Serialize;
use std::path::PathBuf;

/// Why a file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The command only inspects files.
    Inspected,
    /// Already in the target encoding.
    AlreadyTarget,
    /// Valid under neither encoding.
    UnknownEncoding,
    /// Longer than the read cap; only a prefix was classified.
    TooLarge,
}

impl SkipReason {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Inspected => "inspected",
            Self::AlreadyTarget => "already in target encoding",
            Self::UnknownEncoding => "unknown encoding",
            Self::TooLarge => "exceeds size limit",
        }
    }
}

/// Failure category surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    Io,
    Decode,
    Encode,
    Rename,
}

impl From<&EngineError> for FailureKind {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::Codec(crate::error::CodecError::Encode { .. }) => Self::Encode,
            EngineError::Codec(_) => Self::Decode,
            EngineError::Rewrite(RewriteError::Rename { .. }) => Self::Rename,
            _ => Self::Io,
        }
    }
}

/// Per-file outcome. Exactly one per processed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    Converted,
    Skipped { reason: SkipReason },
    Failed { kind: FailureKind, reason: String },
}

impl Outcome {
    #[must_use]
    pub fn failed(error: &EngineError) -> Self {
        Self::Failed {
            kind: error.into(),
            reason: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// `None` when the file could not be read.
    pub detection: Option<Detection>,
    pub outcome: Outcome,
}

impl FileReport {
    #[must_use]
    pub fn label(&self) -> Option<EncodingLabel> {
        self.detection.as_ref().map(|d| d.label)
    }

    /// Unreadable, failed, or classified as neither encoding.
    #[must_use]
    pub fn is_issue(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
            || self.label().is_none_or(|l| l == EncodingLabel::Unknown)
    }
}

/// Result of one run. Counters are owned here rather than in any global.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub command: Command,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunReport {
    #[must_use]
    pub const fn new(command: Command, dry_run: bool) -> Self {
        Self {
            command,
            dry_run,
            files: Vec::new(),
            converted: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub fn push(&mut self, file: FileReport) {
        match file.outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(file);
    }

    /// Files `verify` should report.
    pub fn issues(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_issue())
    }
}
