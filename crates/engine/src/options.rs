use crate::encoding::Direction;
use serde::Serialize;

/// What a run does with each candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Classify only.
    Scan,
    /// Convert files in `direction.source()` and rewrite them in place.
    Convert(Direction),
    /// Classify and flag files that are neither UTF-8 nor GBK.
    Verify,
}
