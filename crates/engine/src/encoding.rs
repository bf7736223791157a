use serde::Serialize;
use std::fmt;

/// Classification result for a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncodingLabel {
    /// UTF-8 (also covers pure 7-bit ASCII).
    #[serde(rename = "UTF-8")]
    Utf8,
    /// GBK, the legacy double-byte encoding being migrated away from.
    #[serde(rename = "GBK")]
    Gbk,
    /// Valid under neither encoding; never converted.
    Unknown,
}

impl EncodingLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Gbk => "GBK",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EncodingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way a conversion runs. Always chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// GBK -> UTF-8
    ToUtf8,
    /// UTF-8 -> GBK
    ToGbk,
}

impl Direction {
    /// Encoding a file must be classified as to be converted.
    #[must_use]
    pub const fn source(self) -> EncodingLabel {
        match self {
            Self::ToUtf8 => EncodingLabel::Gbk,
            Self::ToGbk => EncodingLabel::Utf8,
        }
    }

    #[must_use]
    pub const fn target(self) -> EncodingLabel {
        match self {
            Self::ToUtf8 => EncodingLabel::Utf8,
            Self::ToGbk => EncodingLabel::Gbk,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source(), self.target())
    }
}
