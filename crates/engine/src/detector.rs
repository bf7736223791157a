use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::codec;
use crate::encoding::EncodingLabel;
use crate::error::{EngineError, Result};

/// Default per-file read cap used for classification (50 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Classify `buffer` as UTF-8, GBK or neither.
///
/// Both checks are strict. A buffer valid under both (pure ASCII, for
/// instance) is reported as UTF-8 so that already-converted files stay put.
#[must_use]
pub fn classify(buffer: &[u8]) -> EncodingLabel {
    let valid_utf8 = codec::decode_utf8(buffer).is_ok();
    if valid_utf8 {
        return EncodingLabel::Utf8;
    }

    if codec::decode_gbk(buffer).is_ok() {
        EncodingLabel::Gbk
    } else {
        EncodingLabel::Unknown
    }
}

/// Result of classifying a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub label: EncodingLabel,
    /// Bytes actually read and classified.
    pub bytes_read: u64,
    /// `true` when the file was longer than the read cap; `label` then only
    /// describes the prefix.
    pub truncated: bool,
}

/// Read at most `max_bytes` of the file at `path` and classify them.
///
/// # Errors
/// Returns [`EngineError::FileRead`] when the file cannot be opened or read.
pub fn detect_file(path: &Path, max_bytes: u64) -> Result<Detection> {
    read_capped(path, max_bytes).map(|(content, truncated)| detect_buffer(&content, truncated))
}

pub(crate) fn detect_buffer(content: &[u8], truncated: bool) -> Detection {
    Detection {
        label: classify(content),
        bytes_read: content.len() as u64,
        truncated,
    }
}

/// Read up to `max_bytes` from `path`, reporting whether more data followed.
pub(crate) fn read_capped(path: &Path, max_bytes: u64) -> Result<(Vec<u8>, bool)> {
    let file_read = |source| EngineError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_read)?;
    let mut content = Vec::new();
    // 上限 + 1 バイトまで読んで切り詰めの有無を判定する
    file.take(max_bytes.saturating_add(1))
        .read_to_end(&mut content)
        .map_err(file_read)?;

    let truncated = content.len() as u64 > max_bytes;
    if truncated {
        content.truncate(usize::try_from(max_bytes).unwrap_or(usize::MAX));
    }
    Ok((content, truncated))
}
