use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::EncodingLabel;

/// Run-level and per-file errors raised by the engine.
///
/// Only [`EngineError::Walk`] and [`EngineError::Config`] abort a run; every other
/// variant is recorded against the offending file and processing continues.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Strict transcoding failures. Neither variant ever carries partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid {encoding} byte sequence at offset {offset}")]
    Decode {
        encoding: EncodingLabel,
        offset: usize,
    },

    #[error("character {character:?} (U+{:04X}) at offset {offset} has no {encoding} mapping", code_point(.character))]
    Encode {
        encoding: EncodingLabel,
        character: char,
        offset: usize,
    },

    #[error("input of {0} bytes is too large to transcode")]
    Overflow(usize),
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// Failures of the atomic rewrite protocol, tagged by the step that failed.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("stat failed for '{path}': {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a regular file")]
    NotAFile(PathBuf),

    #[error("write to temporary file '{path}' failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("replacing '{path}' failed: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
