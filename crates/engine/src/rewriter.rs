//! Crash-safe in-place rewrites.
//!
//! Content goes to a sibling temporary file first and is then renamed over the
//! target, so the target is only ever observed fully old or fully new.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::RewriteError;

/// The commit step of a rewrite: move `from` onto `to` in one indivisible step.
pub trait Commit {
    /// # Errors
    /// Returns the underlying I/O error; the caller cleans up `from`.
    fn commit(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Commits with [`std::fs::rename`], atomic when both paths share a filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenameCommit;

impl Commit for RenameCommit {
    fn commit(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

/// Replaces file contents in place while preserving permission bits.
#[derive(Debug, Clone, Default)]
pub struct AtomicRewriter<C = RenameCommit> {
    commit: C,
}

impl AtomicRewriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commit: RenameCommit,
        }
    }
}

impl<C: Commit> AtomicRewriter<C> {
    /// Use a custom commit step.
    pub const fn with_commit(commit: C) -> Self {
        Self { commit }
    }

    /// Replace the contents of `path` with `content`.
    ///
    /// On success no temporary file remains and the permission bits of `path`
    /// are unchanged. On failure `path` is left byte-for-byte as it was.
    ///
    /// # Errors
    /// [`RewriteError::Stat`]/[`RewriteError::NotAFile`] before anything is
    /// written, [`RewriteError::Write`] while staging the temporary file and
    /// [`RewriteError::Rename`] if the commit fails.
    pub fn rewrite(&self, path: &Path, content: &[u8]) -> Result<(), RewriteError> {
        let meta = fs::metadata(path).map_err(|source| RewriteError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(RewriteError::NotAFile(path.to_path_buf()));
        }
        let permissions = meta.permissions();

        let tmp = temp_path_for(path);
        log::debug!("staging {} via {}", path.display(), tmp.display());

        let write_error = |source| RewriteError::Write {
            path: tmp.clone(),
            source,
        };
        // create_new: 既存ファイル（他プロセスの一時ファイル含む）は決して上書きしない
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .map_err(write_error)?;
        if let Err(source) = fill(file, content, permissions) {
            discard(&tmp);
            return Err(write_error(source));
        }

        if let Err(source) = self.commit.commit(&tmp, path) {
            discard(&tmp);
            return Err(RewriteError::Rename {
                path: path.to_path_buf(),
                source,
            });
        }

        sync_parent(path);
        Ok(())
    }
}

/// Sibling temporary path for `path`: `.{name}.{pid}.encfix.tmp`.
///
/// Same directory so the commit is a rename and never a cross-device copy.
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "file".into(), |n| n.to_string_lossy());
    let tmp_name = format!(".{name}.{}.encfix.tmp", std::process::id());
    path.with_file_name(tmp_name)
}

fn fill(mut file: File, content: &[u8], permissions: fs::Permissions) -> io::Result<()> {
    file.write_all(content)?;
    file.set_permissions(permissions)?;
    file.sync_all()
}

fn discard(tmp: &Path) {
    match fs::remove_file(tmp) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("failed to remove temporary file {}: {e}", tmp.display()),
    }
}

fn sync_parent(path: &Path) {
    // Unix ではディレクトリを sync して rename を永続化する（ベストエフォート）
    #[cfg(unix)]
    {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}
