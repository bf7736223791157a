use crate::config::WalkOptions;
use crate::error::Result;
use ignore::WalkBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Bytes inspected by the binary-content heuristic.
pub const TEXT_SNIFF_LEN: u64 = 1024;

/// Recursive directory walk producing candidate text files.
///
/// Directories named in `skip_dirs` are pruned, files must carry an allowed
/// extension and their first [`TEXT_SNIFF_LEN`] bytes must contain no NUL.
/// Entries are sorted by file name, so the result is stable between runs.
///
/// # Errors
/// Any traversal error (missing root, unreadable directory, symlink loop)
/// aborts the walk; a partial file list is never returned.
pub fn collect_files(options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let Some((first, rest)) = options.roots.split_first() else {
        return Ok(Vec::new());
    };

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }

    builder
        .standard_filters(false)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .git_exclude(options.git_ignore)
        .ignore(options.git_ignore)
        .parents(options.git_ignore)
        .require_git(false)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));

    let skip_dirs: Vec<String> = options
        .skip_dirs
        .iter()
        .map(|d| d.to_ascii_lowercase())
        .collect();
    builder.filter_entry(move |entry| {
        // ルート自体は常に走査する
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return true;
        }
        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        !skip_dirs.contains(&name)
    });

    let extensions = normalize_extensions(&options.extensions);
    let mut files = Vec::new();
    for result in builder.build() {
        let entry = result?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if has_allowed_extension(path, &extensions) && is_probably_text(path) {
            files.push(entry.into_path());
        }
    }

    log::debug!("walk produced {} candidate files", files.len());
    Ok(files)
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Heuristic text check: no NUL byte in the first [`TEXT_SNIFF_LEN`] bytes.
///
/// Unreadable files count as binary so they are never handed to a rewrite.
#[must_use]
pub fn is_probably_text(path: &Path) -> bool {
    let mut head = Vec::with_capacity(TEXT_SNIFF_LEN as usize);
    let read = File::open(path).and_then(|f| f.take(TEXT_SNIFF_LEN).read_to_end(&mut head));
    match read {
        Ok(_) => !head.contains(&0),
        Err(e) => {
            log::debug!("skipping unreadable file {}: {e}", path.display());
            false
        }
    }
}
