use crate::detector::DEFAULT_MAX_BYTES;
use crate::options::Command;
use derive_builder::Builder;
use std::path::PathBuf;

/// Default extension allow-list (VB6 project sources plus common text formats).
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "vbp", "frm", "bas", "cls", "ctl", "txt", "ini", "cfg", "md", "json", "xml",
];

/// Directories pruned from every walk.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    ".svn",
    "bin",
    "obj",
    ".idea",
    ".vscode",
    "node_modules",
];

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    /// Allowed extensions, compared case-insensitively without the dot.
    #[builder(default = "default_extensions()")]
    pub extensions: Vec<String>,
    /// Directory names to prune, compared case-insensitively.
    #[builder(default = "default_skip_dirs()")]
    pub skip_dirs: Vec<String>,
    #[builder(default = "true")]
    pub hidden: bool,
    #[builder(default)]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            extensions: default_extensions(),
            skip_dirs: default_skip_dirs(),
            hidden: true,
            git_ignore: false,
            max_depth: None,
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default = "Command::Scan")]
    pub command: Command,
    /// Per-file read cap used for classification.
    #[builder(default = "DEFAULT_MAX_BYTES")]
    pub max_bytes: u64,
    /// Report what would be converted without rewriting anything.
    #[builder(default)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            command: Command::Scan,
            max_bytes: DEFAULT_MAX_BYTES,
            dry_run: false,
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}

fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(ToString::to_string).collect()
}
