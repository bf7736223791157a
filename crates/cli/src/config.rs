// crates/cli/src/config.rs
use crate::args::{Args, CliCommand, ScanOptions};
pub use encfix_engine::config::{Config, ConfigBuilder, WalkOptions, WalkOptionsBuilder};
use encfix_engine::config::{DEFAULT_EXTENSIONS, DEFAULT_SKIP_DIRS};
use encfix_engine::detector::DEFAULT_MAX_BYTES;
use encfix_engine::encoding::Direction;
use encfix_engine::options::Command;
use std::path::PathBuf;

impl From<&CliCommand> for Command {
    fn from(command: &CliCommand) -> Self {
        match command {
            CliCommand::Scan(_) => Self::Scan,
            CliCommand::ToUtf8(_) => Self::Convert(Direction::ToUtf8),
            CliCommand::ToGb(_) => Self::Convert(Direction::ToGbk),
            CliCommand::Verify(_) => Self::Verify,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let dry_run = match &args.command {
            CliCommand::ToUtf8(c) | CliCommand::ToGb(c) => c.dry_run,
            CliCommand::Scan(_) | CliCommand::Verify(_) => false,
        };
        let root = args
            .command
            .target()
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        ConfigBuilder::default()
            .walk(walk_options_from_args(&args.scan, root))
            .command(Command::from(&args.command))
            .max_bytes(args.scan.max_size.map_or(DEFAULT_MAX_BYTES, |s| s.0))
            .dry_run(dry_run)
            .build()
            .expect("Failed to build config")
    }
}

fn walk_options_from_args(scan: &ScanOptions, root: PathBuf) -> WalkOptions {
    let extensions = if scan.ext.is_empty() {
        DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
    } else {
        scan.ext.clone()
    };

    let skip_dirs: Vec<String> = DEFAULT_SKIP_DIRS
        .iter()
        .map(ToString::to_string)
        .chain(scan.exclude_dir.iter().cloned())
        .collect();

    WalkOptionsBuilder::default()
        .roots(vec![root])
        .extensions(extensions)
        .skip_dirs(skip_dirs)
        .hidden(!scan.no_hidden)
        .git_ignore(scan.gitignore)
        .max_depth(scan.max_depth)
        .follow_links(scan.follow)
        .build()
        .expect("Failed to build walk options")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Config {
        let args = Args::try_parse_from(argv).unwrap();
        Config::from(&args)
    }

    #[test]
    fn defaults_to_current_directory() {
        let config = parse(&["encfix", "scan"]);
        assert_eq!(config.walk.roots, vec![PathBuf::from(".")]);
        assert_eq!(config.command, Command::Scan);
        assert_eq!(config.max_bytes, DEFAULT_MAX_BYTES);
        assert!(config.walk.hidden);
        assert!(!config.walk.git_ignore);
    }

    #[test]
    fn convert_commands_map_to_directions() {
        let config = parse(&["encfix", "to-utf8", "src", "--dry-run"]);
        assert_eq!(config.command, Command::Convert(Direction::ToUtf8));
        assert_eq!(config.walk.roots, vec![PathBuf::from("src")]);
        assert!(config.dry_run);

        let config = parse(&["encfix", "to-gbk"]);
        assert_eq!(config.command, Command::Convert(Direction::ToGbk));
        assert!(!config.dry_run);
    }

    #[test]
    fn scan_options_are_global() {
        let config = parse(&[
            "encfix",
            "verify",
            "proj",
            "--ext",
            "frm,bas",
            "--exclude-dir",
            "vendor",
            "--max-size",
            "1MiB",
            "--no-hidden",
        ]);
        assert_eq!(config.command, Command::Verify);
        assert_eq!(config.walk.extensions, vec!["frm", "bas"]);
        assert!(config.walk.skip_dirs.iter().any(|d| d == "vendor"));
        assert!(config.walk.skip_dirs.iter().any(|d| d == ".git"));
        assert_eq!(config.max_bytes, 1024 * 1024);
        assert!(!config.walk.hidden);
    }
}
