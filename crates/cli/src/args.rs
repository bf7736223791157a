use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::options::OutputFormat;
use crate::parsers::SizeArg;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "encfix",
    version = crate::VERSION,
    about = "UTF-8 / GBK エンコーディングの判定と一括変換",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: CliCommand,

    #[command(flatten)]
    pub scan: ScanOptions,

    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "text", global = true, help_heading = "出力")]
    pub format: OutputFormat,

    /// ログの詳細度（-v: info, -vv: debug）
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "出力")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// 各ファイルのエンコーディングを表示（変更なし）
    Scan(Target),
    /// GBK のファイルを UTF-8 に変換
    #[command(name = "to-utf8")]
    ToUtf8(ConvertArgs),
    /// UTF-8 のファイルを GBK に変換
    #[command(name = "to-gb", alias = "to-gbk")]
    ToGb(ConvertArgs),
    /// UTF-8 でも GBK でもないファイルを報告
    Verify(Target),
}

impl CliCommand {
    #[must_use]
    pub const fn target(&self) -> &Target {
        match self {
            Self::Scan(t) | Self::Verify(t) => t,
            Self::ToUtf8(c) | Self::ToGb(c) => &c.target,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct Target {
    /// 対象ディレクトリ（省略時はカレントディレクトリ）
    #[arg(value_hint = ValueHint::AnyPath)]
    pub path: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub target: Target,

    /// 書き換えずに変換対象だけを表示
    #[arg(long)]
    pub dry_run: bool,
}

/// Walk and read options shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScanOptions {
    /// 対象拡張子（カンマ区切り/複数指定可, 例: --ext frm,bas）。既定の一覧を置き換えます
    #[arg(long, value_delimiter = ',', global = true, help_heading = "走査")]
    pub ext: Vec<String>,

    /// 追加で除外するディレクトリ名（カンマ区切り/複数指定可）
    #[arg(long, value_delimiter = ',', global = true, help_heading = "走査")]
    pub exclude_dir: Vec<String>,

    /// 判定時に読み込む最大サイズ (例: 10K, 50MiB)。超過したファイルは変換しません
    #[arg(long, global = true, help_heading = "走査")]
    pub max_size: Option<SizeArg>,

    /// 最大探索深さ
    #[arg(long, global = true, help_heading = "走査")]
    pub max_depth: Option<usize>,

    /// .gitignore / .ignore を尊重する
    #[arg(long, global = true, help_heading = "走査")]
    pub gitignore: bool,

    /// 隠しファイル・隠しディレクトリを除外する
    #[arg(long, global = true, help_heading = "走査")]
    pub no_hidden: bool,

    /// シンボリックリンクを辿る
    #[arg(long, global = true, help_heading = "走査")]
    pub follow: bool,
}
