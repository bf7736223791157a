use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 1 ファイル 1 行 + サマリ
    #[default]
    Text,
    /// 実行結果全体を JSON で出力
    Json,
}
