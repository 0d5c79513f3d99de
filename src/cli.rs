use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "excel-search")]
#[command(about = "フォルダ内のExcelファイルをキーワードで横断検索", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 表示言語（今回の実行のみ。例: en, zh_CN）
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// 設定ファイルのパス
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 追加のロケールJSONディレクトリ
    #[arg(long, global = true)]
    pub locales: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ以下のxlsxをキーワード検索
    Search {
        /// 検索するフォルダ
        #[arg(required = true)]
        folder: String,

        /// カンマ区切りのキーワード
        #[arg(required = true)]
        keywords: String,

        /// 結果をCSVに出力（ディレクトリ指定時は自動命名）
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// 結果をJSONに出力
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 言語を設定（auto / en / zh_CN）
        #[arg(long)]
        set_language: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 利用可能な言語を一覧
    Languages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["excel-search", "search", "/data", "Q3,total", "--export", "out.csv", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Search { folder, keywords, export, json } => {
                assert_eq!(folder, "/data");
                assert_eq!(keywords, "Q3,total");
                assert_eq!(export, Some(PathBuf::from("out.csv")));
                assert!(json.is_none());
            }
            _ => panic!("search expected"),
        }
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::parse_from(["excel-search", "--lang", "en", "config", "--set-language", "zh_CN"]);
        assert_eq!(cli.lang.as_deref(), Some("en"));
        assert!(matches!(
            cli.command,
            Commands::Config { set_language: Some(ref l), show: false } if l == "zh_CN"
        ));
    }

    #[test]
    fn test_search_requires_keywords() {
        assert!(Cli::try_parse_from(["excel-search", "search", "/data"]).is_err());
    }
}
