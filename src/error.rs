use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("検索パスが不正です: {0}")]
    InvalidPath(String),

    #[error("キーワードが入力されていません")]
    NoKeywords,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("出力する検索結果がありません")]
    NoResults,

    #[error("行番号が範囲外です: {0}")]
    RowOutOfRange(usize),

    #[error("ファイルを開けません: {0}")]
    OpenFile(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] excel_search_common::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
