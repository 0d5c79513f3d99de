//! 翻訳カタログ読み込みのエラー

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// ロケールディレクトリ・ファイルの読み込み失敗
    #[error("locale I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ロケールJSONが `{"key": "template"}` 形式でない
    #[error("invalid locale JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty language tag")]
    EmptyLanguageTag,
}

pub type Result<T> = std::result::Result<T, Error>;
