//! Excel Keyword Search Common Library
//!
//! CLIとデスクトップ版で共有される型・翻訳・結果テーブル

pub mod types;
pub mod error;
pub mod i18n;
pub mod keywords;
pub mod table;

pub use types::{FileScan, KeywordCount, KeywordTally, Match, SearchResults};
pub use error::{Error, Result};
pub use i18n::{detect_system_language, language_name, MessageId, Translator};
pub use keywords::parse_keywords;
pub use table::{Column, ColumnSet, ResultRow, ResultTable};
