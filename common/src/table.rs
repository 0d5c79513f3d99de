//! 結果テーブル
//!
//! 検索結果を表示・CSV出力用の行に変換する。
//! 一致がすべて同じファイルに属する場合は単一ファイルモードとなり、
//! ファイル名・ファイルパス列を省く。

use crate::i18n::{MessageId, Translator};
use crate::types::SearchResults;
use std::path::PathBuf;

/// 表示列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FileName,
    Sheet,
    Cell,
    Keyword,
    Content,
    FilePath,
}

impl Column {
    pub fn header_id(self) -> MessageId {
        match self {
            Column::FileName => MessageId::FileName,
            Column::Sheet => MessageId::Worksheet,
            Column::Cell => MessageId::Cell,
            Column::Keyword => MessageId::Keyword,
            Column::Content => MessageId::Content,
            Column::FilePath => MessageId::FilePath,
        }
    }

    /// GUI表示時の列幅の目安
    pub fn width(self) -> f32 {
        match self {
            Column::Content | Column::FilePath => 300.0,
            _ => 150.0,
        }
    }
}

/// 列構成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSet {
    SingleFile,
    #[default]
    MultiFile,
}

const SINGLE_FILE_COLUMNS: &[Column] = &[Column::Sheet, Column::Cell, Column::Keyword, Column::Content];

const MULTI_FILE_COLUMNS: &[Column] = &[
    Column::FileName,
    Column::Sheet,
    Column::Cell,
    Column::Keyword,
    Column::Content,
    Column::FilePath,
];

impl ColumnSet {
    pub fn columns(self) -> &'static [Column] {
        match self {
            ColumnSet::SingleFile => SINGLE_FILE_COLUMNS,
            ColumnSet::MultiFile => MULTI_FILE_COLUMNS,
        }
    }

    pub fn for_results(results: &SearchResults) -> Self {
        if results.single_source_file().is_some() {
            ColumnSet::SingleFile
        } else {
            ColumnSet::MultiFile
        }
    }
}

/// 1行分の表示値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub file_name: String,
    pub sheet_name: String,
    pub cell_reference: String,
    /// キーワード + ファイル内合計件数の注記
    pub keyword: String,
    pub cell_text: String,
    pub file_path: String,
    pub source_file: PathBuf,
}

impl ResultRow {
    pub fn value(&self, column: Column) -> &str {
        match column {
            Column::FileName => &self.file_name,
            Column::Sheet => &self.sheet_name,
            Column::Cell => &self.cell_reference,
            Column::Keyword => &self.keyword,
            Column::Content => &self.cell_text,
            Column::FilePath => &self.file_path,
        }
    }

    pub fn values(&self, columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| self.value(*c)).collect()
    }
}

/// 表示用テーブル
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub column_set: ColumnSet,
    pub rows: Vec<ResultRow>,
    pub status: String,
}

impl ResultTable {
    pub fn build(results: &SearchResults, translator: &Translator) -> Self {
        let rows = results
            .matches()
            .map(|m| {
                let total = results
                    .file_tally(&m.source_file)
                    .map(|tally| tally.get(&m.keyword))
                    .unwrap_or(0);
                ResultRow {
                    file_name: m.file_name(),
                    sheet_name: m.sheet_name.clone(),
                    cell_reference: m.cell_reference.clone(),
                    keyword: format!(
                        "{}{}",
                        m.keyword,
                        translator.t(MessageId::TotalOccurrences, &[("count", &total)])
                    ),
                    cell_text: m.cell_text.clone(),
                    file_path: m.source_file.display().to_string(),
                    source_file: m.source_file.clone(),
                }
            })
            .collect();

        Self {
            column_set: ColumnSet::for_results(results),
            rows,
            status: status_line(results, translator),
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        self.column_set.columns()
    }

    pub fn headers(&self, translator: &Translator) -> Vec<String> {
        self.columns()
            .iter()
            .map(|c| translator.text(c.header_id()))
            .collect()
    }

    /// 単一ファイルモードのときのファイル名
    pub fn single_file_name(&self) -> Option<&str> {
        match self.column_set {
            ColumnSet::SingleFile => self.rows.first().map(|r| r.file_name.as_str()),
            ColumnSet::MultiFile => None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// ステータス行: 件数 | (ファイル名) | キーワード別件数 | (スキップ数)
pub fn status_line(results: &SearchResults, translator: &Translator) -> String {
    let mut parts = vec![translator.t(MessageId::SearchComplete, &[("count", &results.match_count())])];

    if let Some(path) = results.single_source_file() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        parts.push(translator.t(MessageId::FileInfo, &[("filename", &file_name)]));
    }

    for (keyword, count) in results.tally.iter() {
        parts.push(translator.t(MessageId::KeywordStats, &[("keyword", &keyword), ("count", &count)]));
    }

    let skipped = results.skipped_files().count();
    if skipped > 0 {
        parts.push(translator.t(MessageId::SkippedFiles, &[("count", &skipped)]));
    }

    parts.join(" | ")
}
