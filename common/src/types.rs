//! 検索結果の型定義
//!
//! CLIとデスクトップ版で共有される型:
//! - Match: セル単位のキーワード一致
//! - KeywordTally: キーワード別の出現回数（ファイル単位／全体）
//! - FileScan: 1ファイル分のスキャン結果
//! - SearchResults: ディレクトリ検索全体の結果

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// キーワード一致（1セル × 1キーワード）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub source_file: PathBuf,
    pub sheet_name: String,
    /// A1形式のセル座標
    pub cell_reference: String,
    /// 入力されたままのキーワード（件数注記は表示側で付与）
    pub keyword: String,
    pub cell_text: String,
}

impl Match {
    /// ファイル名部分
    pub fn file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// キーワードと出現回数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// キーワード別出現回数
///
/// 入力順を保持し、要求されたキーワードは未出現でも0件として必ず含む。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTally {
    entries: Vec<KeywordCount>,
}

impl KeywordTally {
    /// 全キーワード0件で初期化
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut tally = Self::default();
        for keyword in keywords {
            tally.add(keyword.as_ref(), 0);
        }
        tally
    }

    /// 出現回数を加算（未登録のキーワードは末尾に追加）
    pub fn add(&mut self, keyword: &str, count: usize) {
        match self.entries.iter_mut().find(|e| e.keyword == keyword) {
            Some(entry) => entry.count += count,
            None => self.entries.push(KeywordCount {
                keyword: keyword.to_string(),
                count,
            }),
        }
    }

    pub fn get(&self, keyword: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// 別の集計を合算
    pub fn merge(&mut self, other: &KeywordTally) {
        for entry in &other.entries {
            self.add(&entry.keyword, entry.count);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|e| (e.keyword.as_str(), e.count))
    }

    /// 全キーワードの合計
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 1ファイル分のスキャン結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileScan {
    pub path: PathBuf,
    pub matches: Vec<Match>,
    pub tally: KeywordTally,
    /// 読み込みに失敗した場合の原因（スキップ扱い）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileScan {
    pub fn new<S: AsRef<str>>(path: &Path, keywords: &[S]) -> Self {
        Self {
            path: path.to_path_buf(),
            matches: Vec::new(),
            tally: KeywordTally::new(keywords),
            error: None,
        }
    }

    /// 読み込み失敗: 一致なし・全キーワード0件
    pub fn failed<S: AsRef<str>>(path: &Path, keywords: &[S], error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(path, keywords)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// ディレクトリ検索全体の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub keywords: Vec<String>,
    /// 走査順のファイル結果（0件・失敗ファイルも含む）
    pub files: Vec<FileScan>,
    /// 全体集計
    pub tally: KeywordTally,
}

impl SearchResults {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            files: Vec::new(),
            tally: KeywordTally::new(keywords),
        }
    }

    /// ファイル結果を追加し、全体集計に合算
    pub fn push(&mut self, scan: FileScan) {
        self.tally.merge(&scan.tally);
        self.files.push(scan);
    }

    /// ファイル順に連結した一致一覧
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.files.iter().flat_map(|f| f.matches.iter())
    }

    pub fn match_count(&self) -> usize {
        self.files.iter().map(|f| f.matches.len()).sum()
    }

    pub fn files_scanned(&self) -> usize {
        self.files.len()
    }

    pub fn skipped_files(&self) -> impl Iterator<Item = &FileScan> {
        self.files.iter().filter(|f| f.is_failed())
    }

    pub fn file_tally(&self, path: &Path) -> Option<&KeywordTally> {
        self.files.iter().find(|f| f.path == path).map(|f| &f.tally)
    }

    /// 一致が存在し、すべて同じファイルに属する場合そのパス
    pub fn single_source_file(&self) -> Option<&Path> {
        let mut matches = self.matches();
        let first = matches.next()?.source_file.as_path();
        if matches.all(|m| m.source_file == first) {
            Some(first)
        } else {
            None
        }
    }
}
