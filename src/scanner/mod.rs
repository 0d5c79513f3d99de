mod workbook;

pub use workbook::{cell_reference, cell_text, scan_workbook};

use crate::error::{Result, SearchError};
use excel_search_common::{parse_keywords, SearchResults};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// 拡張子がxlsxか（大文字小文字は区別しない）
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SPREADSHEET_EXTENSION))
        .unwrap_or(false)
}

/// ディレクトリ以下のxlsxをすべて走査する
pub fn scan_directory(directory: &Path, keywords: &[String]) -> SearchResults {
    scan_directory_with_progress(directory, keywords, |_| {})
}

/// 走査前に対象ファイルごとに `on_file` を呼ぶ版
///
/// サブフォルダも無制限に再帰する。ファイルは1つずつ走査順に処理し、
/// 並び替えは行わない。
pub fn scan_directory_with_progress<F>(directory: &Path, keywords: &[String], mut on_file: F) -> SearchResults
where
    F: FnMut(&Path),
{
    let mut results = SearchResults::new(keywords);

    for entry in WalkDir::new(directory).into_iter().filter_map(|e| match e {
        Ok(entry) => Some(entry),
        Err(err) => {
            tracing::debug!(error = %err, "walk entry skipped");
            None
        }
    }) {
        let path = entry.path();

        if !path.is_file() || !is_spreadsheet(path) {
            continue;
        }

        on_file(path);
        results.push(scan_workbook(path, keywords));
    }

    tracing::info!(
        directory = %directory.display(),
        files = results.files_scanned(),
        matches = results.match_count(),
        "search finished"
    );
    results
}

/// 検索前の入力チェック
pub fn validate_search_input(directory: &str, keywords_input: &str) -> Result<(PathBuf, Vec<String>)> {
    let directory = directory.trim();
    let path = PathBuf::from(directory);
    if directory.is_empty() || !path.is_dir() {
        return Err(SearchError::InvalidPath(directory.to_string()));
    }

    let keywords = parse_keywords(keywords_input);
    if keywords.is_empty() {
        return Err(SearchError::NoKeywords);
    }

    Ok((path, keywords))
}

/// 入力チェック後にディレクトリ検索
pub fn search(directory: &str, keywords_input: &str) -> Result<SearchResults> {
    let (path, keywords) = validate_search_input(directory, keywords_input)?;
    Ok(scan_directory(&path, &keywords))
}
