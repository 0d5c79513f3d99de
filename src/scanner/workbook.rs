//! ワークブック単位のキーワード走査
//!
//! calamineで値のみ（数式はキャッシュ済みの計算結果）を読み、
//! シート順 → 行順 → 列順 → キーワード入力順に一致を収集する。
//! 読み込みに失敗したファイルは警告ログを出し、0件として扱う。

use calamine::{open_workbook, Data, DataType, Reader, Xlsx, XlsxError};
use excel_search_common::{FileScan, Match};
use std::path::Path;

/// 1ファイルを走査する
///
/// 失敗しても呼び出し側へはエラーを返さない。
pub fn scan_workbook<S: AsRef<str>>(path: &Path, keywords: &[S]) -> FileScan {
    match try_scan_workbook(path, keywords) {
        Ok(scan) => scan,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "skipping unreadable workbook");
            FileScan::failed(path, keywords, e.to_string())
        }
    }
}

fn try_scan_workbook<S: AsRef<str>>(path: &Path, keywords: &[S]) -> Result<FileScan, XlsxError> {
    // ワークブックは関数終了時に閉じられる
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut scan = FileScan::new(path, keywords);

    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

        for (row, col, cell) in range.cells() {
            let Some(text) = cell_text(cell) else {
                continue;
            };

            for keyword in keywords {
                let keyword = keyword.as_ref();
                if keyword.is_empty() {
                    continue;
                }
                let count = text.matches(keyword).count();
                if count == 0 {
                    continue;
                }
                scan.tally.add(keyword, count);
                scan.matches.push(Match {
                    source_file: path.to_path_buf(),
                    sheet_name: sheet_name.clone(),
                    cell_reference: cell_reference(row_offset + row as u32, col_offset + col as u32),
                    keyword: keyword.to_string(),
                    cell_text: text.clone(),
                });
            }
        }
    }

    tracing::debug!(
        file = %path.display(),
        matches = scan.matches.len(),
        "workbook scanned"
    );
    Ok(scan)
}

/// セル値の文字列表現（空セルはNone）
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::DateTime(_) => Some(
            cell.as_datetime()
                .map(|dt| dt.to_string())
                .unwrap_or_else(|| cell.to_string()),
        ),
        other => Some(other.to_string()),
    }
}

/// 0始まりの行・列をA1形式に変換（例: (0, 26) -> "AA1"）
pub fn cell_reference(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

fn column_letters(mut col: u32) -> String {
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters
}
