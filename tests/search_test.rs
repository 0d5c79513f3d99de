//! キーワード検索の統合テスト
//!
//! rust_xlsxwriterで一時フォルダにブックを生成し、
//! ワークブック走査とディレクトリ集計の結果を検証する。

use excel_keyword_search::common::{ColumnSet, ResultTable, Translator};
use excel_keyword_search::scanner::{scan_directory, scan_workbook};
use rust_xlsxwriter::{ExcelDateTime, Format, Formula, Workbook, XlsxError};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// (シート名, [(行, 列, 文字列)]) からブックを生成
fn write_book(path: &Path, sheets: &[(&str, &[(u32, u16, &str)])]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    for (name, cells) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        for (row, col, text) in cells.iter() {
            worksheet.write_string(*row, *col, *text)?;
        }
    }
    workbook.save(path)?;
    Ok(())
}

fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// シナリオ1: 1ファイル・1キーワード
#[test]
fn test_single_file_single_keyword() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fruit.xlsx");
    write_book(&path, &[("Sheet1", &[(0, 0, "apple"), (0, 1, "apple pie")])]).unwrap();

    let results = scan_directory(dir.path(), &keywords(&["apple"]));

    assert_eq!(results.match_count(), 2);
    assert_eq!(results.tally.get("apple"), 2);

    let cells: Vec<_> = results.matches().map(|m| m.cell_reference.as_str()).collect();
    assert_eq!(cells, vec!["A1", "B1"]);

    let table = ResultTable::build(&results, &Translator::with_language("en"));
    assert_eq!(table.column_set, ColumnSet::SingleFile);
    for row in &table.rows {
        assert_eq!(row.keyword, "apple (total 2 occurrences)");
    }
}

/// 同一セル内の複数出現は1件の一致・集計は出現回数
#[test]
fn test_repeated_keyword_in_cell_is_one_match() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("repeat.xlsx");
    write_book(&path, &[("Data", &[(2, 3, "Q3 vs Q3 vs Q3"), (3, 3, "Q3")])]).unwrap();

    let scan = scan_workbook(&path, &keywords(&["Q3"]));

    assert!(!scan.is_failed());
    assert_eq!(scan.matches.len(), 2);
    assert_eq!(scan.tally.get("Q3"), 4);
    assert_eq!(scan.matches[0].cell_reference, "D3");
    assert_eq!(scan.matches[0].sheet_name, "Data");
    assert_eq!(scan.matches[0].cell_text, "Q3 vs Q3 vs Q3");
}

/// 大文字小文字を区別する
#[test]
fn test_match_is_case_sensitive() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("case.xlsx");
    write_book(&path, &[("Sheet1", &[(0, 0, "Apple"), (1, 0, "apple")])]).unwrap();

    let scan = scan_workbook(&path, &keywords(&["apple"]));
    assert_eq!(scan.matches.len(), 1);
    assert_eq!(scan.matches[0].cell_reference, "A2");
}

/// 並び順: シート → 行 → 列 → キーワード入力順
#[test]
fn test_match_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("order.xlsx");
    write_book(
        &path,
        &[
            ("First", &[(1, 1, "beta alpha"), (0, 2, "alpha")]),
            ("Second", &[(0, 0, "beta")]),
        ],
    )
    .unwrap();

    let scan = scan_workbook(&path, &keywords(&["beta", "alpha"]));
    let order: Vec<_> = scan
        .matches
        .iter()
        .map(|m| format!("{}!{}:{}", m.sheet_name, m.cell_reference, m.keyword))
        .collect();

    assert_eq!(
        order,
        vec!["First!C1:alpha", "First!B2:beta", "First!B2:alpha", "Second!A1:beta"]
    );
    assert_eq!(scan.tally.iter().collect::<Vec<_>>(), vec![("beta", 2), ("alpha", 2)]);
}

/// 数値セルは文字列化して検索する
#[test]
fn test_numeric_cells_are_searched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("numbers.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_number(0, 0, 2024.0).unwrap();
    worksheet.write_number(1, 0, 12.5).unwrap();
    workbook.save(&path).unwrap();

    let scan = scan_workbook(&path, &keywords(&["2024", "12.5"]));
    assert_eq!(scan.tally.get("2024"), 1);
    assert_eq!(scan.tally.get("12.5"), 1);
    assert_eq!(scan.matches[0].cell_text, "2024");
}

/// 数式は計算結果の値で検索し、数式文字列は対象外
#[test]
fn test_formula_uses_cached_value() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("formula.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .write_formula(0, 0, Formula::new("=\"Q\"&\"3\"").set_result("Q3"))
        .unwrap();
    workbook.save(&path).unwrap();

    let scan = scan_workbook(&path, &keywords(&["Q3", "&"]));
    assert_eq!(scan.tally.get("Q3"), 1);
    assert_eq!(scan.tally.get("&"), 0);
}

/// 日付セルは `YYYY-MM-DD HH:MM:SS` で検索する
#[test]
fn test_datetime_cells_are_searched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dates.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let date = ExcelDateTime::from_ymd(2024, 3, 15).unwrap();
    worksheet.write_string(0, 0, "due").unwrap();
    worksheet.write_datetime_with_format(2, 0, &date, &date_format).unwrap();
    workbook.save(&path).unwrap();

    let scan = scan_workbook(&path, &keywords(&["2024-03-15"]));
    assert_eq!(scan.tally.get("2024-03-15"), 1);
    assert_eq!(scan.matches.len(), 1);
    assert_eq!(scan.matches[0].cell_reference, "A3");
    assert_eq!(scan.matches[0].cell_text, "2024-03-15 00:00:00");
}

/// シナリオ2: 複数ファイル、片方のみ一致
#[test]
fn test_multiple_files_only_one_matches() {
    let dir = tempdir().expect("Failed to create temp dir");
    let hit = dir.path().join("q3_report.xlsx");
    let miss = dir.path().join("q2_report.xlsx");
    write_book(&hit, &[("Sheet1", &[(0, 0, "Q3 revenue"), (5, 1, "Q3 cost")])]).unwrap();
    write_book(&miss, &[("Sheet1", &[(0, 0, "Q2 revenue")])]).unwrap();

    let results = scan_directory(dir.path(), &keywords(&["Q3"]));

    assert_eq!(results.files_scanned(), 2);
    assert_eq!(results.match_count(), 2);
    assert!(results.matches().all(|m| m.source_file == hit));
    assert_eq!(results.file_tally(&miss).map(|t| t.get("Q3")), Some(0));
    assert_eq!(results.tally.get("Q3"), 2);
}

/// シナリオ3: 壊れたファイルが混在しても検索は継続
#[test]
fn test_corrupt_file_is_skipped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("good.xlsx");
    let bad = dir.path().join("bad.xlsx");
    write_book(&good, &[("Sheet1", &[(0, 0, "keyword here")])]).unwrap();
    std::fs::write(&bad, b"this is not a zip archive").unwrap();

    let results = scan_directory(dir.path(), &keywords(&["keyword"]));

    assert_eq!(results.files_scanned(), 2);
    assert_eq!(results.match_count(), 1);
    assert!(results.matches().all(|m| m.source_file == good));

    let skipped: Vec<PathBuf> = results.skipped_files().map(|f| f.path.clone()).collect();
    assert_eq!(skipped, vec![bad.clone()]);
    assert_eq!(results.file_tally(&bad).map(|t| t.get("keyword")), Some(0));
}

/// シナリオ4: 対象外拡張子は無視、拡張子の大文字小文字は無視
#[test]
fn test_extension_filter() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("notes.txt"), "Q3 Q3 Q3").unwrap();
    std::fs::write(dir.path().join("legacy.xls"), "Q3").unwrap();
    let upper = dir.path().join("UPPER.XLSX");
    write_book(&upper, &[("Sheet1", &[(0, 0, "Q3")])]).unwrap();

    let results = scan_directory(dir.path(), &keywords(&["Q3"]));

    assert_eq!(results.files_scanned(), 1);
    assert_eq!(results.tally.get("Q3"), 1);
    assert!(results.matches().all(|m| m.source_file == upper));
}

/// サブフォルダも再帰的に検索
#[test]
fn test_recursive_walk() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("2024").join("q3");
    std::fs::create_dir_all(&nested).unwrap();
    write_book(&dir.path().join("top.xlsx"), &[("Sheet1", &[(0, 0, "budget")])]).unwrap();
    write_book(&nested.join("deep.xlsx"), &[("Sheet1", &[(0, 0, "budget budget")])]).unwrap();

    let results = scan_directory(dir.path(), &keywords(&["budget"]));

    assert_eq!(results.files_scanned(), 2);
    assert_eq!(results.match_count(), 2);
    assert_eq!(results.tally.get("budget"), 3);

    // ファイル単位でまとまっている
    for file in &results.files {
        assert!(file.matches.iter().all(|m| m.source_file == file.path));
    }
}

/// 全体集計 = ファイル別集計の合計、一致セルはキーワードを含む
#[test]
fn test_global_tally_is_sum_of_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_book(&dir.path().join("a.xlsx"), &[("S", &[(0, 0, "red blue"), (1, 0, "red red")])]).unwrap();
    write_book(&dir.path().join("b.xlsx"), &[("S", &[(0, 0, "blue")]), ("T", &[(3, 3, "green")])]).unwrap();
    write_book(&dir.path().join("c.xlsx"), &[("S", &[(0, 0, "nothing")])]).unwrap();

    let words = keywords(&["red", "blue", "green", "purple"]);
    let results = scan_directory(dir.path(), &words);

    for keyword in &words {
        let sum: usize = results
            .files
            .iter()
            .map(|f| scan_workbook(&f.path, &words).tally.get(keyword))
            .sum();
        assert_eq!(results.tally.get(keyword), sum, "keyword {}", keyword);
    }
    assert_eq!(results.tally.get("red"), 3);
    assert_eq!(results.tally.get("purple"), 0);

    for m in results.matches() {
        assert!(m.cell_text.contains(&m.keyword));
        assert!(words.contains(&m.keyword));
    }
}

/// 同じフォルダを2回検索しても結果は同一
#[test]
fn test_search_is_idempotent() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_book(&dir.path().join("a.xlsx"), &[("S", &[(0, 0, "x y x")])]).unwrap();
    write_book(&dir.path().join("b.xlsx"), &[("S", &[(2, 2, "y")])]).unwrap();

    let words = keywords(&["x", "y"]);
    let first = scan_directory(dir.path(), &words);
    let second = scan_directory(dir.path(), &words);

    assert_eq!(first, second);
}

/// 空フォルダ: 一致なし・全キーワード0件
#[test]
fn test_empty_directory() {
    let dir = tempdir().expect("Failed to create temp dir");

    let results = scan_directory(dir.path(), &keywords(&["a", "b"]));

    assert_eq!(results.match_count(), 0);
    assert_eq!(results.files_scanned(), 0);
    assert_eq!(results.tally.iter().collect::<Vec<_>>(), vec![("a", 0), ("b", 0)]);
}
