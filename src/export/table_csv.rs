//! CSV出力
//!
//! 表示中の列構成のまま、BOM付きUTF-8で書き出す。

use crate::error::{Result, SearchError};
use excel_search_common::{MessageId, ResultTable, Translator};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn write_csv(table: &ResultTable, translator: &Translator, output_path: &Path) -> Result<()> {
    if table.is_empty() {
        return Err(SearchError::NoResults);
    }

    let mut file = BufWriter::new(File::create(output_path)?);
    file.write_all(UTF8_BOM)?;

    let columns = table.columns();
    let mut writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(file);

    writer.write_record(table.headers(translator))?;

    // 単一ファイルモードではファイル名をコメント行として残す
    if let Some(file_name) = table.single_file_name() {
        let mut comment = vec![translator.t(MessageId::FileComment, &[("filename", &file_name)])];
        comment.resize(columns.len(), String::new());
        writer.write_record(&comment)?;
    }

    for row in &table.rows {
        writer.write_record(row.values(columns))?;
    }

    writer.flush()?;
    tracing::info!(path = %output_path.display(), rows = table.len(), "csv exported");
    Ok(())
}
