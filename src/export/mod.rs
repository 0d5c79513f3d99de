pub mod table_csv;

pub use table_csv::write_csv;

use std::path::{Path, PathBuf};

/// 出力先がディレクトリなら既定のファイル名を付け、拡張子がなければ `.csv` を補う
pub fn output_path_for_csv(output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(default_file_name())
    } else if output.extension().is_none() {
        output.with_extension("csv")
    } else {
        output.to_path_buf()
    }
}

/// `search_results_YYYYmmdd_HHMMSS.csv`
pub fn default_file_name() -> String {
    format!("search_results_{}.csv", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}
