use std::path::{Path, PathBuf};

use rfd::FileDialog;

pub fn pick_folder(start: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new();
    if !start.is_empty() && Path::new(start).is_dir() {
        dialog = dialog.set_directory(start);
    }
    dialog.pick_folder()
}

pub fn pick_csv_save_path(default_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_file_name(default_name)
        .save_file()
        .map(|path| ensure_csv_extension(&path))
}

fn ensure_csv_extension(path: &Path) -> PathBuf {
    let has_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if has_csv {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_csv_extension() {
        assert_eq!(ensure_csv_extension(Path::new("out.csv")), PathBuf::from("out.csv"));
        assert_eq!(ensure_csv_extension(Path::new("out.CSV")), PathBuf::from("out.CSV"));
        assert_eq!(ensure_csv_extension(Path::new("out")), PathBuf::from("out.csv"));
    }
}
