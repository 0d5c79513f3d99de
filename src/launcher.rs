use crate::error::{Result, SearchError};
use std::path::Path;

/// OS既定のアプリケーションでファイルを開く
pub fn open_source_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SearchError::FileNotFound(path.display().to_string()));
    }

    opener::open(path).map_err(|e| SearchError::OpenFile(e.to_string()))?;
    tracing::info!(path = %path.display(), "opened with default application");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let result = open_source_file(Path::new("/nonexistent/report.xlsx"));
        assert!(matches!(result, Err(SearchError::FileNotFound(_))));
    }
}
