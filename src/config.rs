use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const AUTO_LANGUAGE: &str = "auto";
const DEFAULT_WINDOW_GEOMETRY: &str = "1000x550";

/// ユーザー設定
///
/// 欠けているキーは既定値で補い、未知のキーは無視する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `auto` または言語タグ
    pub language: String,
    /// `<幅>x<高さ>`
    pub window_geometry: String,
    pub last_search_path: String,
    pub theme: String,

    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 既定の場所から読み込み
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Ok(Self::load_from(&config_path))
    }

    /// 指定パスから読み込み（読めない場合は警告を出して既定値）
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match std::fs::read_to_string(path)
                .map_err(SearchError::from)
                .and_then(|content| Ok(serde_json::from_str::<Config>(&content)?))
            {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to load config");
                    Self::default_config()
                }
            }
        } else {
            Self::default_config()
        };
        config.path = Some(path.to_path_buf());
        config
    }

    /// ファイルに紐付かない設定（保存しない）
    pub fn in_memory() -> Self {
        Self::default_config()
    }

    pub fn save(&self) -> Result<()> {
        let Some(config_path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        tracing::debug!(path = %config_path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| SearchError::Config("設定ディレクトリが見つかりません".into()))?;
        Ok(base.join("excel-keyword-search").join("config.json"))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn default_config() -> Self {
        Self {
            language: AUTO_LANGUAGE.into(),
            window_geometry: DEFAULT_WINDOW_GEOMETRY.into(),
            last_search_path: String::new(),
            theme: "default".into(),
            path: None,
        }
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        if self.language == language {
            return Ok(());
        }
        self.language = language.to_string();
        self.save()
    }

    pub fn set_window_geometry(&mut self, geometry: &str) -> Result<()> {
        if self.window_geometry == geometry {
            return Ok(());
        }
        self.window_geometry = geometry.to_string();
        self.save()
    }

    pub fn set_window_size(&mut self, width: f32, height: f32) -> Result<()> {
        let geometry = format!("{}x{}", width.round() as u32, height.round() as u32);
        self.set_window_geometry(&geometry)
    }

    pub fn set_last_search_path(&mut self, path: &str) -> Result<()> {
        if self.last_search_path == path {
            return Ok(());
        }
        self.last_search_path = path.to_string();
        self.save()
    }

    /// ウィンドウサイズ（解析できなければ既定値）
    pub fn window_size(&self) -> (f32, f32) {
        parse_geometry(&self.window_geometry)
            .or_else(|| parse_geometry(DEFAULT_WINDOW_GEOMETRY))
            .unwrap_or((1000.0, 550.0))
    }
}

/// `1000x550` や `1000x550+10+20` 形式を解析
fn parse_geometry(geometry: &str) -> Option<(f32, f32)> {
    let size = geometry.split('+').next()?;
    let (w, h) = size.split_once('x')?;
    let width: u32 = w.trim().parse().ok()?;
    let height: u32 = h.trim().parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width as f32, height as f32))
}
