//! 検索セッション
//!
//! 設定・翻訳器・直近の検索結果をまとめて保持するアプリケーション状態。
//! CLIとデスクトップ版の双方がこれを所有して使う。

use crate::config::{Config, AUTO_LANGUAGE};
use crate::error::{Result, SearchError};
use crate::export;
use crate::launcher;
use crate::scanner;
use excel_search_common::{detect_system_language, MessageId, ResultTable, SearchResults, Translator};
use std::path::{Path, PathBuf};

pub struct SearchSession {
    config: Config,
    translator: Translator,
    results: Option<SearchResults>,
    table: ResultTable,
}

impl SearchSession {
    pub fn new(config: Config) -> Self {
        let mut translator = Translator::new();
        let preferred = resolve_language(&config.language);
        if !translator.set_language(&preferred) {
            tracing::warn!(language = %preferred, "unsupported language, using system default");
            translator.set_language(detect_system_language());
        }

        Self {
            config,
            translator,
            results: None,
            table: ResultTable::default(),
        }
    }

    /// 追加のロケールディレクトリを読み込む
    pub fn load_locales(&mut self, dir: &Path) -> Result<usize> {
        let loaded = self.translator.load_locale_dir(dir)?;
        let preferred = resolve_language(&self.config.language);
        self.translator.set_language(&preferred);
        self.rebuild_table();
        Ok(loaded)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    /// 入力チェックと検索パスの記録
    pub fn prepare_search(&mut self, directory: &str, keywords_input: &str) -> Result<(PathBuf, Vec<String>)> {
        let (path, keywords) = scanner::validate_search_input(directory, keywords_input)?;
        self.remember_search_path(&path.to_string_lossy());
        Ok((path, keywords))
    }

    pub fn search(&mut self, directory: &str, keywords_input: &str) -> Result<&ResultTable> {
        self.search_with_progress(directory, keywords_input, |_| {})
    }

    pub fn search_with_progress<F>(&mut self, directory: &str, keywords_input: &str, on_file: F) -> Result<&ResultTable>
    where
        F: FnMut(&Path),
    {
        let (path, keywords) = self.prepare_search(directory, keywords_input)?;
        let results = scanner::scan_directory_with_progress(&path, &keywords, on_file);
        Ok(self.set_results(results))
    }

    /// 別スレッド等で得た結果を取り込む
    pub fn set_results(&mut self, results: SearchResults) -> &ResultTable {
        self.results = Some(results);
        self.rebuild_table();
        &self.table
    }

    /// 新しい検索の開始前に直前の結果を破棄する
    pub fn clear_results(&mut self) {
        self.results = None;
        self.table = ResultTable::default();
    }

    /// 言語を切り替えて設定に保存（`auto` はシステム言語）
    pub fn change_language(&mut self, tag: &str) -> Result<bool> {
        if !self.translator.set_language(&resolve_language(tag)) {
            return Ok(false);
        }
        self.config.set_language(tag)?;
        self.rebuild_table();
        Ok(true)
    }

    /// 保存せずに表示言語だけ切り替える
    pub fn use_language(&mut self, tag: &str) -> bool {
        if !self.translator.set_language(tag) {
            return false;
        }
        self.rebuild_table();
        true
    }

    pub fn export_csv(&self, output_path: &Path) -> Result<()> {
        export::write_csv(&self.table, &self.translator, output_path)
    }

    /// 指定行のファイルを開く
    pub fn open_row(&self, index: usize) -> Result<()> {
        let row = self
            .table
            .rows
            .get(index)
            .ok_or(SearchError::RowOutOfRange(index))?;
        launcher::open_source_file(&row.source_file)
    }

    pub fn remember_window_size(&mut self, width: f32, height: f32) -> Result<()> {
        self.config.set_window_size(width, height)
    }

    /// 検索パスを記録（保存失敗は警告のみ）
    pub fn remember_search_path(&mut self, path: &str) {
        if let Err(e) = self.config.set_last_search_path(path) {
            tracing::warn!(error = %e, "failed to save last search path");
        }
    }

    /// 存在する場合のみ前回の検索パス
    pub fn last_search_path(&self) -> Option<&str> {
        let path = self.config.last_search_path.as_str();
        (!path.is_empty() && Path::new(path).exists()).then_some(path)
    }

    pub fn status_line(&self) -> String {
        if self.results.is_some() {
            self.table.status.clone()
        } else {
            self.translator.text(MessageId::Ready)
        }
    }

    /// エラーを表示用の文言に変換
    pub fn error_message(&self, error: &SearchError) -> String {
        let t = &self.translator;
        match error {
            SearchError::InvalidPath(_) => t.text(MessageId::InvalidPath),
            SearchError::NoKeywords => t.text(MessageId::NoKeywords),
            SearchError::NoResults => t.text(MessageId::NoResults),
            SearchError::RowOutOfRange(_) => t.text(MessageId::SelectRecord),
            SearchError::FileNotFound(path) => t.t(MessageId::FileNotExist, &[("filepath", path)]),
            SearchError::OpenFile(e) => t.t(MessageId::CannotOpenFile, &[("error", e)]),
            other => other.to_string(),
        }
    }

    fn rebuild_table(&mut self) {
        if let Some(results) = &self.results {
            self.table = ResultTable::build(results, &self.translator);
        }
    }
}

fn resolve_language(preference: &str) -> String {
    if preference == AUTO_LANGUAGE || preference.is_empty() {
        detect_system_language().to_string()
    } else {
        preference.to_string()
    }
}
