//! 翻訳モジュール
//!
//! メッセージIDを列挙型で表し、言語タグごとのテンプレートを保持する。
//! `{name}` 形式のプレースホルダは参照時に置換し、
//! 翻訳が見つからない場合はメッセージIDのキー文字列を返す。

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::path::Path;

/// 既定言語
pub const DEFAULT_LANGUAGE: &str = "zh_CN";

const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("zh_CN", include_str!("../locales/zh_CN.json")),
];

/// メッセージID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    AppTitle,
    Ready,
    SearchPath,
    Browse,
    Keywords,
    SearchExcel,
    ExportCsv,
    OpenFile,
    FileName,
    Worksheet,
    Cell,
    Keyword,
    Content,
    FilePath,
    ProcessingError,
    TotalOccurrences,
    Error,
    InvalidPath,
    NoKeywords,
    KeywordStats,
    SearchComplete,
    FileInfo,
    Info,
    NoResults,
    Success,
    SavedTo,
    FileComment,
    SelectRecord,
    FileNotExist,
    CannotOpenFile,
    Language,
    Searching,
    SkippedFiles,
}

impl MessageId {
    pub const ALL: &'static [MessageId] = &[
        MessageId::AppTitle,
        MessageId::Ready,
        MessageId::SearchPath,
        MessageId::Browse,
        MessageId::Keywords,
        MessageId::SearchExcel,
        MessageId::ExportCsv,
        MessageId::OpenFile,
        MessageId::FileName,
        MessageId::Worksheet,
        MessageId::Cell,
        MessageId::Keyword,
        MessageId::Content,
        MessageId::FilePath,
        MessageId::ProcessingError,
        MessageId::TotalOccurrences,
        MessageId::Error,
        MessageId::InvalidPath,
        MessageId::NoKeywords,
        MessageId::KeywordStats,
        MessageId::SearchComplete,
        MessageId::FileInfo,
        MessageId::Info,
        MessageId::NoResults,
        MessageId::Success,
        MessageId::SavedTo,
        MessageId::FileComment,
        MessageId::SelectRecord,
        MessageId::FileNotExist,
        MessageId::CannotOpenFile,
        MessageId::Language,
        MessageId::Searching,
        MessageId::SkippedFiles,
    ];

    /// ロケールファイル上のキー
    pub fn as_key(self) -> &'static str {
        match self {
            MessageId::AppTitle => "app_title",
            MessageId::Ready => "ready",
            MessageId::SearchPath => "search_path",
            MessageId::Browse => "browse",
            MessageId::Keywords => "keywords",
            MessageId::SearchExcel => "search_excel",
            MessageId::ExportCsv => "export_csv",
            MessageId::OpenFile => "open_file",
            MessageId::FileName => "file_name",
            MessageId::Worksheet => "worksheet",
            MessageId::Cell => "cell",
            MessageId::Keyword => "keyword",
            MessageId::Content => "content",
            MessageId::FilePath => "file_path",
            MessageId::ProcessingError => "processing_error",
            MessageId::TotalOccurrences => "total_occurrences",
            MessageId::Error => "error",
            MessageId::InvalidPath => "invalid_path",
            MessageId::NoKeywords => "no_keywords",
            MessageId::KeywordStats => "keyword_stats",
            MessageId::SearchComplete => "search_complete",
            MessageId::FileInfo => "file_info",
            MessageId::Info => "info",
            MessageId::NoResults => "no_results",
            MessageId::Success => "success",
            MessageId::SavedTo => "saved_to",
            MessageId::FileComment => "file_comment",
            MessageId::SelectRecord => "select_record",
            MessageId::FileNotExist => "file_not_exist",
            MessageId::CannotOpenFile => "cannot_open_file",
            MessageId::Language => "language",
            MessageId::Searching => "searching",
            MessageId::SkippedFiles => "skipped_files",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_key() == key)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// 翻訳器
///
/// メッセージID → (言語タグ → テンプレート) の表を持つ。
#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    catalog: HashMap<MessageId, HashMap<String, String>>,
    languages: BTreeSet<String>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// 組み込みロケール（en / zh_CN）を読み込んだ翻訳器
    pub fn new() -> Self {
        let mut translator = Self {
            language: DEFAULT_LANGUAGE.to_string(),
            catalog: HashMap::new(),
            languages: BTreeSet::new(),
        };
        for (tag, json) in BUILTIN_LOCALES {
            if let Err(e) = translator.load_locale_str(tag, json) {
                tracing::error!(language = tag, error = %e, "failed to load builtin locale");
            }
        }
        translator
    }

    /// 言語を指定して生成（未対応の言語なら既定言語のまま）
    pub fn with_language(tag: &str) -> Self {
        let mut translator = Self::new();
        translator.set_language(tag);
        translator
    }

    /// JSON文字列からロケールを追加・上書き
    pub fn load_locale_str(&mut self, tag: &str, json: &str) -> Result<()> {
        if tag.is_empty() {
            return Err(Error::EmptyLanguageTag);
        }
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        for (key, template) in entries {
            match MessageId::from_key(&key) {
                Some(id) => {
                    self.catalog
                        .entry(id)
                        .or_default()
                        .insert(tag.to_string(), template);
                }
                None => tracing::debug!(language = tag, key = %key, "unknown message key ignored"),
            }
        }
        self.languages.insert(tag.to_string());
        Ok(())
    }

    /// ディレクトリ内の `<tag>.json` をすべて読み込む
    ///
    /// 読み込めなかったファイルはログに出してスキップする。
    /// 戻り値は読み込んだ言語数。
    pub fn load_locale_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(tag) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let result = std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|json| self.load_locale_str(tag, &json));
            match result {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!(file = %path.display(), error = %e, "failed to load translation file"),
            }
        }
        Ok(loaded)
    }

    /// 言語を切り替える（読み込み済みの言語のみ）
    pub fn set_language(&mut self, tag: &str) -> bool {
        if self.languages.contains(tag) {
            self.language = tag.to_string();
            true
        } else {
            false
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn available_languages(&self) -> Vec<String> {
        self.languages.iter().cloned().collect()
    }

    /// 引数なしの翻訳
    pub fn text(&self, id: MessageId) -> String {
        self.t(id, &[])
    }

    /// 翻訳してプレースホルダを置換
    pub fn t(&self, id: MessageId, args: &[(&str, &dyn Display)]) -> String {
        let Some(template) = self
            .catalog
            .get(&id)
            .and_then(|by_lang| by_lang.get(&self.language))
        else {
            return id.as_key().to_string();
        };

        substitute(template, args)
    }
}

/// テンプレートを1回だけ走査して `{name}` を置換する
///
/// 置換後の値は再走査しない。未知の名前はそのまま残す。
fn substitute(template: &str, args: &[(&str, &dyn Display)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            args.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, value.to_string()))
        });
        match value {
            Some((close, value)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// 表示用の言語名
pub fn language_name(tag: &str) -> &str {
    match tag {
        "zh_CN" => "中文",
        "en" => "English",
        other => other,
    }
}

/// ロケール文字列（例: `en_US.UTF-8`）から対応言語を判定
pub fn language_from_locale(locale: Option<&str>) -> &'static str {
    match locale {
        Some(l) if l.starts_with("zh") => "zh_CN",
        Some(l) if l.starts_with("en") => "en",
        _ => DEFAULT_LANGUAGE,
    }
}

/// システム言語を環境変数から推定
pub fn detect_system_language() -> &'static str {
    let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty());
    language_from_locale(locale.as_deref())
}
