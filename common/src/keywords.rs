//! キーワード入力の解析

/// カンマ区切りのキーワード文字列を分解する
///
/// 前後の空白を除去し、空要素は捨てる。重複は最初の出現のみ残す。
pub fn parse_keywords(input: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() || keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
    }
    keywords
}
