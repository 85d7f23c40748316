//! エクスポートファイル操作
//!
//! 提案ファイル名の生成、パス展開、一回限りの書き出し。
//! 永続化層は持たない（書き出したら終わり）。

use crate::error::{EdahaError, FileError, Result};
use crate::map::DEFAULT_TITLE;
use std::fs;
use std::path::{Path, PathBuf};

/// エクスポート文書の拡張子
pub const EXPORT_EXTENSION: &str = ".md";
/// タイトルが使えないときのファイル名の幹
pub const DEFAULT_FILE_STEM: &str = "mindmap";

/// ルートのタイトルから提案ファイル名を組み立てる
pub fn suggested_file_name(title: &str) -> String {
    format!("{}{}", sanitize_file_stem(title), EXPORT_EXTENSION)
}

/// タイトルをファイル名の幹として安全な形に直す
///
/// パス区切りや制御文字を `_` に置き換え、空白は詰める。
/// 既定タイトルのままの場合も英字の幹に落とす。
fn sanitize_file_stem(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() || trimmed == DEFAULT_TITLE {
        return DEFAULT_FILE_STEM.to_string();
    }

    let sanitized: String = trimmed
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();

    let sanitized = sanitized.trim_matches('_').to_string();
    if sanitized.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        sanitized
    }
}

/// 入力されたエクスポート先を実際のパスへ展開する
///
/// `~` と環境変数を展開し、相対パスはホームディレクトリ起点とみなす。
pub fn expand_export_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EdahaError::Path("書き出し先が空です".to_string()));
    }

    let expanded = shellexpand::full(trimmed)
        .map_err(|e| EdahaError::Path(format!("パス展開エラー: {}", e)))?;
    let path = PathBuf::from(expanded.as_ref());

    if path.is_absolute() {
        Ok(path)
    } else {
        // ダウンロード相当の既定位置としてホームディレクトリを使う
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Ok(base.join(path))
    }
}

/// エクスポート文書を書き出す
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                EdahaError::File(FileError::Io {
                    message: format!("{}: {}", parent.display(), e),
                })
            })?;
        }
    }

    fs::write(path, content).map_err(|e| {
        EdahaError::File(FileError::Io {
            message: format!("{}: {}", path.display(), e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_name_from_title() {
        assert_eq!(suggested_file_name("今期の計画"), "今期の計画.md");
        assert_eq!(suggested_file_name("plan 2026"), "plan_2026.md");
    }

    #[test]
    fn test_suggested_name_falls_back() {
        assert_eq!(suggested_file_name(""), "mindmap.md");
        assert_eq!(suggested_file_name("   "), "mindmap.md");
        assert_eq!(suggested_file_name(DEFAULT_TITLE), "mindmap.md");
        // 全文字が不正な場合も既定に落ちる
        assert_eq!(suggested_file_name("///"), "mindmap.md");
    }

    #[test]
    fn test_sanitize_replaces_path_separators() {
        assert_eq!(suggested_file_name("a/b\\c"), "a_b_c.md");
        assert_eq!(suggested_file_name("x:y?z"), "x_y_z.md");
    }

    #[test]
    fn test_expand_rejects_empty_input() {
        assert!(expand_export_path("").is_err());
        assert!(expand_export_path("   ").is_err());
    }

    #[test]
    fn test_expand_keeps_absolute_path() {
        let path = expand_export_path("/tmp/edaha-test.md").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/edaha-test.md"));
    }

    #[test]
    fn test_expand_resolves_relative_to_home() {
        let path = expand_export_path("notes.md").unwrap();
        assert!(path.is_absolute() || path.starts_with("."));
        assert!(path.ends_with("notes.md"));
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export").join("map.md");

        write_export(&path, "# マインドマップ\n").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "# マインドマップ\n");
    }
}
