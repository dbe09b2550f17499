//! データ読み込みモジュール
//!
//! ローカルファイルまたは http(s) URL からCSVを取得し、列名 → 値の行列に変換する。
//! 起動時に一度だけ実行される非同期処理。

use crate::error::LoadError;
use crate::normalizer::{normalize_with_report, NormalizationResult};
use crate::types::RawRow;
use futures_util::StreamExt;
use std::path::PathBuf;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` / `https://` で始まればURL、それ以外はファイルパス
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// 生データを取得する
pub async fn fetch(source: &DataSource) -> Result<Vec<u8>, LoadError> {
    match source {
        DataSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.display().to_string())
            } else {
                LoadError::Fetch(format!("{}: {}", path.display(), e))
            }
        }),
        DataSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| LoadError::Fetch(e.to_string()))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| LoadError::Fetch(e.to_string()))?;
            Ok(bytes.to_vec())
        }
    }
}

/// ヘッダー行とデータ行を読み出す
///
/// 1行目をヘッダーとして扱い、空行は読み飛ばす。先頭のBOMは無視する。
/// 列数の足りない行もそのまま返す。
pub(crate) async fn read_records(
    data: &[u8],
) -> Result<(Vec<String>, Vec<Vec<String>>), LoadError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = csv_async::AsyncReaderBuilder::new()
        .flexible(true)
        .create_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .await
        .map_err(|e| LoadError::Parse(e.to_string()))?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        let record = record.map_err(|e| LoadError::Parse(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

/// CSVをパースして列名 → 値の行にする
pub async fn parse_rows(data: &[u8]) -> Result<Vec<RawRow>, LoadError> {
    let (headers, records) = read_records(data).await?;
    let rows = records
        .into_iter()
        .map(|fields| {
            headers
                .iter()
                .cloned()
                .zip(fields)
                .collect::<RawRow>()
        })
        .collect();
    Ok(rows)
}

/// 取得してパースする
pub async fn load_rows(source: &DataSource) -> Result<Vec<RawRow>, LoadError> {
    let data = fetch(source).await?;
    let rows = parse_rows(&data).await?;
    tracing::info!(source = %source, rows = rows.len(), "csv loaded");
    Ok(rows)
}

/// 取得・パース・正規化までを行う
pub async fn load_catalog(source: &DataSource) -> Result<NormalizationResult, LoadError> {
    let rows = load_rows(source).await?;
    let result = normalize_with_report(&rows);
    tracing::info!(
        records = result.records.len(),
        dropped = result.report.dropped_rows.len(),
        "catalog normalized"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.com/data.csv"),
            DataSource::Url("https://example.com/data.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data.csv"),
            DataSource::File(PathBuf::from("data.csv"))
        );
    }

    #[tokio::test]
    async fn test_parse_rows_with_header() {
        let csv = "ID,アプリのURL,アプリ名\n1,https://a,出欠\n,https://b,\n";
        let rows = parse_rows(csv.as_bytes()).await.expect("パース失敗");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("アプリ名").map(String::as_str), Some("出欠"));
        assert_eq!(rows[1].get("ID").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn test_parse_rows_strips_bom_and_skips_blank_lines() {
        let csv = "\u{FEFF}ID,アプリのURL\n\n1,https://a\n\n2,https://b\n";
        let rows = parse_rows(csv.as_bytes()).await.expect("パース失敗");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("ID").map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn test_parse_rows_quoted_fields() {
        let csv = "アプリのURL,アプリの説明\nhttps://a,\"改行\nを含む, 説明\"\n";
        let rows = parse_rows(csv.as_bytes()).await.expect("パース失敗");
        assert_eq!(
            rows[0].get("アプリの説明").map(String::as_str),
            Some("改行\nを含む, 説明")
        );
    }

    #[tokio::test]
    async fn test_parse_rows_short_row() {
        let csv = "ID,アプリのURL,アプリ名\n1,https://a\n";
        let rows = parse_rows(csv.as_bytes()).await.expect("パース失敗");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("アプリ名").is_none());
    }

    #[tokio::test]
    async fn test_parse_rows_invalid_utf8() {
        let data: &[u8] = b"ID,url\n1,\xff\xfe\n";
        let result = parse_rows(data).await;
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = DataSource::File(PathBuf::from("/nonexistent/path/data.csv"));
        let result = load_rows(&source).await;
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("一時ファイル作成失敗");
        write!(
            file,
            "ID,アプリのURL,アプリ名\n,,空行扱い\n,https://x,\n"
        )
        .unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let result = load_catalog(&source).await.expect("読み込み失敗");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].id, "2");
        assert_eq!(result.records[0].name, "Item 2");
        assert_eq!(result.report.dropped_rows, vec![1]);
    }
}
