//! 正規化モジュール
//!
//! CSVの生データ行を `AppRecord` に変換する。
//!
//! ## 処理フロー
//! 1. URL列が空（前後空白を除いて）の行を除外
//! 2. IDが空なら元データでの行番号（1始まり、除外前）を採番
//! 3. その他の列は空文字、名前は `Item {id}` で補完

use crate::columns::Column;
use crate::types::{screenshot_path, AppRecord, Catalog, RawRow};
use std::collections::HashSet;

/// 正規化結果
#[derive(Debug, Clone, Default)]
pub struct NormalizationResult {
    pub records: Vec<AppRecord>,
    pub report: NormalizationReport,
}

/// 正規化の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// 入力行数
    pub total_rows: usize,
    /// 除外した行の番号（1始まり）
    pub dropped_rows: Vec<usize>,
    /// 重複したID
    pub duplicate_ids: Vec<String>,
}

impl NormalizationReport {
    pub fn kept_rows(&self) -> usize {
        self.total_rows - self.dropped_rows.len()
    }
}

impl NormalizationResult {
    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.records)
    }
}

/// ID列の値（前後空白を除く）、空なら行番号
///
/// スクリーンショット・QRコードのファイル名もこのIDから決まる。
pub fn record_id(position: usize, raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => position.to_string(),
    }
}

/// 1行を正規化する
///
/// # Arguments
/// * `position` - 入力全体での行番号（1始まり、除外前）
/// * `row` - CSVの生データ行
///
/// # Returns
/// URLが空なら `None`
pub fn normalize_row(position: usize, row: &RawRow) -> Option<AppRecord> {
    let url = Column::Url.get(row).map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return None;
    }

    let id = record_id(position, Column::Id.get(row));

    let field = |column: Column| column.get(row).unwrap_or_default().to_string();

    let name = match Column::Name.get(row) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Item {}", id),
    };

    Some(AppRecord {
        year: field(Column::Year),
        grade: field(Column::Grade),
        uuid: field(Column::Uuid),
        url: url.to_string(),
        name,
        description: field(Column::Description),
        pdf_link: field(Column::Pdf),
        screenshot_path: screenshot_path(&id),
        qr_code_path: field(Column::QrCode),
        id,
    })
}

/// 全行を正規化し、統計情報も返す
pub fn normalize_with_report(rows: &[RawRow]) -> NormalizationResult {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = NormalizationReport {
        total_rows: rows.len(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        let position = index + 1;
        match normalize_row(position, row) {
            Some(record) => {
                if !seen.insert(record.id.clone()) {
                    tracing::warn!(id = %record.id, row = position, "duplicate record id");
                    report.duplicate_ids.push(record.id.clone());
                }
                records.push(record);
            }
            None => {
                tracing::debug!(row = position, "row dropped: empty url");
                report.dropped_rows.push(position);
            }
        }
    }

    NormalizationResult { records, report }
}

/// 全行を正規化する（順序は入力のまま）
pub fn normalize_rows(rows: &[RawRow]) -> Vec<AppRecord> {
    normalize_with_report(rows).records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_drop_row_without_url() {
        let rows = vec![
            row(&[("アプリのURL", "")]),
            row(&[("アプリのURL", "https://x")]),
        ];
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 1);
        // 除外前の行番号で採番される
        assert_eq!(records[0].id, "2");
        assert_eq!(records[0].url, "https://x");
    }

    #[test]
    fn test_drop_row_with_blank_or_missing_url() {
        let rows = vec![
            row(&[("アプリのURL", "   ")]),
            row(&[("アプリ名", "URLなし")]),
        ];
        let result = normalize_with_report(&rows);
        assert!(result.records.is_empty());
        assert_eq!(result.report.dropped_rows, vec![1, 2]);
        assert_eq!(result.report.kept_rows(), 0);
    }

    #[test]
    fn test_url_is_trimmed() {
        let rows = vec![row(&[("アプリのURL", "  https://x  ")])];
        assert_eq!(normalize_rows(&rows)[0].url, "https://x");
    }

    #[test]
    fn test_explicit_id_and_name() {
        let rows = vec![row(&[
            ("ID", "42"),
            ("アプリのURL", "https://x"),
            ("アプリ名", "図書管理"),
        ])];
        let record = &normalize_rows(&rows)[0];
        assert_eq!(record.id, "42");
        assert_eq!(record.name, "図書管理");
        assert_eq!(record.screenshot_path, "images/screenshots/app-42.png");
    }

    #[test]
    fn test_defaults() {
        let rows = vec![row(&[("アプリのURL", "https://x")])];
        let record = &normalize_rows(&rows)[0];
        assert_eq!(record.id, "1");
        assert_eq!(record.name, "Item 1");
        assert_eq!(record.year, "");
        assert_eq!(record.grade, "");
        assert_eq!(record.uuid, "");
        assert_eq!(record.description, "");
        assert_eq!(record.pdf_link, "");
        assert_eq!(record.qr_code_path, "");
    }

    #[test]
    fn test_empty_name_uses_default() {
        let rows = vec![row(&[("ID", "7"), ("アプリのURL", "https://x"), ("アプリ名", "")])];
        assert_eq!(normalize_rows(&rows)[0].name, "Item 7");
    }

    #[test]
    fn test_all_fields_mapped() {
        let rows = vec![row(&[
            ("ID", "5"),
            ("年度", "2024"),
            ("履修時の年次", "2年"),
            ("UUID", "abc-123"),
            ("アプリのURL", "https://x"),
            ("アプリ名", "献立"),
            ("アプリの説明", "給食の献立を表示"),
            ("pdf", "docs/5.pdf"),
            ("QRコード", "images/qrcodes/qrcode-5.png"),
        ])];
        let record = &normalize_rows(&rows)[0];
        assert_eq!(record.year, "2024");
        assert_eq!(record.grade, "2年");
        assert_eq!(record.uuid, "abc-123");
        assert_eq!(record.description, "給食の献立を表示");
        assert_eq!(record.pdf_link, "docs/5.pdf");
        assert_eq!(record.qr_code_path, "images/qrcodes/qrcode-5.png");
    }

    #[test]
    fn test_order_preserved() {
        let rows = vec![
            row(&[("ID", "b"), ("アプリのURL", "https://b")]),
            row(&[("ID", "a"), ("アプリのURL", "https://a")]),
            row(&[("ID", "c"), ("アプリのURL", "https://c")]),
        ];
        let ids: Vec<String> = normalize_rows(&rows).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_ids_reported_not_removed() {
        // 明示IDと行番号由来のIDが衝突するケース
        let rows = vec![
            row(&[("ID", "2"), ("アプリのURL", "https://a")]),
            row(&[("アプリのURL", "https://b")]),
        ];
        let result = normalize_with_report(&rows);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.report.duplicate_ids, vec!["2".to_string()]);
    }

    #[test]
    fn test_kept_iff_url_non_blank() {
        let urls = ["", " ", "https://a", "\t", "x", "  y  "];
        let rows: Vec<RawRow> = urls.iter().map(|u| row(&[("アプリのURL", u)])).collect();
        let records = normalize_rows(&rows);
        let expected = urls.iter().filter(|u| !u.trim().is_empty()).count();
        assert_eq!(records.len(), expected);
        assert!(records.iter().all(|r| !r.url.is_empty()));
    }
}
