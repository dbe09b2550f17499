//! UUID列の補完
//!
//! 空のUUIDだけを新規発行し、既存の値は変えない。
//! 個人情報の列（メール・名前）はこのとき削除する。

use app_gallery_common::{Column, CsvTable};
use uuid::Uuid;

/// 公開しない列
pub const PRIVATE_COLUMNS: [&str; 2] = ["メール", "名前"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UuidSummary {
    pub assigned: usize,
    pub kept: usize,
    pub removed_columns: Vec<String>,
}

pub fn fill_uuids(table: &mut CsvTable) -> UuidSummary {
    let mut summary = UuidSummary::default();

    for name in PRIVATE_COLUMNS {
        if table.remove_column(name) {
            summary.removed_columns.push(name.to_string());
        }
    }

    // ID列の直後、ID列がなければ2列目
    let column = table.ensure_column_after(Column::Uuid, Column::Id, 1);
    for row in 0..table.len() {
        if table.get(row, column).trim().is_empty() {
            table.set(row, column, Uuid::new_v4().to_string());
            summary.assigned += 1;
        } else {
            summary.kept += 1;
        }
    }

    tracing::info!(assigned = summary.assigned, kept = summary.kept, "uuids filled");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fill_uuids_keeps_existing() {
        let csv = "ID,メール,UUID,名前,アプリのURL\n1,a@example.com,fixed-uuid,山田,https://x/1\n2,b@example.com, ,佐藤,https://x/2\n";
        let mut table = CsvTable::parse(csv.as_bytes()).await.expect("パース失敗");

        let summary = fill_uuids(&mut table);

        assert_eq!(summary.assigned, 1);
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.removed_columns, vec!["メール", "名前"]);
        assert_eq!(table.headers(), ["ID", "UUID", "アプリのURL"]);
        assert_eq!(table.value(0, Column::Uuid), "fixed-uuid");

        let issued = table.value(1, Column::Uuid);
        let parsed = Uuid::parse_str(issued).expect("UUID形式ではない");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[tokio::test]
    async fn test_fill_uuids_adds_column_after_id() {
        let csv = "年度,ID,アプリのURL\n2024,1,https://x/1\n2025,2,https://x/2\n";
        let mut table = CsvTable::parse(csv.as_bytes()).await.expect("パース失敗");

        let summary = fill_uuids(&mut table);

        assert_eq!(summary.assigned, 2);
        assert_eq!(table.headers(), ["年度", "ID", "UUID", "アプリのURL"]);
        assert_ne!(table.value(0, Column::Uuid), table.value(1, Column::Uuid));
        assert_eq!(table.value(1, Column::Url), "https://x/2");
    }
}
