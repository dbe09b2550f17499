//! PDF列の補完
//!
//! IDごとに発表資料のPDFを探し、基準ディレクトリからの相対パスをpdf列に記入する。

use app_gallery_common::{Column, CsvTable};
use std::path::Path;

/// 旧フォームの発表資料列（pdf列へ改名する）
pub const LEGACY_PDF_HEADER: &str =
    "発表資料（PowerPointやWord）などのファイルがある場合は提出してください。口頭での発表の場合はなくても構いません。";

/// 探す場所（基準ディレクトリからの相対、先頭ほど優先）
pub const SEARCH_DIRS: [&str; 5] = ["", "pdf", "pdfs", "files", "documents"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfSummary {
    /// 見つかったIDとパス
    pub found: Vec<(String, String)>,
    /// 見つからなかったID
    pub missing: Vec<String>,
    /// 旧列名を改名したか
    pub renamed_legacy: bool,
}

/// IDに対応するPDFを探す
///
/// 各ディレクトリで `{id}.pdf`、`app-{id}.pdf`、`{id}_*.pdf`、`*{id}*.pdf` の順に照合する。
pub fn find_pdf(root: &Path, id: &str) -> Option<String> {
    let exact = format!("{}.pdf", id);
    let prefixed = format!("app-{}.pdf", id);
    let underscored = format!("{}_", id);

    for dir in SEARCH_DIRS {
        let search = root.join(dir);
        let Ok(entries) = std::fs::read_dir(&search) else {
            continue;
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".pdf"))
            .collect();
        names.sort();

        let matchers: [&dyn Fn(&str) -> bool; 4] = [
            &|name: &str| name == exact,
            &|name: &str| name == prefixed,
            &|name: &str| name.starts_with(&underscored),
            &|name: &str| name.contains(id),
        ];
        for matcher in matchers {
            if let Some(name) = names.iter().find(|name| matcher(name.as_str())) {
                return Some(if dir.is_empty() {
                    name.clone()
                } else {
                    format!("{}/{}", dir, name)
                });
            }
        }
    }
    None
}

/// 全行のPDFを探し、表のpdf列を更新する
///
/// 見つからない行は既存の値を残す（手入力のリンクを消さない）。
pub fn fill_pdfs(table: &mut CsvTable, root: &Path) -> PdfSummary {
    let mut summary = PdfSummary::default();

    if table.find(Column::Pdf).is_none() && table.rename_column(LEGACY_PDF_HEADER, Column::Pdf.header()) {
        summary.renamed_legacy = true;
    }
    let column = table.ensure_column_at_end(Column::Pdf);

    for row in 0..table.len() {
        let id = table.record_id(row);
        match find_pdf(root, &id) {
            Some(path) => {
                tracing::debug!(id = %id, path = %path, "pdf found");
                table.set(row, column, path.clone());
                summary.found.push((id, path));
            }
            None => summary.missing.push(id),
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, path: &str) {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("ディレクトリ作成失敗");
        }
        std::fs::write(full, b"%PDF").expect("ファイル作成失敗");
    }

    #[test]
    fn test_find_pdf_patterns() {
        let dir = tempdir().expect("一時ディレクトリ作成失敗");
        touch(dir.path(), "1.pdf");
        touch(dir.path(), "pdf/app-2.pdf");
        touch(dir.path(), "pdfs/3_発表資料.pdf");
        touch(dir.path(), "documents/final-4-v2.pdf");
        touch(dir.path(), "files/5.txt");

        assert_eq!(find_pdf(dir.path(), "1").as_deref(), Some("1.pdf"));
        assert_eq!(find_pdf(dir.path(), "2").as_deref(), Some("pdf/app-2.pdf"));
        assert_eq!(find_pdf(dir.path(), "3").as_deref(), Some("pdfs/3_発表資料.pdf"));
        assert_eq!(find_pdf(dir.path(), "4").as_deref(), Some("documents/final-4-v2.pdf"));
        assert_eq!(find_pdf(dir.path(), "5"), None);
    }

    #[test]
    fn test_find_pdf_prefers_exact_name() {
        let dir = tempdir().expect("一時ディレクトリ作成失敗");
        touch(dir.path(), "pdf/a-6.pdf");
        touch(dir.path(), "pdf/6.pdf");
        assert_eq!(find_pdf(dir.path(), "6").as_deref(), Some("pdf/6.pdf"));
    }

    #[tokio::test]
    async fn test_fill_pdfs_renames_legacy_column() {
        let dir = tempdir().expect("一時ディレクトリ作成失敗");
        touch(dir.path(), "pdf/1.pdf");

        let csv = format!(
            "ID,アプリのURL,{}\n1,https://x/1,\n,https://x/2,https://drive.example.com/2.pdf\n",
            LEGACY_PDF_HEADER
        );
        let mut table = CsvTable::parse(csv.as_bytes()).await.expect("パース失敗");

        let summary = fill_pdfs(&mut table, dir.path());

        assert!(summary.renamed_legacy);
        assert_eq!(table.headers(), ["ID", "アプリのURL", "pdf"]);
        assert_eq!(summary.found, vec![("1".to_string(), "pdf/1.pdf".to_string())]);
        assert_eq!(summary.missing, vec!["2".to_string()]);
        assert_eq!(table.value(0, Column::Pdf), "pdf/1.pdf");
        assert_eq!(table.value(1, Column::Pdf), "https://drive.example.com/2.pdf");
    }

    #[tokio::test]
    async fn test_fill_pdfs_appends_column() {
        let dir = tempdir().expect("一時ディレクトリ作成失敗");
        touch(dir.path(), "app-2.pdf");

        let mut table = CsvTable::parse("ID,アプリのURL\n1,https://x/1\n2,https://x/2\n".as_bytes())
            .await
            .expect("パース失敗");
        let summary = fill_pdfs(&mut table, dir.path());

        assert!(!summary.renamed_legacy);
        assert_eq!(table.headers(), ["ID", "アプリのURL", "pdf"]);
        assert_eq!(table.value(0, Column::Pdf), "");
        assert_eq!(table.value(1, Column::Pdf), "app-2.pdf");
    }
}
