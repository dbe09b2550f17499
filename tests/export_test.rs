//! HTML出力の統合テスト
//!
//! CSV読み込みから静的ギャラリー生成までを通しで確認する

use app_gallery::export::export_gallery;
use app_gallery_common::{load_catalog, Catalog, DataSource};
use std::io::Write;
use tempfile::tempdir;

const SAMPLE_CSV: &str = "\
ID,年度,履修時の年次,UUID,アプリのURL,アプリ名,アプリの説明,pdf,QRコード
1,2024,1年,u-1,https://example.com/1,出欠管理,<b>出席</b>を記録する,docs/1.pdf,images/qrcodes/qrcode-1.png
2,2024,2年,u-2,,URLなし,除外される,,
,2025,3年,u-3,https://example.com/3,,説明のみ,,
";

async fn sample_catalog() -> Catalog {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    let source = DataSource::File(file.path().to_path_buf());
    load_catalog(&source).await.expect("読み込み失敗").into_catalog()
}

#[tokio::test]
async fn test_sample_catalog_normalized() {
    let catalog = sample_catalog().await;
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].name, "出欠管理");
    // ID空欄は元データの行番号（除外前）
    assert_eq!(catalog[1].id, "3");
    assert_eq!(catalog[1].name, "Item 3");
    assert_eq!(catalog[1].screenshot_path, "images/screenshots/app-3.png");
}

#[tokio::test]
async fn test_export_gallery_to_dir() {
    let catalog = sample_catalog().await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("dist");

    let path = export_gallery(&catalog, &output, "テストギャラリー").expect("HTML生成失敗");
    assert_eq!(path, output.join("index.html"));

    let html = std::fs::read_to_string(&path).expect("HTML読み込み失敗");
    assert_eq!(html.matches("<article").count(), 2);
    assert!(html.contains("&lt;b&gt;出席&lt;/b&gt;を記録する"));
    assert!(html.contains("images/qrcodes/qrcode-1.png"));
    assert!(!html.contains("URLなし"));

    // カードから開くビューアに全文とPDFリンクが渡る
    assert!(html.contains(r#"id="viewer-data""#));
    assert!(html.contains(r#""description":"\u003cb>出席\u003c/b>を記録する""#));
    assert!(html.contains(r#""pdfLink":"docs/1.pdf""#));
    assert!(!html.contains("<b>出席"));
}

#[tokio::test]
async fn test_export_gallery_to_file_name() {
    let catalog = sample_catalog().await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("gallery.html");

    let path = export_gallery(&catalog, &output, "t").expect("HTML生成失敗");
    assert_eq!(path, output);
    assert!(path.exists());
}

#[test]
fn test_export_empty_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export_gallery(&Catalog::default(), dir.path(), "空").expect("HTML生成失敗");
    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("0件"));
}
