//! 画像アセット確認モジュール
//!
//! 各アプリのスクリーンショット（`images/screenshots/app-{id}.png`）と
//! QRコード画像が基準ディレクトリ配下に存在するかを調べる。
//! URL指定の画像は確認対象外。

use app_gallery_common::AppRecord;
use std::path::{Path, PathBuf};

/// 1アプリ分の確認結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub index: usize,
    pub id: String,
    /// 見つからなかったスクリーンショット
    pub missing_screenshot: Option<PathBuf>,
    /// 見つからなかったQRコード画像
    pub missing_qr_code: Option<PathBuf>,
}

impl AssetStatus {
    pub fn is_complete(&self) -> bool {
        self.missing_screenshot.is_none() && self.missing_qr_code.is_none()
    }
}

fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:")
}

fn missing(root: &Path, path: &str) -> Option<PathBuf> {
    if is_remote(path) {
        return None;
    }
    let full = root.join(path.trim());
    if full.is_file() {
        None
    } else {
        Some(full)
    }
}

/// 全アプリの画像を確認し、不足のあるものだけ返す
pub fn check_assets(records: &[AppRecord], root: &Path) -> Vec<AssetStatus> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| AssetStatus {
            index,
            id: record.id.clone(),
            missing_screenshot: missing(root, &record.screenshot_path),
            missing_qr_code: record.qr_code().and_then(|qr| missing(root, qr)),
        })
        .filter(|status| !status.is_complete())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str, qr: &str) -> AppRecord {
        AppRecord {
            id: id.to_string(),
            url: "https://x".to_string(),
            screenshot_path: app_gallery_common::types::screenshot_path(id),
            qr_code_path: qr.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_present() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("images/screenshots")).unwrap();
        std::fs::create_dir_all(dir.path().join("images/qrcodes")).unwrap();
        std::fs::write(dir.path().join("images/screenshots/app-1.png"), b"png").unwrap();
        std::fs::write(dir.path().join("images/qrcodes/qrcode-1.png"), b"png").unwrap();

        let records = vec![record("1", "images/qrcodes/qrcode-1.png")];
        assert!(check_assets(&records, dir.path()).is_empty());
    }

    #[test]
    fn test_missing_screenshot_and_qr() {
        let dir = tempdir().expect("Failed to create temp dir");
        let records = vec![record("1", "images/qrcodes/qrcode-1.png"), record("2", "")];
        let report = check_assets(&records, dir.path());

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].id, "1");
        assert!(report[0].missing_qr_code.is_some());
        assert!(report[1].missing_screenshot.is_some());
        // QRコード列が空なら確認しない
        assert!(report[1].missing_qr_code.is_none());
    }

    #[test]
    fn test_remote_qr_skipped() {
        let dir = tempdir().expect("Failed to create temp dir");
        let records = vec![record("1", "https://example.com/qr.png")];
        let report = check_assets(&records, dir.path());
        assert_eq!(report.len(), 1);
        assert!(report[0].missing_qr_code.is_none());
    }
}
