//! カタログの型定義
//!
//! - RawRow: CSVの1行（列名 → 値）
//! - AppRecord: 正規化済みの1アイテム
//! - Catalog: 読み込み完了後に一度だけ構築される不変のレコード列

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

/// CSVの生データ1行
pub type RawRow = HashMap<String, String>;

/// スクリーンショットのパステンプレート（`{id}` を置換）
pub const SCREENSHOT_PATH_TEMPLATE: &str = "images/screenshots/app-{id}.png";

/// QRコード画像のパステンプレート
pub const QR_CODE_PATH_TEMPLATE: &str = "images/qrcodes/qrcode-{id}.png";

/// IDからスクリーンショットのパスを導出
pub fn screenshot_path(id: &str) -> String {
    SCREENSHOT_PATH_TEMPLATE.replace("{id}", id)
}

pub fn qr_code_path(id: &str) -> String {
    QR_CODE_PATH_TEMPLATE.replace("{id}", id)
}

/// カタログの1アイテム
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub id: String,

    #[serde(default)]
    pub year: String,             // 年度

    #[serde(default)]
    pub grade: String,            // 履修時の年次

    #[serde(default)]
    pub uuid: String,

    pub url: String,              // 必須・空にならない

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub pdf_link: String,

    pub screenshot_path: String,

    #[serde(default)]
    pub qr_code_path: String,
}

impl AppRecord {
    /// PDFリンク（空白のみなら None）
    pub fn pdf(&self) -> Option<&str> {
        non_blank(&self.pdf_link)
    }

    /// QRコード画像のパス（空白のみなら None）
    pub fn qr_code(&self) -> Option<&str> {
        non_blank(&self.qr_code_path)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// 不変のレコード列
///
/// インデックス `i` はギャラリーのカード `i` とビューアのスライド `i` に対応する。
/// 複製しても中身は共有される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Arc<[AppRecord]>,
}

impl Catalog {
    pub fn new(records: Vec<AppRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[AppRecord] {
        &self.records
    }
}

impl Deref for Catalog {
    type Target = [AppRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<AppRecord>> for Catalog {
    fn from(records: Vec<AppRecord>) -> Self {
        Self::new(records)
    }
}
