//! QRコード生成
//!
//! URLのある行ごとに `images/qrcodes/qrcode-{id}.png` を書き出し、
//! そのパスをQRコード列に記入する。URLのない行は触らない。

use crate::error::{GalleryError, Result};
use app_gallery_common::{qr_code_path, Column, CsvTable};
use image::Luma;
use qrcode::{EcLevel, QrCode};
use std::path::Path;

/// 1モジュールあたりのピクセル数
pub const MODULE_PIXELS: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrSummary {
    /// 生成できたID
    pub generated: Vec<String>,
    /// 生成に失敗したIDと理由（QRコード列の既存値はそのまま）
    pub failed: Vec<(String, String)>,
    /// URLがなく飛ばした行（1始まり）
    pub skipped_rows: Vec<usize>,
}

/// URLを白黒PNGのQRコードにして保存
pub fn render_qrcode(url: &str, output: &Path) -> Result<()> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
        .map_err(|e| GalleryError::QrCode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save(output)
        .map_err(|e| GalleryError::QrCode(format!("{}: {}", output.display(), e)))?;
    Ok(())
}

/// 全行のQRコードを生成し、表のQRコード列を更新する
///
/// # Arguments
/// * `table` - 書き換えるCSV
/// * `root` - 画像パスの基準ディレクトリ
pub fn generate_qrcodes(table: &mut CsvTable, root: &Path) -> QrSummary {
    let mut summary = QrSummary::default();
    let column = table.ensure_column_after(Column::QrCode, Column::Id, 0);

    for row in 0..table.len() {
        let url = table.value(row, Column::Url).trim().to_string();
        if url.is_empty() {
            summary.skipped_rows.push(row + 1);
            continue;
        }

        let id = table.record_id(row);
        let relative = qr_code_path(&id);
        match render_qrcode(&url, &root.join(&relative)) {
            Ok(()) => {
                tracing::debug!(id = %id, path = %relative, "qrcode written");
                table.set(row, column, relative);
                summary.generated.push(id);
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "qrcode generation failed");
                summary.failed.push((id, e.to_string()));
            }
        }
    }

    summary
}
