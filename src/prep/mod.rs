//! CSVの下ごしらえ
//!
//! ギャラリーを組む前にCSVへ書き戻す補完処理。
//! - QRコード画像の生成とQRコード列の記入
//! - UUID列の補完
//! - IDに対応するPDFの検索とpdf列の記入
//!
//! どれも列の順序と未知の列を保ったまま元のファイルを上書きする。

pub mod pdfs;
pub mod qrcodes;
pub mod uuids;

use crate::error::{GalleryError, Result};
use app_gallery_common::DataSource;
use std::path::Path;

/// 書き換え対象のローカルCSV（URLは書き換えられない）
pub fn local_csv(source: &DataSource) -> Result<&Path> {
    match source {
        DataSource::File(path) => Ok(path),
        DataSource::Url(url) => Err(GalleryError::Config(format!(
            "URLのCSVは書き換えられません（ローカルファイルを指定してください）: {}",
            url
        ))),
    }
}
