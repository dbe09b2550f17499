pub mod html;

use crate::error::Result;
use app_gallery_common::{render_catalog, Catalog, InfoPanel};
use std::path::{Path, PathBuf};

const INDEX_FILE_NAME: &str = "index.html";

fn output_path(output: &Path) -> PathBuf {
    if output.extension().is_some() && !output.is_dir() {
        output.to_path_buf()
    } else {
        output.join(INDEX_FILE_NAME)
    }
}

/// 静的HTMLギャラリーを書き出す
///
/// # Arguments
/// * `catalog` - 正規化済みカタログ
/// * `output` - 出力ディレクトリ（拡張子付きならそのファイル名で出力）
/// * `title` - ページタイトル
///
/// # Returns
/// 書き出したファイルのパス
pub fn export_gallery(catalog: &Catalog, output: &Path, title: &str) -> Result<PathBuf> {
    let path = output_path(output);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let cards = render_catalog(catalog);
    let panels: Vec<InfoPanel> = catalog.records().iter().map(InfoPanel::for_record).collect();
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let page = html::render_page(&cards, &panels, title, &generated_at)?;
    std::fs::write(&path, page)?;

    tracing::info!(path = %path.display(), cards = cards.len(), "gallery written");
    Ok(path)
}
