use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use app_gallery_common::{load_catalog, DataSource, NormalizationResult};

/// 読み込みスレッドから呼ぶ（UIスレッドでは使わない）
pub fn load_catalog_blocking(source: &DataSource) -> Result<NormalizationResult> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create runtime")?;
    let result = runtime
        .block_on(load_catalog(source))
        .with_context(|| format!("load {source}"))?;
    Ok(result)
}

/// 画像パスの基準ディレクトリ（CSVファイルと同じ場所）
pub fn asset_root(source: &DataSource) -> PathBuf {
    match source {
        DataSource::File(path) => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        DataSource::Url(_) => PathBuf::from("."),
    }
}

pub fn resolve_asset(root: &Path, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).to_string_lossy().into_owned()
    }
}
