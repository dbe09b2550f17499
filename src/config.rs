use crate::error::{GalleryError, Result};
use app_gallery_common::DataSource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSVの読み込み元（ファイルパスまたはURL）
    pub data_source: String,
    /// HTML出力先
    pub output_dir: PathBuf,
    /// ページタイトル
    pub page_title: String,
    /// 画像パスの基準ディレクトリ
    pub asset_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: "data.csv".into(),
            output_dir: PathBuf::from("dist"),
            page_title: "アプリギャラリー".into(),
            asset_root: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("app-gallery").join("config.json"))
    }

    /// 読み込み元（引数 > 環境変数 > 設定ファイル）
    pub fn data_source(&self, override_source: Option<&str>) -> DataSource {
        if let Some(source) = override_source {
            return DataSource::parse(source);
        }
        if let Ok(source) = std::env::var("APP_GALLERY_SOURCE") {
            return DataSource::parse(&source);
        }
        DataSource::parse(&self.data_source)
    }

    pub fn set_data_source(&mut self, source: String) -> Result<()> {
        if source.trim().is_empty() {
            return Err(GalleryError::Config("読み込み元が空です".into()));
        }
        self.data_source = source;
        self.save()
    }

    pub fn set_page_title(&mut self, title: String) -> Result<()> {
        self.page_title = title;
        self.save()
    }
}
