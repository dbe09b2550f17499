use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データ読み込みエラー: {0}")]
    Load(#[from] app_gallery_common::LoadError),

    #[error("ビューア操作エラー: {0}")]
    Viewer(#[from] app_gallery_common::ViewerError),

    #[error("表示できるアプリがありません: {0}")]
    EmptyCatalog(String),

    #[error("QRコード生成エラー: {0}")]
    QrCode(String),

    #[error("端末操作エラー: {0}")]
    Terminal(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] app_gallery_common::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
