//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use app_gallery::error::GalleryError;
use app_gallery_common::{load_catalog, DataSource, LoadError, ViewerError};
use std::path::PathBuf;

/// 存在しないCSVを読み込んだ場合
#[tokio::test]
async fn test_load_nonexistent_file() {
    let source = DataSource::File(PathBuf::from("/nonexistent/path/12345/data.csv"));
    let result = load_catalog(&source).await;
    assert!(matches!(result, Err(LoadError::NotFound(_))));

    let err: GalleryError = result.unwrap_err().into();
    let display = format!("{}", err);
    assert!(display.contains("データ読み込みエラー"));
    assert!(display.contains("data.csv"));
}

/// 空のCSVはエラーではなく空のカタログ
#[tokio::test]
async fn test_load_empty_file() {
    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let source = DataSource::File(file.path().to_path_buf());
    let result = load_catalog(&source).await.expect("空ファイルの読み込みに失敗");
    assert!(result.records.is_empty());
    assert_eq!(result.report.total_rows, 0);
}

/// GalleryErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        GalleryError::Config("テスト設定エラー".to_string()),
        GalleryError::EmptyCatalog("なし".to_string()),
        GalleryError::Terminal("端末".to_string()),
        GalleryError::Load(LoadError::Fetch("timeout".to_string())),
        GalleryError::Viewer(ViewerError::NotOpen),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// ビューアエラーからの変換
#[test]
fn test_viewer_error_conversion() {
    let err: GalleryError = ViewerError::IndexOutOfRange { index: 9, len: 2 }.into();
    assert!(matches!(err, GalleryError::Viewer(_)));
    assert!(format!("{}", err).contains("9"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: GalleryError = io_err.into();

    assert!(matches!(err, GalleryError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: GalleryError = json_err.into();

    assert!(matches!(err, GalleryError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = app_gallery_common::Error::Load(LoadError::Parse("壊れた行".to_string()));
    let err: GalleryError = common_err.into();

    assert!(matches!(err, GalleryError::Common(_)));
    assert!(format!("{}", err).contains("壊れた行"));
}
