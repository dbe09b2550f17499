//! エラー型定義

use thiserror::Error;

/// データ読み込みエラー
///
/// 取得失敗・パース失敗のどちらもユーザーにはインラインメッセージ1件として表示され、
/// 自動リトライは行わない。
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("データファイルが見つかりません: {0}")]
    NotFound(String),

    #[error("データの取得に失敗しました: {0}")]
    Fetch(String),

    #[error("CSVの解析に失敗しました: {0}")]
    Parse(String),
}

/// ビューア状態遷移エラー
///
/// 不正な遷移は拒否され、状態は変化しない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("インデックスが範囲外です: {index} (件数: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("ビューアは既に開いています")]
    AlreadyOpen,

    #[error("ビューアは閉じています")]
    NotOpen,
}

/// CSV編集（列の追加・値の書き戻し）のエラー
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("CSVの書き込みに失敗しました: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
