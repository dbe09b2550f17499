//! ギャラリー描画モジュール
//!
//! レコード列からカード記述（表示用の値）への純粋な変換。
//! ユーザー入力由来の文字列はすべてHTMLエスケープ済みで保持する。

use crate::types::{AppRecord, Catalog};
use serde::Serialize;

/// 説明文の最大文字数
pub const DESCRIPTION_LIMIT: usize = 100;

/// 省略記号
pub const ELLIPSIS: &str = "...";

/// HTMLエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 説明文を100文字で切り詰める
///
/// 100文字を超える場合のみ先頭100文字 + `...` を返す。文字数はUnicodeスカラー値で数える。
pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{}", &description[..cut], ELLIPSIS),
        None => description.to_string(),
    }
}

/// カードが指すレコード
///
/// 生成時にインデックスを値で保持するため、どのカードも常に自分のレコードを開く。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardHandle(usize);

impl CardHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// カード上で発生するクリック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// カード本体
    Clicked,
    /// カード内の外部リンク（伝播はここで止まる）
    LinkClicked,
}

/// カードクリックへの応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardResponse {
    /// ビューアをこのインデックスで開く
    Open(usize),
    /// 外部リンクを開く（ビューアは開かない）
    FollowLink(String),
}

/// ギャラリーのカード1枚分の記述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCard {
    pub handle: CardHandle,
    pub id: String,
    /// スクリーンショット画像のパス
    pub image: String,
    /// エスケープ済みの名前
    pub name: String,
    /// 切り詰め・エスケープ済みの説明文
    pub truncated_description: String,
    pub outbound_link: String,
    pub qr_code: Option<String>,
}

impl GalleryCard {
    pub fn from_record(index: usize, record: &AppRecord) -> Self {
        Self {
            handle: CardHandle(index),
            id: record.id.clone(),
            image: record.screenshot_path.clone(),
            name: escape_html(&record.name),
            truncated_description: escape_html(&truncate_description(&record.description)),
            outbound_link: record.url.clone(),
            qr_code: record.qr_code().map(str::to_string),
        }
    }

    /// カード上のクリックを処理する
    pub fn handle(&self, event: CardEvent) -> CardResponse {
        match event {
            CardEvent::Clicked => CardResponse::Open(self.handle.index()),
            CardEvent::LinkClicked => CardResponse::FollowLink(self.outbound_link.clone()),
        }
    }
}

/// レコード列をカード列に変換する
pub fn render_gallery(records: &[AppRecord]) -> Vec<GalleryCard> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| GalleryCard::from_record(index, record))
        .collect()
}

/// カタログ全体のカード列
pub fn render_catalog(catalog: &Catalog) -> Vec<GalleryCard> {
    render_gallery(catalog.records())
}
