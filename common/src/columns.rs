//! CSV列定義
//!
//! 元データの日本語ヘッダーに加えて英語の別名も受け付ける。

use crate::types::RawRow;

/// 認識する列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Year,
    Grade,
    Uuid,
    Url,
    Name,
    Description,
    Pdf,
    QrCode,
}

impl Column {
    /// ヘッダー名の候補（先頭が正式名）
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Column::Id => &["ID", "id"],
            Column::Year => &["年度", "year"],
            Column::Grade => &["履修時の年次", "grade"],
            Column::Uuid => &["UUID", "uuid"],
            Column::Url => &["アプリのURL", "url"],
            Column::Name => &["アプリ名", "name"],
            Column::Description => &["アプリの説明", "description"],
            Column::Pdf => &["pdf", "pdf_link", "pdfLink"],
            Column::QrCode => &["QRコード", "qrcode", "qr_code"],
        }
    }

    /// 正式なヘッダー名
    pub fn header(&self) -> &'static str {
        self.headers()[0]
    }

    /// 行から値を取得（最初に見つかった候補）
    pub fn get<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        self.headers()
            .iter()
            .find_map(|header| row.get(*header))
            .map(String::as_str)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}
