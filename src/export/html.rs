use crate::error::Result;
use app_gallery_common::gallery::escape_html;
use app_gallery_common::{GalleryCard, InfoPanel};
use serde::Serialize;
use std::fmt::Write;

/// 画像が読み込めなかったときの代替画像
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22402%22 height=%22874%22%3E%3Crect fill=%22%236366f1%22 width=%22402%22 height=%22874%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 fill=%22white%22 text-anchor=%22middle%22 dy=%22.3em%22 font-size=%2224%22%3E%E7%94%BB%E5%83%8F%E3%81%8C%E8%A6%8B%E3%81%A4%E3%81%8B%E3%82%8A%E3%81%BE%E3%81%9B%E3%82%93%3C/text%3E%3C/svg%3E";

const STYLE: &str = r#"
body { font-family: sans-serif; background: #f5f5f7; margin: 0; padding: 24px; }
h1 { text-align: center; }
.apps { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 24px; }
.app-card { background: #fff; border-radius: 12px; padding: 16px; box-shadow: 0 2px 8px rgba(0,0,0,.08); }
.app-card img.screenshot { width: 100%; aspect-ratio: 402 / 874; object-fit: cover; border-radius: 8px; }
.app-card-qrcode img { width: 72px; }
.app-card-link { color: #6366f1; }
footer { text-align: center; color: #888; margin-top: 32px; font-size: 12px; }
.app-card { cursor: pointer; }
.viewer { position: fixed; inset: 0; background: rgba(0,0,0,.8); display: flex; align-items: center; justify-content: center; z-index: 10; }
.viewer[hidden] { display: none; }
.viewer-content { background: #fff; border-radius: 12px; padding: 16px; max-width: 960px; max-height: 90vh; overflow: auto; display: flex; gap: 24px; position: relative; }
.viewer-slide { display: flex; align-items: center; gap: 8px; }
.viewer-image { max-height: 80vh; max-width: 40vw; border-radius: 8px; }
.viewer-close { position: absolute; top: 8px; right: 8px; }
.viewer-panel { min-width: 260px; }
.viewer-description { white-space: pre-wrap; }
.viewer-qrcode { width: 120px; display: block; margin-top: 12px; }
"#;

/// ビューアの動作（カードのクリックで開き、←/→で移動、Esc・背景・✕で閉じる）
const VIEWER_SCRIPT: &str = r#"
(() => {
  const viewer = document.getElementById('viewer');
  const entries = JSON.parse(document.getElementById('viewer-data').textContent);
  const find = (selector) => viewer.querySelector(selector);
  let current = null;

  const show = (index) => {
    current = index;
    const entry = entries[index];
    const image = find('.viewer-image');
    image.onerror = () => { image.onerror = null; image.src = viewer.dataset.placeholder; };
    image.src = entry.image;
    image.alt = entry.alt;
    find('.viewer-position').textContent = (index + 1) + '/' + entries.length;
    find('.viewer-name').textContent = entry.name;
    find('.viewer-description').textContent = entry.description;
    find('.viewer-link').href = entry.link;
    const pdf = find('.viewer-pdf');
    pdf.hidden = !entry.pdfLink;
    if (entry.pdfLink) pdf.href = entry.pdfLink;
    const qr = find('.viewer-qrcode');
    qr.hidden = !entry.qrCode;
    if (entry.qrCode) qr.src = entry.qrCode;
  };
  const open = (index) => {
    if (current !== null || !entries[index]) return;
    show(index);
    viewer.hidden = false;
    document.body.style.overflow = 'hidden';
  };
  const close = () => {
    if (current === null) return;
    current = null;
    viewer.hidden = true;
    document.body.style.overflow = '';
  };
  const navigate = (delta) => {
    if (current === null) return;
    const n = entries.length;
    show((((current + delta) % n) + n) % n);
  };

  document.querySelectorAll('.app-card').forEach((card) => {
    card.addEventListener('click', () => open(Number(card.dataset.index)));
  });
  find('.viewer-prev').addEventListener('click', () => navigate(-1));
  find('.viewer-next').addEventListener('click', () => navigate(1));
  find('.viewer-close').addEventListener('click', close);
  viewer.addEventListener('click', (event) => { if (event.target === viewer) close(); });
  document.addEventListener('keydown', (event) => {
    if (current === null) return;
    if (event.key === 'ArrowLeft') navigate(-1);
    else if (event.key === 'ArrowRight') navigate(1);
    else if (event.key === 'Escape') close();
  });
})();
"#;

const VIEWER_MARKUP: &str = r#"<div id="viewer" class="viewer" hidden data-placeholder="{placeholder}">
  <div class="viewer-content">
    <button class="viewer-close" type="button" aria-label="閉じる">✕</button>
    <div class="viewer-slide">
      <button class="viewer-prev" type="button" aria-label="前へ">◀</button>
      <img class="viewer-image" alt="">
      <button class="viewer-next" type="button" aria-label="次へ">▶</button>
    </div>
    <div class="viewer-panel">
      <p class="viewer-position"></p>
      <h2 class="viewer-name"></h2>
      <p class="viewer-description"></p>
      <a class="viewer-link" target="_blank" rel="noopener">アプリを開く →</a>
      <a class="viewer-pdf" target="_blank" rel="noopener" hidden>PDFを見る</a>
      <img class="viewer-qrcode" alt="QRコード" hidden>
    </div>
  </div>
</div>
"#;

/// ビューアに渡す1件分（スライド画像 + 詳細パネル）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerEntry<'a> {
    image: &'a str,
    alt: String,
    name: &'a str,
    description: &'a str,
    link: &'a str,
    pdf_link: Option<&'a str>,
    qr_code: Option<&'a str>,
}

/// ビューア用データ（`<script type="application/json">` に埋め込む）
///
/// 説明文は切り詰めずに渡し、表示側では textContent で入れる。
/// `<` は `\u003c` にしてスクリプト要素を閉じられないようにする。
pub fn viewer_data(cards: &[GalleryCard], panels: &[InfoPanel]) -> Result<String> {
    let entries: Vec<ViewerEntry> = cards
        .iter()
        .zip(panels)
        .map(|(card, panel)| ViewerEntry {
            image: &card.image,
            alt: format!("Item {}", card.id),
            name: &panel.name,
            description: &panel.description,
            link: &panel.link,
            pdf_link: panel.pdf_link.as_deref(),
            qr_code: panel.qr_code.as_deref(),
        })
        .collect();
    Ok(serde_json::to_string(&entries)?.replace('<', "\\u003c"))
}

/// カード1枚のHTML
///
/// 名前と説明文はカード生成時にエスケープ済み。
pub fn render_card(card: &GalleryCard) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<article class="app-card" data-index="{index}">
  <img class="screenshot" src="{image}" alt="Item {id}" onerror="this.onerror=null;this.src='{placeholder}'">
"#,
        index = card.handle.index(),
        image = escape_html(&card.image),
        id = escape_html(&card.id),
        placeholder = PLACEHOLDER_IMAGE,
    );
    if let Some(qr) = &card.qr_code {
        let _ = writeln!(
            html,
            r#"  <div class="app-card-qrcode"><img src="{}" alt="QRコード"></div>"#,
            escape_html(qr)
        );
    }
    let _ = write!(
        html,
        r#"  <h3 class="app-card-name">{name}</h3>
  <p class="app-card-description">{description}</p>
  <a href="{link}" target="_blank" rel="noopener" class="app-card-link" onclick="event.stopPropagation()">アプリを見る →</a>
</article>
"#,
        name = card.name,
        description = card.truncated_description,
        link = escape_html(&card.outbound_link),
    );
    html
}

/// ギャラリーページ全体のHTML
///
/// `panels` は `cards` と同じ順の詳細パネル。
pub fn render_page(
    cards: &[GalleryCard],
    panels: &[InfoPanel],
    title: &str,
    generated_at: &str,
) -> Result<String> {
    let mut html = String::new();
    let title = escape_html(title);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{title}</h1>
<main class="apps">
"#
    );
    for card in cards {
        html.push_str(&render_card(card));
    }
    let _ = write!(
        html,
        r#"</main>
<footer>{count}件 / {generated_at}</footer>
{viewer}<script type="application/json" id="viewer-data">{data}</script>
<script>{VIEWER_SCRIPT}</script>
</body>
</html>
"#,
        count = cards.len(),
        generated_at = escape_html(generated_at),
        viewer = VIEWER_MARKUP.replace("{placeholder}", PLACEHOLDER_IMAGE),
        data = viewer_data(cards, panels)?,
    );
    Ok(html)
}
