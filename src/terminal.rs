//! 端末ビューア
//!
//! 一覧からアプリを選んでビューアを開き、←/→で前後、Escで一覧へ戻る。
//! 一覧でEscを押すと終了。

use crate::error::{GalleryError, Result};
use app_gallery_common::gallery::truncate_description;
use app_gallery_common::{
    render_catalog, CardEvent, CardResponse, Catalog, InputEvent, InputRouter, Key, PagingWidget,
    Slide, ViewerController, ViewerSurface,
};
use console::Term;
use dialoguer::Select;

/// 端末上のスライド表示
pub struct TerminalPager {
    term: Term,
    slides: Vec<String>,
    destroyed: bool,
}

/// 描画の失敗はビューアの状態に影響しないため、ログだけ残す
fn log_io(result: std::io::Result<()>, action: &str) {
    if let Err(e) = result {
        tracing::debug!(error = %e, action, "terminal write failed");
    }
}

impl TerminalPager {
    fn show(&self, index: usize) {
        if self.destroyed {
            return;
        }
        log_io(self.term.clear_screen(), "clear_screen");
        if let Some(image) = self.slides.get(index) {
            let line = format!("◀ [{}/{}] {} ▶", index + 1, self.slides.len(), image);
            log_io(self.term.write_line(&line), "write_line");
        }
    }
}

impl PagingWidget for TerminalPager {
    fn render(&mut self, slides: &[Slide], initial_index: usize) {
        self.slides = slides.iter().map(|s| s.image.clone()).collect();
        self.show(initial_index);
    }

    fn go_to(&mut self, index: usize) {
        self.show(index);
    }

    fn destroy(&mut self) {
        self.slides.clear();
        self.destroyed = true;
        log_io(self.term.clear_screen(), "clear_screen");
    }
}

/// 端末側の表示面
pub struct TerminalSurface {
    term: Term,
}

impl TerminalSurface {
    pub fn new(term: Term) -> Self {
        Self { term }
    }
}

impl ViewerSurface for TerminalSurface {
    type Pager = TerminalPager;

    fn create_pager(&mut self) -> TerminalPager {
        TerminalPager {
            term: self.term.clone(),
            slides: Vec::new(),
            destroyed: false,
        }
    }

    // 開いている間はカーソルを隠す
    fn set_scroll_locked(&mut self, locked: bool) {
        if locked {
            log_io(self.term.hide_cursor(), "hide_cursor");
        } else {
            log_io(self.term.show_cursor(), "show_cursor");
        }
    }
}

/// console のキーを入力イベントに変換
pub fn key_event(key: &console::Key) -> InputEvent {
    let key = match key {
        console::Key::ArrowLeft => Key::ArrowLeft,
        console::Key::ArrowRight => Key::ArrowRight,
        console::Key::Escape => Key::Escape,
        _ => Key::Other,
    };
    InputEvent::KeyDown(key)
}

fn term_error(e: impl std::fmt::Display) -> GalleryError {
    GalleryError::Terminal(e.to_string())
}

fn draw_panel(term: &Term, viewer: &ViewerController<TerminalSurface>) -> Result<()> {
    let Some(view) = viewer.view() else {
        return Ok(());
    };
    let panel = view.panel;

    term.write_line("")?;
    term.write_line(&console::style(&panel.name).bold().to_string())?;
    term.write_line(if panel.description.is_empty() { "-" } else { panel.description.as_str() })?;
    term.write_line("")?;
    term.write_line(&format!("アプリを開く: {}", panel.link))?;
    if let Some(pdf) = &panel.pdf_link {
        term.write_line(&format!("PDF: {}", pdf))?;
    }
    if let Some(qr) = &panel.qr_code {
        term.write_line(&format!("QRコード: {}", qr))?;
    }
    term.write_line("")?;
    term.write_line("[←] 前へ  [→] 次へ  [Esc] 閉じる")?;
    Ok(())
}

fn pick_card(catalog: &Catalog) -> Result<Option<usize>> {
    let cards = render_catalog(catalog);
    let labels: Vec<String> = cards
        .iter()
        .map(|card| {
            let record = &catalog[card.handle.index()];
            format!(
                "{:>3}. {}  {}",
                card.handle.index() + 1,
                record.name,
                truncate_description(&record.description)
            )
        })
        .collect();

    let selection = Select::new()
        .with_prompt("アプリを選択（Escで終了）")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(term_error)?;

    Ok(selection.and_then(|i| match cards[i].handle(CardEvent::Clicked) {
        CardResponse::Open(index) => Some(index),
        CardResponse::FollowLink(_) => None,
    }))
}

/// 端末ビューアを起動する
pub fn run_browse(catalog: Catalog, initial_index: Option<usize>) -> Result<()> {
    if catalog.is_empty() {
        return Err(GalleryError::EmptyCatalog("閲覧できるアプリがありません".into()));
    }

    let term = Term::stdout();
    let mut viewer = ViewerController::new(catalog.clone(), TerminalSurface::new(term.clone()));
    let mut next_open = initial_index;

    loop {
        let index = match next_open.take() {
            Some(index) => index,
            None => match pick_card(&catalog)? {
                Some(index) => index,
                None => break,
            },
        };

        viewer.open(index)?;
        draw_panel(&term, &viewer)?;

        while viewer.is_open() {
            let key = term.read_key()?;
            let event = key_event(&key);
            if InputRouter::dispatch(&mut viewer, event)?.is_some() && viewer.is_open() {
                draw_panel(&term, &viewer)?;
            }
        }
    }

    Ok(())
}
