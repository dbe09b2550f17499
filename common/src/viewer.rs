//! ビューア状態機械
//!
//! 状態は `Closed` と `Open(current_index)` の2つ。
//! 正のインデックスはコントローラが保持し、ページングウィジェットは
//! 命令（`render` / `go_to` / `destroy`）を受けてスライド変更イベントを返すだけの周辺機器として扱う。
//!
//! ウィジェットのインスタンスは `open()` ごとに1つ生成され、開いている間のセッションが所有する。
//! セッションが破棄されるとき必ず `destroy()` が呼ばれるため、前回のスライドやイベント登録は残らない。

use crate::error::ViewerError;
use crate::types::{AppRecord, Catalog};
use serde::Serialize;

/// スライド1枚（レコード1件に対応）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub index: usize,
    pub image: String,
    pub alt: String,
}

impl Slide {
    fn from_record(index: usize, record: &AppRecord) -> Self {
        Self {
            index,
            image: record.screenshot_path.clone(),
            alt: format!("Item {}", record.id),
        }
    }
}

/// 詳細パネルの内容
///
/// 説明文は切り詰めない。テキストとしてそのまま表示する前提。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoPanel {
    pub name: String,
    pub description: String,
    pub link: String,
    pub pdf_link: Option<String>,
    pub qr_code: Option<String>,
}

impl InfoPanel {
    pub fn for_record(record: &AppRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            link: record.url.clone(),
            pdf_link: record.pdf().map(str::to_string),
            qr_code: record.qr_code().map(str::to_string),
        }
    }
}

/// ページングウィジェット（カルーセル）
pub trait PagingWidget {
    /// スライド一式を描画し、指定位置を表示する
    fn render(&mut self, slides: &[Slide], initial_index: usize);
    /// 指定位置へ移動する
    fn go_to(&mut self, index: usize);
    /// インスタンスを破棄し、登録したイベントをすべて解除する
    fn destroy(&mut self);
}

/// ビューアを表示する側（描画層）
pub trait ViewerSurface {
    type Pager: PagingWidget;

    /// ウィジェットを新規生成する
    fn create_pager(&mut self) -> Self::Pager;

    /// 背景のスクロールをロック／解除する
    fn set_scroll_locked(&mut self, locked: bool);
}

/// ビューアの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open { current_index: usize },
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        matches!(self, ViewerState::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self {
            ViewerState::Open { current_index } => Some(*current_index),
            ViewerState::Closed => None,
        }
    }
}

/// ビューアへの命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    Open(usize),
    Navigate(isize),
    SlideChanged(usize),
    Close,
}

/// 開いているビューアの表示内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerView<'a> {
    pub slides: &'a [Slide],
    pub current_index: usize,
    pub panel: &'a InfoPanel,
}

struct Session<P: PagingWidget> {
    current_index: usize,
    slides: Vec<Slide>,
    panel: InfoPanel,
    pager: P,
}

impl<P: PagingWidget> Drop for Session<P> {
    fn drop(&mut self) {
        self.pager.destroy();
    }
}

/// ビューアコントローラ
pub struct ViewerController<S: ViewerSurface> {
    catalog: Catalog,
    surface: S,
    session: Option<Session<S::Pager>>,
}

impl<S: ViewerSurface> ViewerController<S> {
    pub fn new(catalog: Catalog, surface: S) -> Self {
        Self {
            catalog,
            surface,
            session: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> ViewerState {
        match &self.session {
            Some(session) => ViewerState::Open {
                current_index: session.current_index,
            },
            None => ViewerState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.current_index)
    }

    /// 詳細パネル（閉じているときは None）
    pub fn panel(&self) -> Option<&InfoPanel> {
        self.session.as_ref().map(|s| &s.panel)
    }

    /// 現在のスライド一式（閉じているときは空）
    pub fn slides(&self) -> &[Slide] {
        self.session.as_ref().map(|s| s.slides.as_slice()).unwrap_or(&[])
    }

    pub fn view(&self) -> Option<ViewerView<'_>> {
        self.session.as_ref().map(|s| ViewerView {
            slides: &s.slides,
            current_index: s.current_index,
            panel: &s.panel,
        })
    }

    /// 命令を適用する
    pub fn apply(&mut self, command: ViewerCommand) -> Result<ViewerState, ViewerError> {
        match command {
            ViewerCommand::Open(index) => self.open(index),
            ViewerCommand::Navigate(delta) => self.navigate(delta),
            ViewerCommand::SlideChanged(index) => self.slide_changed(index),
            ViewerCommand::Close => self.close(),
        }
    }

    /// ビューアを開く
    ///
    /// 要求されたインデックスに関わらず全レコード分のスライドを生成する。
    pub fn open(&mut self, index: usize) -> Result<ViewerState, ViewerError> {
        if self.session.is_some() {
            return Err(ViewerError::AlreadyOpen);
        }
        let record = self.record(index)?;
        let panel = InfoPanel::for_record(record);

        let slides: Vec<Slide> = self
            .catalog
            .iter()
            .enumerate()
            .map(|(i, r)| Slide::from_record(i, r))
            .collect();

        let mut pager = self.surface.create_pager();
        pager.render(&slides, index);
        self.surface.set_scroll_locked(true);

        tracing::debug!(index, slides = slides.len(), "viewer opened");
        self.session = Some(Session {
            current_index: index,
            slides,
            panel,
            pager,
        });
        Ok(self.state())
    }

    /// 前後へ移動する（末尾の次は先頭、先頭の前は末尾）
    pub fn navigate(&mut self, delta: isize) -> Result<ViewerState, ViewerError> {
        let len = self.catalog.len();
        let session = self.session.as_mut().ok_or(ViewerError::NotOpen)?;

        // 先に件数で剰余を取り、大きな delta でも桁あふれしない
        let step = delta.rem_euclid(len as isize) as usize;
        let next = (session.current_index + step) % len;
        session.pager.go_to(next);
        session.current_index = next;
        session.panel = InfoPanel::for_record(&self.catalog[next]);

        tracing::debug!(index = next, delta, "viewer navigated");
        Ok(self.state())
    }

    /// ウィジェット側でスライドが変わったときの通知
    pub fn slide_changed(&mut self, new_index: usize) -> Result<ViewerState, ViewerError> {
        if self.session.is_none() {
            return Err(ViewerError::NotOpen);
        }
        let panel = InfoPanel::for_record(self.record(new_index)?);
        if let Some(session) = self.session.as_mut() {
            session.current_index = new_index;
            session.panel = panel;
        }
        Ok(self.state())
    }

    /// ビューアを閉じる
    pub fn close(&mut self) -> Result<ViewerState, ViewerError> {
        let session = self.session.take().ok_or(ViewerError::NotOpen)?;
        drop(session);
        self.surface.set_scroll_locked(false);

        tracing::debug!("viewer closed");
        Ok(ViewerState::Closed)
    }

    fn record(&self, index: usize) -> Result<&AppRecord, ViewerError> {
        self.catalog.get(index).ok_or(ViewerError::IndexOutOfRange {
            index,
            len: self.catalog.len(),
        })
    }
}
