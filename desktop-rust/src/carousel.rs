//! egui用のページングウィジェット
//!
//! コントローラから `render` / `go_to` / `destroy` を受け、
//! 自身の矢印ボタンやスワイプで移動したときは新しい位置を返す（スライド変更イベント）。

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use app_gallery_common::{PagingWidget, Slide, ViewerSurface};

/// スワイプと判定する横方向の移動量
pub const SWIPE_THRESHOLD: f32 = 60.0;

#[derive(Debug, Default)]
pub struct Carousel {
    slides: Vec<Slide>,
    current: usize,
    live: bool,
    drag_accum: f32,
}

impl Carousel {
    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// 矢印ボタンでの移動（端は反対側へ回り込む）
    pub fn step(&mut self, delta: isize) -> Option<usize> {
        if !self.live || self.slides.is_empty() {
            return None;
        }
        let len = self.slides.len() as isize;
        self.current = (self.current as isize + delta).rem_euclid(len) as usize;
        Some(self.current)
    }

    /// ドラッグ量を蓄積する
    pub fn drag(&mut self, dx: f32) {
        self.drag_accum += dx;
    }

    /// ドラッグ終了時、閾値を超えていれば移動する
    pub fn release(&mut self) -> Option<usize> {
        let accum = std::mem::take(&mut self.drag_accum);
        if accum > SWIPE_THRESHOLD {
            self.step(-1)
        } else if accum < -SWIPE_THRESHOLD {
            self.step(1)
        } else {
            None
        }
    }
}

pub struct EguiPager {
    carousel: Rc<RefCell<Carousel>>,
}

impl PagingWidget for EguiPager {
    fn render(&mut self, slides: &[Slide], initial_index: usize) {
        let mut carousel = self.carousel.borrow_mut();
        carousel.slides = slides.to_vec();
        carousel.current = initial_index;
        carousel.drag_accum = 0.0;
        carousel.live = true;
    }

    fn go_to(&mut self, index: usize) {
        let mut carousel = self.carousel.borrow_mut();
        if carousel.live && index < carousel.slides.len() {
            carousel.current = index;
        }
    }

    fn destroy(&mut self) {
        *self.carousel.borrow_mut() = Carousel::default();
    }
}

/// ビューアの表示面（カルーセル + ギャラリーのスクロールロック）
#[derive(Default)]
pub struct EguiSurface {
    carousel: Rc<RefCell<Carousel>>,
    scroll_locked: bool,
}

impl EguiSurface {
    pub fn carousel(&self) -> Ref<'_, Carousel> {
        self.carousel.borrow()
    }

    pub fn step(&self, delta: isize) -> Option<usize> {
        self.carousel.borrow_mut().step(delta)
    }

    pub fn drag(&self, dx: f32) {
        self.carousel.borrow_mut().drag(dx);
    }

    pub fn release(&self) -> Option<usize> {
        self.carousel.borrow_mut().release()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl ViewerSurface for EguiSurface {
    type Pager = EguiPager;

    fn create_pager(&mut self) -> EguiPager {
        if self.carousel.borrow().is_live() {
            tracing::warn!("carousel still live when creating a new pager");
        }
        EguiPager {
            carousel: Rc::clone(&self.carousel),
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
