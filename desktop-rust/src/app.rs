use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Color32, RichText, Sense};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use image::ImageReader;

use app_gallery_common::{
    CardEvent, CardResponse, DataSource, InfoPanel, InputEvent, InputRouter, Key,
    NormalizationResult, PointerTarget, ViewerController,
};

use crate::carousel::EguiSurface;
use crate::io::{asset_root, load_catalog_blocking, resolve_asset};
use crate::model::{CardView, GalleryState, LoadState};

const CARD_WIDTH: f32 = 220.0;
const CARD_IMAGE_HEIGHT: f32 = 160.0;
const QR_SIZE: f32 = 64.0;
const SLIDE_SIZE: [f32; 2] = [420.0, 320.0];
const VIEWER_WIDTH: f32 = 560.0;

pub struct DesktopApp {
    load: LoadState,
    gallery: Option<GalleryState>,
    viewer: Option<ViewerController<EguiSurface>>,
    load_rx: Option<Receiver<LoadMessage>>,
    thumbs: HashMap<String, egui::TextureHandle>,
    thumb_failed: HashSet<String>,
    thumb_rx: Receiver<ThumbData>,
    thumb_tx: mpsc::Sender<ThumbData>,
    thumb_inflight: HashSet<String>,
    pending_thumbs: Vec<ThumbData>,
}

struct LoadMessage {
    source: DataSource,
    result: anyhow::Result<NormalizationResult>,
}

struct ThumbData {
    path: String,
    size: [usize; 2],
    pixels: Vec<u8>,
}

/// ビューア内の描画で集めた操作（描画後にまとめて処理する）
#[derive(Default)]
struct ViewerActions {
    events: Vec<InputEvent>,
    step: Option<isize>,
    drag: f32,
    released: bool,
}

impl DesktopApp {
    pub fn new(source: DataSource) -> Self {
        let (thumb_tx, thumb_rx) = mpsc::channel();
        let mut app = Self {
            load: LoadState::default(),
            gallery: None,
            viewer: None,
            load_rx: None,
            thumbs: HashMap::new(),
            thumb_failed: HashSet::new(),
            thumb_rx,
            thumb_tx,
            thumb_inflight: HashSet::new(),
            pending_thumbs: Vec::new(),
        };
        app.start_load(source);
        app
    }

    fn open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
            self.start_load(DataSource::File(path));
        }
    }

    fn reload(&mut self) {
        if let Some(source) = self.gallery.as_ref().map(|g| g.source.clone()) {
            self.start_load(source);
        }
    }

    fn start_load(&mut self, source: DataSource) {
        if self.load_rx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.load_rx = Some(rx);
        self.load = LoadState::Loading(source.to_string());

        std::thread::spawn(move || {
            let result = load_catalog_blocking(&source);
            let _ = tx.send(LoadMessage { source, result });
        });
    }

    fn finish_load(&mut self, message: LoadMessage) {
        match message.result {
            Ok(result) => {
                let report = &result.report;
                tracing::info!(
                    kept = report.kept_rows(),
                    dropped = report.dropped_rows.len(),
                    "catalog loaded"
                );
                let root = asset_root(&message.source);
                let catalog = result.into_catalog();

                self.thumbs.clear();
                self.thumb_failed.clear();
                self.viewer = Some(ViewerController::new(catalog.clone(), EguiSurface::default()));
                self.gallery = Some(GalleryState::new(message.source, catalog, root));
                self.load = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!("{err:#}");
                self.viewer = None;
                self.gallery = None;
                self.load = LoadState::Failed(format!("データの読み込みに失敗しました: {err:#}"));
            }
        }
    }

    fn request_thumbnail(&mut self, path: &str) {
        if path.is_empty()
            || self.thumbs.contains_key(path)
            || self.thumb_inflight.contains(path)
            || self.thumb_failed.contains(path)
        {
            return;
        }
        self.thumb_inflight.insert(path.to_string());
        let sender = self.thumb_tx.clone();
        let path_owned = path.to_string();

        std::thread::spawn(move || {
            let image = ImageReader::open(&path_owned).ok().and_then(|r| r.decode().ok());
            if let Some(image) = image {
                let thumb = image.thumbnail(SLIDE_SIZE[0] as u32, SLIDE_SIZE[1] as u32);
                let size = [thumb.width() as usize, thumb.height() as usize];
                let pixels = thumb.to_rgba8().into_raw();
                let _ = sender.send(ThumbData {
                    path: path_owned,
                    size,
                    pixels,
                });
            } else {
                let _ = sender.send(ThumbData {
                    path: path_owned,
                    size: [0, 0],
                    pixels: Vec::new(),
                });
            }
        });
    }

    fn process_pending_thumbs(&mut self, ctx: &egui::Context) {
        let pending = std::mem::take(&mut self.pending_thumbs);
        for msg in pending {
            if msg.size[0] == 0 || msg.size[1] == 0 {
                tracing::debug!(path = %msg.path, "image unavailable");
                self.thumb_failed.insert(msg.path);
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(msg.size, &msg.pixels);
            let texture = ctx.load_texture(&msg.path, color_image, egui::TextureOptions::default());
            self.thumbs.insert(msg.path, texture);
        }
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.thumb_rx.try_recv() {
            self.thumb_inflight.remove(&msg.path);
            self.pending_thumbs.push(msg);
        }

        if let Some(rx) = &self.load_rx {
            if let Ok(msg) = rx.try_recv() {
                self.load_rx = None;
                self.finish_load(msg);
            }
        }
    }

    /// 画像を描く。読み込めない画像は同じ大きさのプレースホルダにする
    fn image_or_placeholder(
        &mut self,
        ui: &mut egui::Ui,
        path: &str,
        size: egui::Vec2,
        sense: Sense,
    ) -> egui::Response {
        let root = self.gallery.as_ref().map(|g| g.asset_root.clone()).unwrap_or_default();
        let full = resolve_asset(&root, path);

        if let Some(texture) = self.thumbs.get(&full) {
            return ui.add(egui::Image::new(texture).fit_to_exact_size(size).sense(sense));
        }

        let label = if path.is_empty() || self.thumb_failed.contains(&full) {
            "画像なし"
        } else {
            self.request_thumbnail(&full);
            "読み込み中..."
        };
        let (rect, response) = ui.allocate_exact_size(size, sense);
        ui.painter().rect_filled(rect, 8.0, Color32::from_rgb(99, 102, 241));
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(14.0),
            Color32::WHITE,
        );
        response
    }

    fn render_card(&mut self, ui: &mut egui::Ui, view: &CardView) -> Option<CardEvent> {
        let mut event = None;
        let frame = egui::Frame::none()
            .fill(Color32::from_rgb(24, 28, 40))
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(40)))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(10.0));

        frame.show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                let image = self.image_or_placeholder(
                    ui,
                    &view.card.image,
                    egui::vec2(CARD_WIDTH, CARD_IMAGE_HEIGHT),
                    Sense::click(),
                );
                if image.clicked() {
                    event = Some(CardEvent::Clicked);
                }

                if let Some(qr) = &view.card.qr_code {
                    let qr = self.image_or_placeholder(ui, qr, egui::vec2(QR_SIZE, QR_SIZE), Sense::click());
                    if qr.clicked() {
                        event = Some(CardEvent::Clicked);
                    }
                }

                let name = ui.add(
                    egui::Label::new(RichText::new(&view.name).strong().size(16.0)).sense(Sense::click()),
                );
                let summary = ui.add(
                    egui::Label::new(RichText::new(&view.summary).size(12.0).color(Color32::from_gray(170)))
                        .wrap(true)
                        .sense(Sense::click()),
                );
                if name.clicked() || summary.clicked() {
                    event = Some(CardEvent::Clicked);
                }

                // リンクはカードのクリックとは別扱い
                if ui.link("アプリを見る →").clicked() {
                    event = Some(CardEvent::LinkClicked);
                }
            });
        });

        event
    }

    fn render_gallery(&mut self, ui: &mut egui::Ui) {
        let Some(cards) = self.gallery.as_ref().map(|g| g.cards.clone()) else {
            return;
        };
        if cards.is_empty() {
            ui.label(RichText::new("表示できるアプリがありません").color(Color32::from_gray(170)));
            return;
        }

        let locked = self.viewer.as_ref().is_some_and(|v| v.surface().scroll_locked());
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .enable_scrolling(!locked)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                    for view in &cards {
                        if let Some(event) = self.render_card(ui, view) {
                            clicked = Some((view.card.clone(), event));
                        }
                    }
                });
            });

        let Some((card, event)) = clicked else {
            return;
        };
        match card.handle(event) {
            CardResponse::Open(index) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    if let Err(err) = viewer.open(index) {
                        tracing::warn!(%err, "open rejected");
                    }
                }
            }
            CardResponse::FollowLink(url) => ui.ctx().open_url(egui::OpenUrl::new_tab(url)),
        }
    }

    fn render_viewer(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        let Some(panel) = viewer.panel().cloned() else {
            return;
        };
        let (slide, position, total) = {
            let carousel = viewer.surface().carousel();
            (
                carousel.current_slide().cloned(),
                carousel.current() + 1,
                carousel.len(),
            )
        };

        let mut actions = ViewerActions::default();

        let backdrop = egui::Area::new(egui::Id::new("viewer_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen = ctx.screen_rect();
                let response = ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(screen, 0.0, Color32::from_black_alpha(200));
                response
            })
            .inner;
        if backdrop.clicked() {
            actions.events.push(InputEvent::Click(PointerTarget::Backdrop));
        }

        egui::Area::new(egui::Id::new("viewer_content"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.set_width(VIEWER_WIDTH);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("{position}/{total}")).color(Color32::from_gray(170)));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("✕").clicked() {
                                actions.events.push(InputEvent::Click(PointerTarget::CloseButton));
                            }
                        });
                    });

                    ui.horizontal(|ui| {
                        if ui.button("◀").clicked() {
                            actions.step = Some(-1);
                        }
                        let image = slide.as_ref().map(|s| s.image.as_str()).unwrap_or_default();
                        let response = self.image_or_placeholder(
                            ui,
                            image,
                            egui::vec2(SLIDE_SIZE[0], SLIDE_SIZE[1]),
                            Sense::click_and_drag(),
                        );
                        // スワイプ
                        if response.dragged() {
                            actions.drag = response.drag_delta().x;
                        }
                        if response.drag_stopped() {
                            actions.released = true;
                        }
                        if let Some(slide) = &slide {
                            response.on_hover_text(slide.alt.as_str());
                        }
                        if ui.button("▶").clicked() {
                            actions.step = Some(1);
                        }
                    });

                    ui.separator();
                    render_panel(self, ui, &panel);
                });
            });

        self.apply_viewer_actions(actions);
    }

    fn apply_viewer_actions(&mut self, actions: ViewerActions) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        // ウィジェット側で動いた位置をコントローラへ伝える
        let mut moved = actions.step.and_then(|delta| viewer.surface().step(delta));
        if actions.drag != 0.0 {
            viewer.surface().drag(actions.drag);
        }
        if actions.released {
            moved = moved.or_else(|| viewer.surface().release());
        }
        if let Some(index) = moved {
            if let Err(err) = viewer.slide_changed(index) {
                tracing::warn!(%err, "slide change rejected");
            }
        }

        for event in actions.events {
            self.dispatch(event);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let events: Vec<InputEvent> = ctx.input(|i| {
            [
                (egui::Key::ArrowLeft, Key::ArrowLeft),
                (egui::Key::ArrowRight, Key::ArrowRight),
                (egui::Key::Escape, Key::Escape),
            ]
            .into_iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, key)| InputEvent::KeyDown(key))
            .collect()
        });
        for event in events {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if let Err(err) = InputRouter::dispatch(viewer, event) {
            tracing::warn!(%err, ?event, "input rejected");
        }
    }
}

fn render_panel(app: &mut DesktopApp, ui: &mut egui::Ui, panel: &InfoPanel) {
    ui.heading(&panel.name);
    egui::ScrollArea::vertical()
        .id_source("viewer_description")
        .max_height(160.0)
        .show(ui, |ui| {
            ui.label(&panel.description);
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.hyperlink_to("アプリを開く →", &panel.link);
        if let Some(pdf) = &panel.pdf_link {
            ui.hyperlink_to("PDFを見る", pdf);
        }
    });

    if let Some(qr) = &panel.qr_code {
        ui.add_space(8.0);
        app.image_or_placeholder(ui, qr, egui::vec2(120.0, 120.0), Sense::hover());
    }
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    ];

    let Some(data) = candidates.iter().find_map(|path| std::fs::read(path).ok()) else {
        tracing::warn!("no CJK font found");
        return;
    };
    fonts.font_data.insert("jp_fallback".to_string(), FontData::from_owned(data));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().insert(0, "jp_fallback".to_string());
    }
    ctx.set_fonts(fonts);
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.load_rx.is_some() || !self.thumb_inflight.is_empty() || !self.pending_thumbs.is_empty() {
            ctx.request_repaint();
        }
        self.poll_messages();
        self.process_pending_thumbs(ctx);
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("ファイル", |ui| {
                    if ui.button("CSVを開く").clicked() {
                        self.open_csv();
                        ui.close_menu();
                    }
                    let reload_enabled = self.gallery.is_some() && self.load_rx.is_none();
                    if ui.add_enabled(reload_enabled, egui::Button::new("再読み込み")).clicked() {
                        self.reload();
                        ui.close_menu();
                    }
                });
                if let Some(gallery) = &self.gallery {
                    ui.separator();
                    ui.label(RichText::new(format!("{}件 / {}", gallery.catalog.len(), gallery.source))
                        .color(Color32::from_gray(170)));
                }
            });
        });

        let load = self.load.clone();
        egui::CentralPanel::default().show(ctx, |ui| match &load {
            LoadState::Idle => {}
            LoadState::Loading(source) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("読み込み中: {source}"));
                });
            }
            LoadState::Failed(message) => {
                ui.label(RichText::new(message).color(Color32::from_rgb(220, 80, 80)));
            }
            LoadState::Ready => self.render_gallery(ui),
        });

        self.render_viewer(ctx);
    }
}
