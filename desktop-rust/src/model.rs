use std::path::PathBuf;

use app_gallery_common::gallery::truncate_description;
use app_gallery_common::{render_catalog, Catalog, DataSource, GalleryCard};

/// カード1枚分の表示データ（egui はHTMLではないので素の文字列を持つ）
#[derive(Debug, Clone)]
pub struct CardView {
    pub card: GalleryCard,
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading(String),
    Failed(String),
    Ready,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    pub source: DataSource,
    pub catalog: Catalog,
    pub cards: Vec<CardView>,
    pub asset_root: PathBuf,
}

impl GalleryState {
    pub fn new(source: DataSource, catalog: Catalog, asset_root: PathBuf) -> Self {
        let cards = render_catalog(&catalog)
            .into_iter()
            .map(|card| {
                let record = &catalog[card.handle.index()];
                CardView {
                    name: record.name.clone(),
                    summary: truncate_description(&record.description),
                    card,
                }
            })
            .collect();
        Self {
            source,
            catalog,
            cards,
            asset_root,
        }
    }
}
