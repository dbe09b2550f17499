//! App Gallery Common Library
//!
//! CLIとデスクトップビューアで共有されるモデル・正規化・ビューア状態機械

pub mod types;
pub mod columns;
pub mod error;
pub mod normalizer;
pub mod gallery;
pub mod viewer;
pub mod input;
#[cfg(feature = "loader")]
pub mod loader;
#[cfg(feature = "loader")]
pub mod table;

pub use types::{qr_code_path, screenshot_path, AppRecord, Catalog, RawRow};
pub use columns::Column;
pub use error::{Error, LoadError, Result, ViewerError};
pub use normalizer::{normalize_rows, record_id, normalize_with_report, NormalizationReport, NormalizationResult};
pub use gallery::{render_catalog, render_gallery, CardEvent, CardHandle, CardResponse, GalleryCard};
pub use viewer::{InfoPanel, PagingWidget, Slide, ViewerCommand, ViewerController, ViewerState, ViewerSurface};
pub use input::{InputEvent, InputRouter, Key, PointerTarget};
#[cfg(feature = "loader")]
pub use loader::{load_catalog, DataSource};
#[cfg(feature = "loader")]
pub use table::CsvTable;
