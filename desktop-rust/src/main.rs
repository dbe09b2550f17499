mod app;
mod carousel;
mod io;
mod model;

use app::{configure_fonts, DesktopApp};
use app_gallery_common::DataSource;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();

    let source = DataSource::parse(&std::env::args().nth(1).unwrap_or_else(|| "data.csv".to_string()));

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "App Gallery",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new(source))
        }),
    )
}
