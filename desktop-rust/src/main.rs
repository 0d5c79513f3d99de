mod app;
mod io;
mod model;

use anyhow::Result;
use app::{configure_fonts, initial_window_size, DesktopApp};
use excel_keyword_search::config::Config;
use excel_keyword_search::logging::init_logging;
use excel_keyword_search::session::SearchSession;
use excel_search_common::MessageId;

fn main() -> Result<()> {
    init_logging(false);

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unavailable, using defaults");
        Config::in_memory()
    });
    let session = SearchSession::new(config);
    let title = session.translator().text(MessageId::AppTitle);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(initial_window_size(&session))
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new(session))
        }),
    )
    .map_err(|err| anyhow::anyhow!("GUI起動失敗: {}", err))
}
