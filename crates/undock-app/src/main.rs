//! Main application entry point.

mod app;
mod ui;

use eframe::egui;

use app::UndockApp;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting Undock");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Undock")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Undock",
        options,
        Box::new(|_cc| Ok(Box::new(UndockApp::new()))),
    )
}
