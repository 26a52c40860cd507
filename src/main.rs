#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use app::WebpickApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::init(); // Log to stderr (if you want to see logs)

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 500.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "webpick - Image to WebP Converter",
        options,
        Box::new(|_cc| Ok(Box::new(WebpickApp::default()))),
    )
}
