//! CarPrice Studio - Car Price Dataset Explorer & Prediction Dashboard
//!
//! A Rust application for browsing, visualising and predicting automobile
//! prices from a cleaned listings dataset.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::CarPriceApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::load();
    log::info!("starting with dataset {}", config.dataset_path.display());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("CarPrice Studio"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CarPrice Studio",
        options,
        Box::new(|cc| Ok(Box::new(CarPriceApp::new(cc, config)))),
    )
}
