#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod config;
mod export;
mod forms;
mod schedule;
mod session;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Campus Planner {}", env!("CARGO_PKG_VERSION"));

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 900.0])
        .with_min_inner_size([960.0, 700.0])
        .with_title("Campus Planner");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Campus Planner",
        options,
        Box::new(|cc| Ok(Box::new(ui::PlannerApp::new(cc)))),
    )
}
