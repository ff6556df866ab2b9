// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::Path;

use eframe::egui::IconData;
use fuel_widget::{config::{self, consts::CONFIG_FILE}, gui, runner};

fn app_icon() -> Option<IconData> {
    let img = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/fuel.png"
    )))
    .ok()?
    .to_rgba8();
    let (w, h) = img.dimensions();
    Some(IconData { rgba: img.into_raw(), width: w, height: h })
}

fn main() {
    let opts = config::file::load(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
        eprintln!("{e}; using defaults");
        config::WidgetOptions::default()
    });

    // Fetch + load before the window exists
    let startup = runner::startup(&opts);

    let mut viewport = gui::viewport(&opts);
    if let Some(icon) = app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions { viewport, ..Default::default() };

    if let Err(e) = gui::run(options, opts, startup) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
