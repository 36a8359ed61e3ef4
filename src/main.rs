//! A visual web page layout designer: drag elements onto a canvas, edit
//! their properties, and export the generated HTML/CSS.

mod app;
mod document;
mod element;
mod highlight;
mod html;
mod storage;

use crate::app::DesignerApp;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn initial_inner_size() -> egui::Vec2 {
    let document = document::Document::default();

    // Base: page canvas
    let mut w = document.canvas_size.x;
    let mut h = document.canvas_size.y;

    // Right properties panel (default width = 280)
    w += 280.0;

    // Left palette is open by default in DesignerApp::default()
    w += 200.0;

    // Small padding for menubar + side padding
    h += 40.0;
    w += 16.0;

    egui::vec2(w, h)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut native_options = eframe::NativeOptions::default();
    let size = initial_inner_size();

    native_options.viewport = egui::ViewportBuilder::default()
        .with_inner_size(size)
        .with_min_inner_size(egui::vec2(800.0, 600.0))
        .with_resizable(true);

    eframe::run_native(
        "Web Designer",
        native_options,
        Box::new(|_cc| Ok(Box::<DesignerApp>::default())),
    )
}
