#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let settings = set_paint::DrawingSettings::default();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                settings.canvas_width as f32 + 200.0,
                settings.canvas_height as f32 + 40.0,
            ])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Untitled - SetPaint"),
        ..Default::default()
    };
    eframe::run_native(
        "SetPaint",
        native_options,
        Box::new(|cc| Ok(Box::new(set_paint::PaintApp::new(cc)))),
    )
}
