use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;

mod app;
mod config;
mod logging;
mod models;
mod persistence;
mod store;

use app::{FitnessApp, WorkoutLog};
use config::{Args, Settings};
use persistence::WorkoutFile;

const WINDOW_TITLE: &str = "Fitness Tracker";
const WINDOW_SIZE: [f32; 2] = [720.0, 900.0];

fn main() -> Result<(), eframe::Error> {
    let settings = Settings::from(Args::parse());
    logging::init(settings.log_level.as_deref());
    tracing::info!(data_file = %settings.data_file.display(), "Starting");

    let log = WorkoutLog::open(WorkoutFile::new(settings.data_file.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            if let Some(font) = &settings.font {
                install_font(&cc.egui_ctx, font);
            }
            Ok(Box::new(FitnessApp::new(cc, log)))
        }),
    )
}

/// Uses the TTF at `path` for every text style. Keeps the built-in fonts if it can't be read.
fn install_font(ctx: &egui::Context, path: &Path) {
    let font_data = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open font file");
            return;
        }
    };

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_owned());

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        name.clone(),
        Arc::from(egui::FontData::from_owned(font_data)),
    );
    // Keep the defaults behind it for glyphs the custom font lacks.
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().insert(0, name.clone());
    }

    ctx.set_fonts(fonts);
    tracing::debug!(font = %name, "Installed custom font");
}
