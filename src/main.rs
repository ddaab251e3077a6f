#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod cache;
mod catalog;
mod config;
mod library;
mod player;
mod settings;
mod video;

use app::LibraryPlayerApp;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let args = config::Args::parse();

    // Initialize logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Tutorial Library"),
        ..Default::default()
    };

    eframe::run_native(
        "Tutorial Library",
        options,
        Box::new(|cc| {
            setup_custom_style(&cc.egui_ctx);

            // Remote poster URLs are fetched through egui's image loaders
            egui_extras::install_image_loaders(&cc.egui_ctx);

            Ok(Box::new(LibraryPlayerApp::new(cc, args)))
        }),
    )
}

fn setup_custom_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Near-black palette with a soft blue accent
    let bg_dark = egui::Color32::from_rgb(10, 10, 12);
    let bg_card = egui::Color32::from_rgb(24, 24, 28);
    let border = egui::Color32::from_rgb(42, 44, 52);
    let text = egui::Color32::from_rgb(240, 242, 245);
    let text_muted = egui::Color32::from_rgb(130, 138, 150);
    let accent = egui::Color32::from_rgb(99, 140, 255);

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = bg_dark;
    style.visuals.window_fill = bg_card;
    style.visuals.extreme_bg_color = bg_dark;
    style.visuals.faint_bg_color = bg_card;

    let widgets = &mut style.visuals.widgets;
    widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, border);
    widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, text);
    widgets.inactive.bg_fill = egui::Color32::from_rgb(32, 34, 40);
    widgets.inactive.weak_bg_fill = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 12);
    widgets.inactive.fg_stroke = egui::Stroke::new(1.0, text_muted);
    widgets.hovered.weak_bg_fill = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 24);
    widgets.hovered.fg_stroke = egui::Stroke::new(1.0, text);
    widgets.hovered.bg_stroke = egui::Stroke::new(1.0, accent);
    widgets.active.fg_stroke = egui::Stroke::new(1.0, text);
    widgets.active.bg_stroke = egui::Stroke::new(1.0, accent);
    for state in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active] {
        state.rounding = egui::Rounding::same(8.0);
    }

    style.visuals.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26);
    style.visuals.selection.stroke = egui::Stroke::new(1.0, text);
    style.visuals.window_rounding = egui::Rounding::same(16.0);

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    ctx.set_style(style);
}
