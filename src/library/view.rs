// Library overlay - entry list on the left, poster preview and details on the right
use eframe::egui;

use super::browser::LibraryBrowser;
use crate::cache::{self, TextureCache};
use crate::catalog::MediaEntry;
use crate::player::MediaLoader;

const BACKDROP: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 160);
const PANEL: egui::Color32 = egui::Color32::from_rgb(10, 10, 10);
const SIDEBAR: egui::Color32 = egui::Color32::from_rgb(20, 21, 24);
const BORDER: egui::Color32 = egui::Color32::from_rgb(38, 40, 46);
const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(130, 138, 150);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(99, 140, 255);

/// Max posters kept as textures
const POSTER_CACHE_SIZE: usize = 64;

/// What the user asked for this frame
enum Intent {
    Select(String),
    Play,
    Close,
}

pub struct LibraryView {
    posters: TextureCache,
}

impl LibraryView {
    pub fn new() -> Self {
        Self {
            posters: TextureCache::new(POSTER_CACHE_SIZE),
        }
    }

    /// Forget cached posters, e.g. after switching catalogs
    pub fn clear_posters(&mut self) {
        self.posters.clear();
    }

    /// Draw the overlay if the browser wants it visible and apply the user's input
    pub fn show<L: MediaLoader>(&mut self, ctx: &egui::Context, browser: &mut LibraryBrowser<L>) {
        if !browser.is_overlay_visible() {
            return;
        }

        let mut intents = Vec::new();
        let screen = ctx.screen_rect();
        let panel_size = egui::vec2(
            (screen.width() * 0.9).min(1100.0),
            (screen.height() * 0.8).min(700.0),
        );
        let panel_rect = egui::Rect::from_center_size(screen.center(), panel_size);

        egui::Area::new(egui::Id::new("library_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, BACKDROP);
                if backdrop.clicked() {
                    intents.push(Intent::Close);
                }

                // Swallow clicks on the panel so they don't reach the backdrop
                ui.allocate_rect(panel_rect, egui::Sense::click());
                ui.painter().rect(panel_rect, 16.0, PANEL, egui::Stroke::new(1.0, BORDER));

                let sidebar_rect = egui::Rect::from_min_max(
                    panel_rect.min,
                    egui::pos2(panel_rect.left() + panel_rect.width() / 3.0, panel_rect.bottom()),
                );
                let detail_rect = egui::Rect::from_min_max(
                    egui::pos2(sidebar_rect.right(), panel_rect.top()),
                    panel_rect.max,
                );

                ui.painter().rect_filled(
                    sidebar_rect,
                    egui::Rounding { nw: 16.0, sw: 16.0, ne: 0.0, se: 0.0 },
                    SIDEBAR,
                );

                ui.allocate_new_ui(egui::UiBuilder::new().max_rect(sidebar_rect.shrink(12.0)), |ui| {
                    show_sidebar(ui, browser, &mut intents);
                });

                ui.allocate_new_ui(egui::UiBuilder::new().max_rect(detail_rect), |ui| {
                    self.show_detail(ui, ctx, browser, &mut intents);
                });

                let close_rect = egui::Rect::from_min_size(
                    detail_rect.right_top() + egui::vec2(-48.0, 12.0),
                    egui::vec2(36.0, 36.0),
                );
                if ui.put(close_rect, egui::Button::new("✕")).clicked() {
                    intents.push(Intent::Close);
                }
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            intents.push(Intent::Close);
        }

        for intent in intents {
            match intent {
                Intent::Select(id) => browser.select(&id),
                Intent::Play => browser.play(),
                Intent::Close => browser.close(),
            }
        }
    }

    fn show_detail<L: MediaLoader>(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        browser: &LibraryBrowser<L>,
        intents: &mut Vec<Intent>,
    ) {
        let Some(entry) = browser.selected_entry() else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No tutorials yet").size(20.0).color(TEXT_MUTED));
            });
            return;
        };

        let rect = ui.max_rect();
        let info_height = 220.0_f32.min(rect.height() * 0.45);
        let preview_rect = egui::Rect::from_min_max(
            rect.min,
            egui::pos2(rect.right(), rect.bottom() - info_height),
        );
        let info_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left(), preview_rect.bottom()),
            rect.max,
        );

        let preview = ui.allocate_rect(preview_rect, egui::Sense::click());
        self.paint_preview(ui, ctx, entry, preview_rect, preview.hovered());
        if preview.clicked() {
            intents.push(Intent::Play);
        }

        ui.allocate_new_ui(egui::UiBuilder::new().max_rect(info_rect.shrink(28.0)), |ui| {
            ui.label(egui::RichText::new(&entry.title).size(26.0).strong().color(egui::Color32::WHITE));
            ui.add_space(6.0);
            ui.label(egui::RichText::new(&entry.description).size(15.0).color(TEXT_MUTED));
            ui.add_space(14.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("🕑 {}", entry.duration_label)).small().color(TEXT_MUTED));
                ui.add_space(12.0);
                let watch = egui::Button::new(egui::RichText::new("Watch Tutorial ›").color(ACCENT)).frame(false);
                if ui.add(watch).clicked() {
                    intents.push(Intent::Play);
                }
            });
        });
    }

    fn paint_preview(
        &mut self,
        ui: &egui::Ui,
        ctx: &egui::Context,
        entry: &MediaEntry,
        rect: egui::Rect,
        hovered: bool,
    ) {
        let painter = ui.painter();
        let tint = egui::Color32::from_white_alpha(if hovered { 100 } else { 150 });

        match entry.poster_url.as_deref() {
            Some(url) if cache::is_remote(url) => {
                // Placeholder shows through until the download finishes
                paint_placeholder(painter, rect);
                egui::Image::from_uri(url).tint(tint).paint_at(ui, rect);
            }
            Some(url) => match self.posters.poster(ctx, &entry.id, url) {
                Some(texture) => {
                    painter.image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        tint,
                    );
                }
                None => paint_placeholder(painter, rect),
            },
            None => paint_placeholder(painter, rect),
        }

        let radius = if hovered { 44.0 } else { 40.0 };
        painter.circle(
            rect.center(),
            radius,
            egui::Color32::from_white_alpha(26),
            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(50)),
        );
        painter.text(
            rect.center() + egui::vec2(3.0, 0.0),
            egui::Align2::CENTER_CENTER,
            "▶",
            egui::FontId::proportional(30.0),
            egui::Color32::WHITE,
        );
    }
}

impl Default for LibraryView {
    fn default() -> Self {
        Self::new()
    }
}

fn show_sidebar<L: MediaLoader>(ui: &mut egui::Ui, browser: &LibraryBrowser<L>, intents: &mut Vec<Intent>) {
    let catalog = browser.catalog();
    ui.label(egui::RichText::new(catalog.title()).size(20.0).strong().color(egui::Color32::WHITE));
    if !catalog.description().is_empty() {
        ui.label(egui::RichText::new(catalog.description()).size(13.0).color(TEXT_MUTED));
    }
    ui.add_space(10.0);
    ui.separator();

    let selected_id = browser.selected_entry().map(|e| e.id.as_str());

    egui::ScrollArea::vertical().show(ui, |ui| {
        for entry in catalog.entries() {
            let is_selected = selected_id == Some(entry.id.as_str());
            let title_color = if is_selected { egui::Color32::WHITE } else { TEXT_MUTED };
            let text = egui::RichText::new(format!("▶  {}\n      🕑 {}", entry.title, entry.duration_label))
                .color(title_color);

            let response = ui.add_sized(
                [ui.available_width(), 48.0],
                egui::SelectableLabel::new(is_selected, text),
            );
            if response.clicked() && !is_selected {
                intents.push(Intent::Select(entry.id.clone()));
            }
        }
    });
}

/// Diagonal gradient used when an entry has no usable poster
fn paint_placeholder(painter: &egui::Painter, rect: egui::Rect) {
    let top_left = egui::Color32::from_rgb(39, 39, 42);
    let bottom_right = egui::Color32::from_rgb(24, 24, 27);
    let glow = egui::Color32::from_rgb(52, 48, 78);

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top_left);
    mesh.colored_vertex(rect.right_top(), glow);
    mesh.colored_vertex(rect.right_bottom(), bottom_right);
    mesh.colored_vertex(rect.left_bottom(), bottom_right);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}
