use eframe::egui;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config::{self, Args};
use crate::library::{LibraryBrowser, LibraryView};
use crate::player::{PlaybackController, PlayerAction, PlayerConfig, PlayerView};
use crate::settings::{AppSettings, RecentCatalog};
use crate::video::FfmpegLoader;

const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(130, 138, 150);

/// Range offered for the controls hide delay, in seconds
const HIDE_DELAY_RANGE: std::ops::RangeInclusive<f32> = 1.0..=10.0;

/// Host window: stands in for the landing page and owns both overlays
pub struct LibraryPlayerApp {
    /// Catalog browser with its own player
    library: LibraryBrowser<FfmpegLoader>,
    library_view: LibraryView,
    library_player_view: PlayerView,

    // --- Single-video context ---
    /// Player opened directly by the "Watch intro" trigger
    intro_player: PlaybackController<FfmpegLoader>,
    intro_view: PlayerView,
    intro_url: Option<String>,

    /// File the current catalog came from (`None` for the bundled one)
    catalog_path: Option<PathBuf>,

    /// Last catalog load failure, shown as a banner
    catalog_error: Option<String>,

    /// Behavior shared by both players
    player_config: PlayerConfig,

    /// Persistent app settings (preferences, catalog history)
    app_settings: Option<AppSettings>,
}

impl LibraryPlayerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        let app_settings = match AppSettings::open() {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Running without saved settings: {}", e);
                None
            }
        };

        let player_config = config::player_config(&args, app_settings.as_ref());
        tracing::debug!("Player config: {:?}", player_config);

        let mut catalog_path = None;
        let catalog = match &args.catalog {
            Some(path) => match Catalog::load(path) {
                Ok(catalog) => {
                    catalog_path = Some(path.clone());
                    catalog
                }
                Err(e) => {
                    tracing::error!("Could not load {}: {}; using bundled catalog", path.display(), e);
                    Catalog::sample()
                }
            },
            None => Catalog::sample(),
        };

        let mut app = Self {
            library: LibraryBrowser::new(
                catalog,
                PlaybackController::new(FfmpegLoader, player_config),
            ),
            library_view: LibraryView::new(),
            library_player_view: PlayerView::new("library_player"),
            intro_player: PlaybackController::new(FfmpegLoader, player_config),
            intro_view: PlayerView::new("intro_player"),
            intro_url: args.video,
            catalog_path: None,
            catalog_error: None,
            player_config,
            app_settings,
        };

        if let Some(path) = catalog_path {
            app.remember_catalog(&path);
        }
        app
    }

    // --- Host triggers ---

    /// "Open library"
    fn open_library(&mut self, ctx: &egui::Context) {
        self.intro_view.close(ctx, &mut self.intro_player);
        self.library.open();
    }

    /// "Open single video with URL X"
    fn open_single_video(&mut self, ctx: &egui::Context, url: Option<&str>) {
        self.close_library(ctx);
        self.intro_player.open(url);
    }

    fn close_library(&mut self, ctx: &egui::Context) {
        self.library_player_view.close(ctx, self.library.player_mut());
        self.library.close();
    }

    /// Apply preferences changed in the header menu to both players and save them
    fn update_player_config(&mut self, config: PlayerConfig) {
        self.player_config = config;
        self.library.player_mut().set_config(config);
        self.intro_player.set_config(config);
        if let Some(ref settings) = self.app_settings {
            if let Err(e) = config::save_player_config(settings, &config) {
                tracing::warn!("Could not save player preferences: {}", e);
            }
        }
    }

    // --- Catalog handling ---

    fn pick_catalog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Catalog", &["json"])
            .pick_file()
        else {
            return;
        };
        self.switch_catalog(&path);
    }

    fn switch_catalog(&mut self, path: &Path) {
        match Catalog::load(path) {
            Ok(catalog) => {
                self.library.replace_catalog(catalog);
                self.library_view.clear_posters();
                self.catalog_error = None;
                self.remember_catalog(path);
            }
            Err(e) => {
                tracing::warn!("Could not load {}: {}", path.display(), e);
                self.catalog_error = Some(format!("{}: {}", path.display(), e));
            }
        }
    }

    fn remember_catalog(&mut self, path: &Path) {
        self.catalog_path = Some(path.to_path_buf());
        if let Some(ref settings) = self.app_settings {
            if let Err(e) = settings.record_catalog(path, self.library.catalog().title()) {
                tracing::warn!("Could not update catalog history: {}", e);
            }
        }
    }

    fn recent_catalogs(&self) -> Vec<RecentCatalog> {
        self.app_settings
            .as_ref()
            .and_then(|s| s.recent_catalogs().ok())
            .unwrap_or_default()
    }
}

impl eframe::App for LibraryPlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut open_library = false;
        let mut open_intro = false;
        let mut pick_catalog = false;
        let mut edited_config = self.player_config;

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none()
                .fill(egui::Color32::from_rgb(20, 22, 26))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(35, 40, 48)))
                .inner_margin(egui::Margin::symmetric(16.0, 8.0))
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Tutorial Library").size(16.0).strong());
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(self.library.catalog().title()).color(TEXT_MUTED));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.menu_button("⚙ Player", |ui| {
                            ui.checkbox(&mut edited_config.autoplay, "Autoplay");
                            let mut seconds = edited_config.auto_hide_delay.as_secs_f32();
                            let slider = egui::Slider::new(&mut seconds, HIDE_DELAY_RANGE)
                                .step_by(0.5)
                                .suffix(" s")
                                .text("Hide controls after");
                            if ui.add(slider).changed() {
                                edited_config.auto_hide_delay = std::time::Duration::from_secs_f32(seconds);
                            }
                        });
                        if ui.button("📂 Open catalog…").clicked() {
                            pick_catalog = true;
                        }
                        if ui.button("▶ Watch intro").clicked() {
                            open_intro = true;
                        }
                        if ui.button("📚 Browse tutorials").clicked() {
                            open_library = true;
                        }
                    });
                });
            });

        let mut catalog_to_open: Option<PathBuf> = None;
        let mut catalog_to_forget: Option<i64> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(egui::RichText::new("🎬").size(48.0));
                ui.add_space(12.0);
                ui.label(egui::RichText::new(self.library.catalog().title()).size(26.0).strong());
                ui.add_space(6.0);
                ui.label(egui::RichText::new(self.library.catalog().description()).color(TEXT_MUTED));
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!("{} videos", self.library.catalog().len()))
                        .small()
                        .color(TEXT_MUTED),
                );

                if let Some(error) = &self.catalog_error {
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new(format!("⚠ {}", error)).color(egui::Color32::from_rgb(240, 80, 80)));
                }

                let recent = self.recent_catalogs();
                if !recent.is_empty() {
                    ui.add_space(36.0);
                    ui.label(egui::RichText::new("Recent catalogs").size(16.0).color(TEXT_MUTED));
                    ui.add_space(8.0);
                    for entry in &recent {
                        ui.horizontal(|ui| {
                            let is_current = self.catalog_path.as_deref() == Some(entry.path.as_path());
                            let label = format!("{}  ·  {}", entry.title, entry.path.display());
                            let response = ui
                                .selectable_label(is_current, label)
                                .on_hover_text(format!("Last opened {}", entry.last_opened));
                            if response.clicked() && !is_current {
                                catalog_to_open = Some(entry.path.clone());
                            }
                            if ui.small_button("✕").on_hover_text("Forget").clicked() {
                                catalog_to_forget = Some(entry.id);
                            }
                        });
                    }
                }
            });
        });

        if edited_config != self.player_config {
            self.update_player_config(edited_config);
        }
        if open_library {
            self.open_library(ctx);
        }
        if open_intro {
            let url = self.intro_url.clone();
            self.open_single_video(ctx, url.as_deref());
        }
        if pick_catalog {
            self.pick_catalog();
        }
        if let Some(path) = catalog_to_open {
            self.switch_catalog(&path);
        }
        if let (Some(id), Some(settings)) = (catalog_to_forget, &self.app_settings) {
            if let Err(e) = settings.remove_catalog(id) {
                tracing::warn!("Could not forget catalog: {}", e);
            }
        }

        // Overlays, above all page content
        self.library_view.show(ctx, &mut self.library);

        // Closing the library's player returns to the still-open library
        if let Some(PlayerAction::Close) = self.library_player_view.show(ctx, self.library.player_mut()) {
            self.library_player_view.close(ctx, self.library.player_mut());
        }

        // Closing the single-video player closes everything
        if let Some(PlayerAction::Close) = self.intro_view.show(ctx, &mut self.intro_player) {
            self.intro_view.close(ctx, &mut self.intro_player);
        }
    }
}
