// Player overlay - video surface plus the synthetic, auto-hiding controls
use std::time::Instant;

use eframe::egui;

use super::controller::PlaybackController;
use super::format::format_time;
use super::media::{FullscreenError, FullscreenHost, MediaLoader};

const BACKDROP: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 150);
const SURFACE: egui::Color32 = egui::Color32::from_rgb(12, 13, 16);
const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(130, 138, 150);
const MAX_PLAYER_WIDTH: f32 = 960.0;

/// What the overlay asks its owner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Close,
}

/// The window viewport acts as the player's fullscreen container
struct ViewportScreen<'a> {
    ctx: &'a egui::Context,
}

impl FullscreenHost for ViewportScreen<'_> {
    fn is_fullscreen(&self) -> bool {
        self.ctx.input(|i| i.viewport().fullscreen.unwrap_or(false))
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError> {
        if self.ctx.input(|i| i.viewport().fullscreen.is_none()) {
            return Err(FullscreenError("viewport does not support fullscreen".into()));
        }
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        Ok(())
    }
}

/// Rendering state for one player overlay
pub struct PlayerView {
    id: egui::Id,
    frame_texture: Option<egui::TextureHandle>,
}

impl PlayerView {
    pub fn new(id_source: &str) -> Self {
        Self {
            id: egui::Id::new(id_source),
            frame_texture: None,
        }
    }

    /// Drive the controller for this frame and draw it if open
    pub fn show<L: MediaLoader>(
        &mut self,
        ctx: &egui::Context,
        player: &mut PlaybackController<L>,
    ) -> Option<PlayerAction> {
        if !player.is_open() {
            self.frame_texture = None;
            return None;
        }

        let now = Instant::now();
        player.pump_events();
        player.sync_fullscreen(&ViewportScreen { ctx });
        player.tick(now);
        self.update_frame(ctx, player);

        let mut action = None;
        let screen = ctx.screen_rect();

        egui::Area::new(self.id)
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                if !player.is_fullscreen() {
                    ui.painter().rect_filled(screen, 0.0, BACKDROP);
                }
                if backdrop.clicked() {
                    action = Some(PlayerAction::Close);
                }

                let player_rect = player_rect(screen, player.is_fullscreen());
                let surface = ui.allocate_rect(player_rect, egui::Sense::click());
                let rounding = if player.is_fullscreen() { 0.0 } else { 16.0 };
                ui.painter().rect_filled(player_rect, rounding, SURFACE);

                if ui.rect_contains_pointer(player_rect)
                    && ctx.input(|i| i.pointer.delta() != egui::Vec2::ZERO)
                {
                    player.on_pointer_move(now);
                }

                if player.is_unavailable() {
                    paint_unavailable(ui.painter(), player_rect);
                } else {
                    self.paint_video(ui.painter(), player_rect);
                    if surface.clicked() {
                        player.toggle_play();
                    }
                    if player.show_controls() {
                        show_controls(ui, ctx, player, player_rect);
                    } else if ui.rect_contains_pointer(player_rect) {
                        ctx.set_cursor_icon(egui::CursorIcon::None);
                    }
                }

                let close_rect = egui::Rect::from_min_size(
                    player_rect.right_top() + egui::vec2(-48.0, 12.0),
                    egui::vec2(36.0, 36.0),
                );
                if player.show_controls() || player.is_unavailable() {
                    if ui.put(close_rect, egui::Button::new("✕")).clicked() {
                        action = Some(PlayerAction::Close);
                    }
                }
            });

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                action = Some(PlayerAction::Close);
            }
        });
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            player.toggle_play();
            player.on_pointer_move(now);
        }

        if player.is_playing() {
            ctx.request_repaint();
        } else if let Some(wait) = player.next_wake(now) {
            ctx.request_repaint_after(wait);
        }

        action
    }

    /// Leave fullscreen (if the player took it) and release the frame texture
    pub fn close<L: MediaLoader>(&mut self, ctx: &egui::Context, player: &mut PlaybackController<L>) {
        if player.is_fullscreen() {
            let mut screen = ViewportScreen { ctx };
            if let Err(e) = screen.set_fullscreen(false) {
                tracing::warn!("{}", e);
            }
        }
        player.close();
        self.frame_texture = None;
    }

    fn update_frame<L: MediaLoader>(&mut self, ctx: &egui::Context, player: &mut PlaybackController<L>) {
        let Some(frame) = player.take_frame() else {
            return;
        };
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.frame_texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.frame_texture = Some(ctx.load_texture(
                    "player_frame",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
    }

    fn paint_video(&self, painter: &egui::Painter, rect: egui::Rect) {
        match &self.frame_texture {
            Some(texture) => {
                let fitted = fit_aspect(rect, texture.aspect_ratio());
                painter.image(
                    texture.id(),
                    fitted,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Loading...",
                    egui::FontId::proportional(14.0),
                    TEXT_MUTED,
                );
            }
        }
    }
}

/// Transport bar along the bottom edge of the player
fn show_controls<L: MediaLoader>(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    player: &mut PlaybackController<L>,
    player_rect: egui::Rect,
) {
    let bar_rect = egui::Rect::from_min_max(
        egui::pos2(player_rect.left() + 16.0, player_rect.bottom() - 52.0),
        egui::pos2(player_rect.right() - 16.0, player_rect.bottom() - 12.0),
    );
    ui.painter().rect_filled(
        bar_rect.expand(4.0),
        10.0,
        egui::Color32::from_rgba_unmultiplied(0, 0, 0, 170),
    );

    ui.allocate_new_ui(egui::UiBuilder::new().max_rect(bar_rect), |ui| {
        ui.horizontal_centered(|ui| {
            let play_text = if player.is_playing() { "⏸" } else { "▶" };
            if ui.button(play_text).clicked() {
                player.toggle_play();
            }

            let time_text = format!(
                "{} / {}",
                format_time(player.current_time()),
                format_time(player.duration_seconds())
            );

            let trailing_width = 260.0;
            let mut progress = player.progress_percent();
            let seek = egui::Slider::new(&mut progress, 0.0..=100.0)
                .show_value(false)
                .trailing_fill(true);
            let seek_width = (ui.available_width() - trailing_width).max(60.0);
            if ui.add_sized([seek_width, 20.0], seek).changed() {
                player.seek(progress);
            }

            ui.label(egui::RichText::new(time_text).color(TEXT_MUTED).monospace());

            let mute_text = if player.is_muted() || player.volume() == 0.0 { "🔇" } else { "🔊" };
            if ui.button(mute_text).clicked() {
                player.toggle_mute();
            }

            let mut volume = player.effective_volume();
            let volume_slider = egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false);
            if ui.add_sized([70.0, 20.0], volume_slider).changed() {
                player.set_volume(volume);
            }

            let fullscreen_text = if player.is_fullscreen() { "🗗" } else { "⛶" };
            if ui.button(fullscreen_text).clicked() {
                player.toggle_fullscreen(&mut ViewportScreen { ctx });
            }
        });
    });
}

fn paint_unavailable(painter: &egui::Painter, rect: egui::Rect) {
    let center = rect.center() - egui::vec2(0.0, 16.0);
    painter.circle_filled(center, 40.0, egui::Color32::from_rgb(40, 44, 52));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        "▶",
        egui::FontId::proportional(32.0),
        TEXT_MUTED,
    );
    painter.text(
        center + egui::vec2(0.0, 64.0),
        egui::Align2::CENTER_CENTER,
        "Video Coming Soon",
        egui::FontId::proportional(16.0),
        TEXT_MUTED,
    );
}

/// Centered 16:9 box, or the whole screen in fullscreen
fn player_rect(screen: egui::Rect, fullscreen: bool) -> egui::Rect {
    if fullscreen {
        return screen;
    }
    let width = (screen.width() - 48.0).clamp(200.0, MAX_PLAYER_WIDTH);
    let height = (width * 9.0 / 16.0).min(screen.height() - 48.0);
    egui::Rect::from_center_size(screen.center(), egui::vec2(width, height))
}

/// Largest rect with the given aspect ratio that fits inside `rect`
fn fit_aspect(rect: egui::Rect, aspect: f32) -> egui::Rect {
    if aspect <= 0.0 || !aspect.is_finite() {
        return rect;
    }
    let mut size = egui::vec2(rect.width(), rect.width() / aspect);
    if size.y > rect.height() {
        size = egui::vec2(rect.height() * aspect, rect.height());
    }
    egui::Rect::from_center_size(rect.center(), size)
}
