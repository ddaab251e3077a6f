// Playback controller - state machine over a single bound media element
use std::time::{Duration, Instant};

use super::auto_hide::{HideTimer, DEFAULT_HIDE_DELAY};
use super::media::{FullscreenHost, MediaElement, MediaEvent, MediaLoader, VideoFrame};

/// Player behavior knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    /// Idle time before controls hide during playback
    pub auto_hide_delay: Duration,
    /// Start playing as soon as a source is bound
    pub autoplay: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            auto_hide_delay: DEFAULT_HIDE_DELAY,
            autoplay: false,
        }
    }
}

/// Drives one media element and the synthetic controls layered over it.
///
/// Play state, progress and duration are projections of the element: they
/// change through the `on_*` hooks (fed by [`Self::pump_events`]) or through
/// the user-facing commands, never by direct field writes from the UI.
/// Volume and mute are session preferences and survive re-opening.
pub struct PlaybackController<L: MediaLoader> {
    loader: L,
    config: PlayerConfig,
    media: Option<L::Element>,
    source_url: Option<String>,

    is_open: bool,
    is_playing: bool,
    progress_percent: f64,
    duration_seconds: f64,
    metadata_loaded: bool,
    /// Seeks sent to the element and not yet acknowledged
    pending_seeks: u32,
    volume: f32,
    is_muted: bool,
    is_fullscreen: bool,
    show_controls: bool,

    hide_timer: HideTimer,
}

impl<L: MediaLoader> PlaybackController<L> {
    pub fn new(loader: L, config: PlayerConfig) -> Self {
        Self {
            loader,
            config,
            media: None,
            source_url: None,
            is_open: false,
            is_playing: false,
            progress_percent: 0.0,
            duration_seconds: 0.0,
            metadata_loaded: false,
            pending_seeks: 0,
            volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
            show_controls: true,
            hide_timer: HideTimer::new(config.auto_hide_delay),
        }
    }

    /// Open the player on a source. `None` opens the "unavailable" state.
    pub fn open(&mut self, source_url: Option<&str>) {
        if self.is_open {
            self.close();
        }

        self.is_open = true;
        self.reset_playback();
        self.show_controls = true;
        self.hide_timer.cancel();
        self.source_url = source_url.map(str::to_string);

        let Some(url) = source_url else {
            tracing::info!("Opened player without a source");
            return;
        };

        match self.loader.load(url) {
            Ok(mut media) => {
                media.set_volume(self.volume);
                media.set_muted(self.is_muted);
                self.media = Some(media);
                tracing::info!("Opened player on {}", url);
                if self.config.autoplay {
                    self.play();
                }
            }
            Err(e) => {
                tracing::warn!("Source {} is unavailable: {:#}", url, e);
            }
        }
    }

    /// Tear down the bound element and cancel the hide timer. Safe to repeat.
    ///
    /// Fullscreen belongs to the window, not the element, so it is left as
    /// last observed; the owner leaves fullscreen explicitly.
    pub fn close(&mut self) {
        self.hide_timer.cancel();
        if self.media.take().is_some() {
            tracing::info!("Closed player");
        }
        self.source_url = None;
        self.is_open = false;
        self.reset_playback();
    }

    /// Replace the behavior knobs. A countdown already running keeps its deadline.
    pub fn set_config(&mut self, config: PlayerConfig) {
        self.config = config;
        self.hide_timer.set_delay(config.auto_hide_delay);
    }

    fn reset_playback(&mut self) {
        self.is_playing = false;
        self.progress_percent = 0.0;
        self.duration_seconds = 0.0;
        self.metadata_loaded = false;
        self.pending_seeks = 0;
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn play(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        media.play();
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        media.pause();
        self.is_playing = false;
        self.reveal_controls();
    }

    /// Jump to a percentage of the duration. Progress updates immediately and
    /// position reports are ignored until the element acknowledges the seek.
    pub fn seek(&mut self, percent: f64) {
        if percent.is_nan() {
            return;
        }
        let Some(media) = self.media.as_mut() else {
            return;
        };
        let percent = percent.clamp(0.0, 100.0);
        let target = percent / 100.0 * self.duration_seconds;
        media.seek(target);
        self.pending_seeks += 1;
        self.progress_percent = if self.duration_seconds > 0.0 { percent } else { 0.0 };
        tracing::debug!("Seek to {:.1}% ({:.2}s)", percent, target);
    }

    /// Set volume in [0, 1]. Zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        self.volume = level;
        self.is_muted = level == 0.0;
        if let Some(media) = self.media.as_mut() {
            media.set_volume(level);
            media.set_muted(self.is_muted);
        }
    }

    /// Flip mute, keeping the stored volume so unmuting restores it
    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
        if let Some(media) = self.media.as_mut() {
            media.set_muted(self.is_muted);
        }
    }

    /// Ask the container to enter or leave fullscreen, then adopt whatever
    /// state the host actually ended up in.
    pub fn toggle_fullscreen(&mut self, host: &mut impl FullscreenHost) {
        if !self.is_open {
            return;
        }
        let wanted = !host.is_fullscreen();
        if let Err(e) = host.set_fullscreen(wanted) {
            tracing::warn!("{}", e);
        }
        self.is_fullscreen = host.is_fullscreen();
    }

    /// Adopt the host's fullscreen state if it changed behind our back
    pub fn sync_fullscreen(&mut self, host: &impl FullscreenHost) {
        let actual = host.is_fullscreen();
        if actual != self.is_fullscreen {
            self.on_fullscreen_change(actual);
        }
    }

    // --- Element event hooks ---

    /// Drain and dispatch the element's pending events in delivery order
    pub fn pump_events(&mut self) {
        while let Some(event) = self.media.as_mut().and_then(|m| m.poll_event()) {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded { duration } => self.on_metadata_loaded(duration),
            MediaEvent::TimeUpdate { current_time } => self.on_time_update(current_time),
            MediaEvent::Seeked => self.on_seeked(),
            MediaEvent::Play => self.on_play(),
            MediaEvent::Pause => self.on_pause(),
            MediaEvent::Ended => self.on_playback_ended(),
            MediaEvent::Error(message) => self.on_media_error(&message),
        }
    }

    pub fn on_metadata_loaded(&mut self, duration_seconds: f64) {
        if self.media.is_none() || self.metadata_loaded {
            return;
        }
        if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
            return;
        }
        self.duration_seconds = duration_seconds;
        self.metadata_loaded = true;
        tracing::debug!("Metadata loaded: {:.2}s", duration_seconds);
    }

    /// Position report. Dropped while a seek is in flight, since the element
    /// may have queued it before it moved.
    pub fn on_time_update(&mut self, current_time: f64) {
        if self.media.is_none() || self.pending_seeks > 0 {
            return;
        }
        self.progress_percent = if self.duration_seconds > 0.0 && current_time.is_finite() {
            (current_time / self.duration_seconds * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    pub fn on_seeked(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.pending_seeks = self.pending_seeks.saturating_sub(1);
    }

    pub fn on_play(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.is_playing = true;
    }

    pub fn on_pause(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.is_playing = false;
        self.reveal_controls();
    }

    /// Stop at end of media. Progress is left where the element reported it.
    pub fn on_playback_ended(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.is_playing = false;
        self.reveal_controls();
        tracing::debug!("Playback ended");
    }

    /// The element gave up on its source; fall back to the unavailable state
    pub fn on_media_error(&mut self, message: &str) {
        if self.media.take().is_none() {
            return;
        }
        tracing::warn!("Media error: {}", message);
        self.reset_playback();
        self.show_controls = true;
        self.hide_timer.cancel();
    }

    /// Reconcile with the environment after a fullscreen change
    pub fn on_fullscreen_change(&mut self, fullscreen: bool) {
        if !self.is_open {
            return;
        }
        self.is_fullscreen = fullscreen;
    }

    // --- Control surface ---

    /// Pointer moved over the player: show controls and restart the countdown
    pub fn on_pointer_move(&mut self, now: Instant) {
        if !self.is_open {
            return;
        }
        self.show_controls = true;
        self.hide_timer.arm(now);
    }

    /// Advance the hide timer to `now`
    pub fn tick(&mut self, now: Instant) {
        if !self.is_open {
            return;
        }
        if self.hide_timer.fire_if_due(now) && self.is_playing {
            self.show_controls = false;
        }
    }

    /// How long until the hide timer needs another `tick`
    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        self.hide_timer.remaining(now)
    }

    fn reveal_controls(&mut self) {
        self.show_controls = true;
        self.hide_timer.cancel();
    }

    /// Most recent decoded frame, skipping any stale ones
    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        let media = self.media.as_mut()?;
        let mut latest = None;
        while let Some(frame) = media.poll_frame() {
            latest = Some(frame);
        }
        latest
    }

    // --- Accessors ---

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Open with nothing playable bound
    pub fn is_unavailable(&self) -> bool {
        self.is_open && self.media.is_none()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn current_time(&self) -> f64 {
        self.progress_percent / 100.0 * self.duration_seconds
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// What the listener actually hears
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn show_controls(&self) -> bool {
        self.show_controls
    }

    #[cfg(test)]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}

impl<L: MediaLoader> Drop for PlaybackController<L> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::{Command, FakeLoader, FakeScreen};

    const DELAY: Duration = Duration::from_millis(2500);

    fn controller() -> (PlaybackController<FakeLoader>, FakeLoader) {
        let loader = FakeLoader::new();
        let config = PlayerConfig {
            auto_hide_delay: DELAY,
            autoplay: false,
        };
        (PlaybackController::new(loader.clone(), config), loader)
    }

    fn opened_with_duration(duration: f64) -> (PlaybackController<FakeLoader>, FakeLoader) {
        let (mut player, loader) = controller();
        player.open(Some("clip.mp4"));
        player.on_metadata_loaded(duration);
        loader.clear_commands();
        (player, loader)
    }

    #[test]
    fn open_binds_source_without_autoplay() {
        let (mut player, loader) = controller();
        player.open(Some("clip.mp4"));

        assert!(player.is_open());
        assert!(!player.is_playing());
        assert!(player.show_controls());
        assert_eq!(player.progress_percent(), 0.0);
        assert_eq!(player.source_url(), Some("clip.mp4"));
        assert_eq!(loader.loaded(), vec!["clip.mp4".to_string()]);
        assert!(!loader.commands().contains(&Command::Play));
    }

    #[test]
    fn autoplay_starts_playback_on_open() {
        let loader = FakeLoader::new();
        let config = PlayerConfig {
            autoplay: true,
            ..PlayerConfig::default()
        };
        let mut player = PlaybackController::new(loader.clone(), config);
        player.open(Some("clip.mp4"));

        assert!(player.is_playing());
        assert_eq!(loader.commands().last(), Some(&Command::Play));
    }

    #[test]
    fn toggle_play_issues_commands() {
        let (mut player, loader) = opened_with_duration(60.0);

        player.toggle_play();
        assert!(player.is_playing());
        player.toggle_play();
        assert!(!player.is_playing());
        assert_eq!(loader.commands(), vec![Command::Play, Command::Pause]);
    }

    #[test]
    fn toggle_play_without_source_is_noop() {
        let (mut player, loader) = controller();
        player.toggle_play();
        assert!(!player.is_playing());

        player.open(None);
        player.toggle_play();
        assert!(!player.is_playing());
        assert!(loader.commands().is_empty());
    }

    #[test]
    fn seek_clamps_and_updates_progress_immediately() {
        let (mut player, loader) = opened_with_duration(200.0);

        for percent in [-50.0, -0.1, 0.0, 25.0, 99.9, 100.0, 150.0] {
            loader.clear_commands();
            player.seek(percent);
            let clamped = f64::clamp(percent, 0.0, 100.0);
            assert_eq!(player.progress_percent(), clamped);
            match loader.commands().as_slice() {
                [Command::Seek(target)] => {
                    assert!((0.0..=200.0).contains(target));
                    assert!((target - clamped * 2.0).abs() < 1e-9);
                }
                other => panic!("unexpected commands {other:?}"),
            }
        }
    }

    #[test]
    fn seek_before_metadata_keeps_progress_at_zero() {
        let (mut player, loader) = controller();
        player.open(Some("clip.mp4"));
        loader.clear_commands();

        player.seek(50.0);
        assert_eq!(player.progress_percent(), 0.0);
        assert_eq!(loader.commands(), vec![Command::Seek(0.0)]);
    }

    #[test]
    fn set_volume_clamps_and_drives_mute() {
        let (mut player, _loader) = opened_with_duration(10.0);

        player.set_volume(2.0);
        assert_eq!(player.volume(), 1.0);
        assert!(!player.is_muted());

        player.set_volume(-1.0);
        assert_eq!(player.volume(), 0.0);
        assert!(player.is_muted());

        player.set_volume(0.0);
        assert!(player.is_muted());

        player.set_volume(0.5);
        assert_eq!(player.volume(), 0.5);
        assert!(!player.is_muted());
    }

    #[test]
    fn nonzero_volume_unmutes_after_toggle() {
        let (mut player, _loader) = opened_with_duration(10.0);
        player.toggle_mute();
        assert!(player.is_muted());
        player.set_volume(0.5);
        assert!(!player.is_muted());
    }

    #[test]
    fn toggle_mute_preserves_volume() {
        let (mut player, loader) = opened_with_duration(10.0);
        player.set_volume(0.3);
        loader.clear_commands();

        player.toggle_mute();
        assert!(player.is_muted());
        assert_eq!(player.volume(), 0.3);
        assert_eq!(player.effective_volume(), 0.0);

        player.toggle_mute();
        assert!(!player.is_muted());
        assert_eq!(player.effective_volume(), 0.3);
        assert_eq!(loader.commands(), vec![Command::Muted(true), Command::Muted(false)]);
    }

    #[test]
    fn volume_and_mute_survive_reopen() {
        let (mut player, loader) = opened_with_duration(10.0);
        player.set_volume(0.4);
        player.toggle_mute();
        player.close();

        loader.clear_commands();
        player.open(Some("other.mp4"));
        assert_eq!(player.volume(), 0.4);
        assert!(player.is_muted());
        assert_eq!(
            loader.commands(),
            vec![Command::Volume(0.4), Command::Muted(true)]
        );
    }

    #[test]
    fn close_is_idempotent() {
        let (mut player, loader) = opened_with_duration(100.0);
        player.toggle_play();
        player.on_time_update(40.0);

        player.close();
        let once = (player.is_open(), player.is_playing(), player.progress_percent());
        player.close();
        let twice = (player.is_open(), player.is_playing(), player.progress_percent());

        assert_eq!(once, (false, false, 0.0));
        assert_eq!(once, twice);
        assert_eq!(loader.live_elements(), 0);
    }

    #[test]
    fn reopen_starts_clean() {
        let (mut player, _loader) = opened_with_duration(100.0);
        player.toggle_play();
        player.on_time_update(50.0);
        player.close();

        player.open(Some("clip.mp4"));
        assert!(!player.is_playing());
        assert_eq!(player.progress_percent(), 0.0);
        assert_eq!(player.duration_seconds(), 0.0);
    }

    #[test]
    fn opening_again_replaces_the_element() {
        let (mut player, loader) = opened_with_duration(100.0);
        player.open(Some("second.mp4"));
        assert_eq!(loader.live_elements(), 1);
        assert_eq!(player.source_url(), Some("second.mp4"));
    }

    #[test]
    fn time_update_guards_zero_duration() {
        let (mut player, _loader) = controller();
        player.open(Some("clip.mp4"));
        player.on_time_update(12.0);
        assert_eq!(player.progress_percent(), 0.0);

        player.on_metadata_loaded(48.0);
        player.on_time_update(12.0);
        assert_eq!(player.progress_percent(), 25.0);
    }

    #[test]
    fn metadata_applies_once_per_source() {
        let (mut player, _loader) = opened_with_duration(30.0);
        player.on_metadata_loaded(90.0);
        assert_eq!(player.duration_seconds(), 30.0);
    }

    #[test]
    fn end_of_media_keeps_progress_until_close() {
        let (mut player, loader) = opened_with_duration(80.0);
        player.toggle_play();
        loader.emit(MediaEvent::TimeUpdate { current_time: 80.0 });
        loader.emit(MediaEvent::Ended);
        player.pump_events();

        assert!(!player.is_playing());
        assert_eq!(player.progress_percent(), 100.0);
        assert!(player.is_open());

        player.close();
        assert_eq!(player.progress_percent(), 0.0);
    }

    #[test]
    fn events_dispatch_in_delivery_order() {
        let (mut player, loader) = opened_with_duration(100.0);
        loader.emit(MediaEvent::Play);
        loader.emit(MediaEvent::TimeUpdate { current_time: 10.0 });
        loader.emit(MediaEvent::TimeUpdate { current_time: 20.0 });
        loader.emit(MediaEvent::Pause);
        player.pump_events();

        assert!(!player.is_playing());
        assert_eq!(player.progress_percent(), 20.0);
    }

    #[test]
    fn hooks_are_inert_after_close() {
        let (mut player, _loader) = opened_with_duration(100.0);
        player.close();

        player.on_metadata_loaded(50.0);
        player.on_time_update(25.0);
        player.on_play();
        player.on_fullscreen_change(true);
        player.on_pointer_move(Instant::now());

        assert!(!player.is_playing());
        assert_eq!(player.duration_seconds(), 0.0);
        assert_eq!(player.progress_percent(), 0.0);
        assert!(!player.is_fullscreen());
        assert_eq!(player.next_wake(Instant::now()), None);
    }

    #[test]
    fn missing_source_is_unavailable() {
        let (mut player, loader) = controller();
        player.open(None);
        assert!(player.is_open());
        assert!(player.is_unavailable());
        assert!(loader.loaded().is_empty());
    }

    #[test]
    fn undecodable_source_is_unavailable() {
        let loader = FakeLoader::new().rejecting("broken.mp4");
        let mut player = PlaybackController::new(loader, PlayerConfig::default());
        player.open(Some("broken.mp4"));
        assert!(player.is_open());
        assert!(player.is_unavailable());
        assert_eq!(player.source_url(), Some("broken.mp4"));
    }

    #[test]
    fn decode_error_degrades_to_unavailable() {
        let (mut player, loader) = opened_with_duration(100.0);
        player.toggle_play();
        loader.emit(MediaEvent::Error("corrupt stream".into()));
        player.pump_events();

        assert!(player.is_unavailable());
        assert!(!player.is_playing());
        assert_eq!(loader.live_elements(), 0);
    }

    #[test]
    fn fullscreen_follows_host_state() {
        let (mut player, _loader) = opened_with_duration(10.0);
        let mut screen = FakeScreen::default();

        player.toggle_fullscreen(&mut screen);
        assert!(player.is_fullscreen());
        assert!(screen.fullscreen);

        player.toggle_fullscreen(&mut screen);
        assert!(!player.is_fullscreen());
    }

    #[test]
    fn rejected_fullscreen_matches_reality() {
        let (mut player, _loader) = opened_with_duration(10.0);
        let mut screen = FakeScreen {
            fullscreen: false,
            deny: true,
        };

        player.toggle_fullscreen(&mut screen);
        assert!(!player.is_fullscreen());

        // user left fullscreen through the window manager
        player.on_fullscreen_change(true);
        player.on_fullscreen_change(false);
        assert!(!player.is_fullscreen());
    }

    #[test]
    fn controls_hide_after_idle_playback() {
        let (mut player, _loader) = opened_with_duration(100.0);
        let start = Instant::now();
        player.toggle_play();
        player.on_pointer_move(start);

        player.tick(start + DELAY - Duration::from_millis(1));
        assert!(player.show_controls());

        player.tick(start + DELAY);
        assert!(!player.show_controls());
    }

    #[test]
    fn pointer_movement_debounces_hide() {
        let (mut player, _loader) = opened_with_duration(100.0);
        let start = Instant::now();
        let half = DELAY / 2;
        player.toggle_play();

        player.on_pointer_move(start);
        player.tick(start + half);
        player.on_pointer_move(start + half);
        player.tick(start + half * 2);
        assert!(player.show_controls());

        player.tick(start + half + DELAY);
        assert!(!player.show_controls());
    }

    #[test]
    fn hide_fires_once_per_idle_period() {
        let (mut player, _loader) = opened_with_duration(100.0);
        let start = Instant::now();
        player.toggle_play();
        player.on_pointer_move(start);
        player.tick(start + DELAY);
        assert!(!player.show_controls());

        // a later reveal without pointer movement must not be hidden by a stale timer
        player.toggle_play();
        player.toggle_play();
        assert!(player.show_controls());
        player.tick(start + DELAY * 3);
        assert!(player.show_controls());
    }

    #[test]
    fn paused_player_never_auto_hides() {
        let (mut player, _loader) = opened_with_duration(100.0);
        let start = Instant::now();
        player.on_pointer_move(start);

        player.tick(start + DELAY * 4);
        assert!(player.show_controls());
        assert_eq!(player.next_wake(start + DELAY * 4), None);
    }

    #[test]
    fn open_forces_controls_visible() {
        let (mut player, _loader) = opened_with_duration(100.0);
        let start = Instant::now();
        player.toggle_play();
        player.on_pointer_move(start);
        player.tick(start + DELAY);
        assert!(!player.show_controls());

        player.open(Some("next.mp4"));
        assert!(player.show_controls());
        assert_eq!(player.next_wake(start), None);
    }

    #[test]
    fn close_cancels_pending_timer() {
        let (mut player, _loader) = opened_with_duration(100.0);
        let start = Instant::now();
        player.toggle_play();
        player.on_pointer_move(start);
        player.close();
        assert_eq!(player.next_wake(start), None);

        player.open(Some("clip.mp4"));
        player.toggle_play();
        player.tick(start + DELAY * 2);
        assert!(player.show_controls());
    }

    #[test]
    fn reopen_keeps_window_fullscreen_state() {
        let (mut player, _loader) = opened_with_duration(10.0);
        let mut screen = FakeScreen::default();
        player.toggle_fullscreen(&mut screen);

        player.open(Some("next.mp4"));
        assert!(screen.fullscreen);
        assert!(player.is_fullscreen());

        player.close();
        player.open(Some("third.mp4"));
        player.sync_fullscreen(&screen);
        assert!(player.is_fullscreen());
    }

    #[test]
    fn sync_adopts_changes_made_elsewhere() {
        let (mut player, _loader) = opened_with_duration(10.0);
        let mut screen = FakeScreen::default();
        player.toggle_fullscreen(&mut screen);

        // window manager left fullscreen while the player was closed
        player.close();
        screen.fullscreen = false;
        player.open(Some("clip.mp4"));
        player.sync_fullscreen(&screen);
        assert!(!player.is_fullscreen());

        screen.fullscreen = true;
        player.sync_fullscreen(&screen);
        assert!(player.is_fullscreen());
    }

    #[test]
    fn queued_time_update_does_not_undo_seek() {
        let (mut player, loader) = opened_with_duration(100.0);
        loader.emit(MediaEvent::TimeUpdate { current_time: 10.0 });

        player.seek(80.0);
        player.pump_events();
        assert_eq!(player.progress_percent(), 80.0);

        loader.emit(MediaEvent::Seeked);
        loader.emit(MediaEvent::TimeUpdate { current_time: 81.0 });
        player.pump_events();
        assert_eq!(player.progress_percent(), 81.0);
    }

    #[test]
    fn each_seek_waits_for_its_own_ack() {
        let (mut player, loader) = opened_with_duration(100.0);
        player.seek(30.0);
        player.seek(60.0);

        loader.emit(MediaEvent::Seeked);
        loader.emit(MediaEvent::TimeUpdate { current_time: 30.0 });
        player.pump_events();
        assert_eq!(player.progress_percent(), 60.0);

        loader.emit(MediaEvent::Seeked);
        loader.emit(MediaEvent::TimeUpdate { current_time: 61.0 });
        player.pump_events();
        assert_eq!(player.progress_percent(), 61.0);
    }

    #[test]
    fn reopen_clears_unacknowledged_seeks() {
        let (mut player, _loader) = opened_with_duration(100.0);
        player.seek(50.0);
        player.open(Some("clip.mp4"));
        player.on_metadata_loaded(40.0);

        player.on_time_update(10.0);
        assert_eq!(player.progress_percent(), 25.0);
    }

    #[test]
    fn new_config_drives_later_open_and_hide() {
        let (mut player, loader) = controller();
        player.set_config(PlayerConfig {
            auto_hide_delay: Duration::from_millis(500),
            autoplay: true,
        });

        player.open(Some("clip.mp4"));
        assert!(player.is_playing());
        assert_eq!(loader.commands().last(), Some(&Command::Play));

        let start = Instant::now();
        player.on_pointer_move(start);
        player.tick(start + Duration::from_millis(500));
        assert!(!player.show_controls());
    }
}
