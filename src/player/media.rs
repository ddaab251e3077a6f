// Media element abstraction - the controller drives one of these per open player
use anyhow::Result;
use thiserror::Error;

/// Decoded RGBA frame ready for upload as a texture
#[derive(Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub _timestamp: f64,
}

/// Events delivered by a media element, in the order they occurred
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration became known
    MetadataLoaded { duration: f64 },
    /// Playback position advanced
    TimeUpdate { current_time: f64 },
    /// A seek request has been applied; one per `seek` call, in order
    Seeked,
    /// Element started advancing
    Play,
    /// Element stopped advancing
    Pause,
    /// Reached end of media
    Ended,
    /// Element could not decode its source
    Error(String),
}

/// A single bound media source
///
/// Commands are fire-and-forget; the element reports what actually happened
/// through [`MediaElement::poll_event`].
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    /// Reposition to an absolute time in seconds
    fn seek(&mut self, time: f64);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    /// Next pending event, if any (non-blocking)
    fn poll_event(&mut self) -> Option<MediaEvent>;
    /// Next decoded frame, if any (non-blocking)
    fn poll_frame(&mut self) -> Option<VideoFrame> {
        None
    }
}

/// Creates media elements from source URLs
pub trait MediaLoader {
    type Element: MediaElement;

    fn load(&mut self, source_url: &str) -> Result<Self::Element>;
}

/// Fullscreen request rejected by the environment
#[derive(Debug, Error)]
#[error("fullscreen request rejected: {0}")]
pub struct FullscreenError(pub String);

/// The container the player lives in, as far as fullscreen is concerned
pub trait FullscreenHost {
    /// Actual current fullscreen state
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError>;
}
