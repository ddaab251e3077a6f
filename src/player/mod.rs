// Playback module
// Contains: controller state machine, auto-hide timer, media element seam, overlay view

mod auto_hide;
mod controller;
mod format;
mod media;
#[cfg(test)]
pub(crate) mod testing;
mod view;

pub use controller::{PlaybackController, PlayerConfig};
pub use media::{MediaElement, MediaEvent, MediaLoader, VideoFrame};
pub use view::{PlayerAction, PlayerView};
