// Video backend module
// Contains: ffmpeg-backed media element used by the playback controller

mod player;

pub use player::FfmpegLoader;
