// Media element backed by ffmpeg-next, decoding on a background thread
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::player::{MediaElement, MediaEvent, MediaLoader, VideoFrame};

extern crate ffmpeg_next as ffmpeg;

/// Widest frame handed to the UI
const MAX_DISPLAY_WIDTH: u32 = 1280;

/// Frames buffered between the decoder and the UI
const FRAME_QUEUE: usize = 4;

/// Command sent to the decoder thread
enum PlayerCommand {
    Play,
    Pause,
    Seek(f64),
    Stop,
}

/// Opens sources through ffmpeg
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegLoader;

impl MediaLoader for FfmpegLoader {
    type Element = FfmpegMedia;

    fn load(&mut self, source_url: &str) -> Result<FfmpegMedia> {
        FfmpegMedia::open(source_url)
    }
}

/// One bound source with its own decoder thread.
///
/// Dropping the element stops and joins the thread, after which no further
/// events or frames are produced.
pub struct FfmpegMedia {
    command_sender: Sender<PlayerCommand>,
    event_receiver: Receiver<MediaEvent>,
    frame_receiver: Receiver<VideoFrame>,
    decoder_thread: Option<JoinHandle<()>>,
    volume: f32,
    muted: bool,
}

impl FfmpegMedia {
    /// Probe the source and start the decoder thread
    pub fn open(source_url: &str) -> Result<Self> {
        ffmpeg::init()?;

        // Fail early if there is nothing to show
        let format_ctx = ffmpeg::format::input(&source_url)?;
        if format_ctx.streams().best(ffmpeg::media::Type::Video).is_none() {
            anyhow::bail!("No video stream found in {}", source_url);
        }
        drop(format_ctx);

        let (command_sender, command_receiver) = crossbeam_channel::unbounded();
        let (event_sender, event_receiver) = crossbeam_channel::unbounded();
        let (frame_sender, frame_receiver) = crossbeam_channel::bounded(FRAME_QUEUE);

        let url = source_url.to_string();
        let decoder_thread = thread::Builder::new()
            .name("media-decoder".into())
            .spawn(move || {
                if let Err(e) = decoder_thread_main(&url, command_receiver, &event_sender, frame_sender) {
                    let _ = event_sender.send(MediaEvent::Error(e.to_string()));
                }
            })?;

        Ok(Self {
            command_sender,
            event_receiver,
            frame_receiver,
            decoder_thread: Some(decoder_thread),
            volume: 1.0,
            muted: false,
        })
    }

    fn stop(&mut self) {
        let _ = self.command_sender.send(PlayerCommand::Stop);
        if let Some(handle) = self.decoder_thread.take() {
            let _ = handle.join();
        }
    }
}

impl MediaElement for FfmpegMedia {
    fn play(&mut self) {
        let _ = self.command_sender.send(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        let _ = self.command_sender.send(PlayerCommand::Pause);
    }

    fn seek(&mut self, time: f64) {
        let _ = self.command_sender.send(PlayerCommand::Seek(time));
    }

    // Video-only pipeline: the levels are kept for when an audio sink exists
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        tracing::debug!("Volume {:.2} (muted: {})", self.volume, self.muted);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        tracing::debug!("Volume {:.2} (muted: {})", self.volume, self.muted);
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        match self.event_receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    fn poll_frame(&mut self) -> Option<VideoFrame> {
        self.frame_receiver.try_recv().ok()
    }
}

impl Drop for FfmpegMedia {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Wall-clock anchor used to pace frames by their timestamps
struct PlaybackClock {
    started_at: Instant,
    start_time: f64,
}

impl PlaybackClock {
    fn new(start_time: f64) -> Self {
        Self {
            started_at: Instant::now(),
            start_time,
        }
    }

    /// How long to wait before a frame at `timestamp` is due
    fn wait_for(&self, timestamp: f64) -> Option<Duration> {
        let due = Duration::from_secs_f64((timestamp - self.start_time).max(0.0));
        due.checked_sub(self.started_at.elapsed())
    }
}

/// Main decoder thread function
fn decoder_thread_main(
    url: &str,
    command_receiver: Receiver<PlayerCommand>,
    event_sender: &Sender<MediaEvent>,
    frame_sender: Sender<VideoFrame>,
) -> Result<()> {
    let mut format_ctx = ffmpeg::format::input(&url)?;

    let stream = format_ctx
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or_else(|| anyhow::anyhow!("No video stream found"))?;

    let video_stream_index = stream.index();
    let time_base = stream.time_base();
    let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());
    let start_offset = stream_start_offset(stream.start_time(), time_base_f64);

    let context_decoder = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = context_decoder.decoder().video()?;

    let duration = if format_ctx.duration() > 0 {
        format_ctx.duration() as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE)
    } else {
        0.0
    };
    let _ = event_sender.send(MediaEvent::MetadataLoaded { duration });

    let width = decoder.width();
    let height = decoder.height();
    let display_width = width.min(MAX_DISPLAY_WIDTH);
    let display_height = (height as f32 * (display_width as f32 / width as f32)) as u32;

    let mut scaler = ffmpeg::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg::format::Pixel::RGBA,
        display_width,
        display_height,
        ffmpeg::software::scaling::Flags::BILINEAR,
    )?;

    let mut playing = false;
    let mut ended = false;
    let mut current_time = 0.0;
    let mut clock = PlaybackClock::new(0.0);
    // Command that arrived while waiting for a frame to come due
    let mut interrupted: Option<PlayerCommand> = None;

    let mut decoded_frame = ffmpeg::frame::Video::empty();
    let mut scaled_frame = ffmpeg::frame::Video::empty();

    loop {
        // Block while paused, poll while playing
        let command = if let Some(cmd) = interrupted.take() {
            Some(cmd)
        } else if playing {
            match command_receiver.try_recv() {
                Ok(cmd) => Some(cmd),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        } else {
            match command_receiver.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => return Ok(()),
            }
        };

        if let Some(cmd) = command {
            match cmd {
                PlayerCommand::Stop => return Ok(()),
                PlayerCommand::Play => {
                    if ended {
                        // Replay from the start, like a native element
                        seek_to(&mut format_ctx, &mut decoder, 0.0, start_offset);
                        current_time = 0.0;
                        ended = false;
                    }
                    playing = true;
                    clock = PlaybackClock::new(current_time);
                    let _ = event_sender.send(MediaEvent::Play);
                }
                PlayerCommand::Pause => {
                    if playing {
                        playing = false;
                        let _ = event_sender.send(MediaEvent::Pause);
                    }
                }
                PlayerCommand::Seek(target_time) => {
                    seek_to(&mut format_ctx, &mut decoder, target_time, start_offset);
                    current_time = target_time;
                    ended = false;
                    clock = PlaybackClock::new(target_time);
                    let _ = event_sender.send(MediaEvent::Seeked);
                    let _ = event_sender.send(MediaEvent::TimeUpdate { current_time });
                }
            }
            continue;
        }

        // Decode next frame
        let mut got_frame = false;
        for (stream, packet) in format_ctx.packets() {
            if stream.index() != video_stream_index {
                continue;
            }

            if decoder.send_packet(&packet).is_err() {
                continue;
            }

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let timestamp = frame_seconds(decoded_frame.pts(), time_base_f64, start_offset);

                // Frames before a seek target are decoded but not shown
                if timestamp < current_time - 0.5 {
                    continue;
                }

                if scaler.run(&decoded_frame, &mut scaled_frame).is_err() {
                    continue;
                }

                let data = scaled_frame.data(0);
                let stride = scaled_frame.stride(0);

                let mut rgba_data = Vec::with_capacity((display_width * display_height * 4) as usize);
                for y in 0..display_height as usize {
                    let row_start = y * stride;
                    let row_end = row_start + (display_width * 4) as usize;
                    rgba_data.extend_from_slice(&data[row_start..row_end]);
                }

                // Wait for the frame to come due, but stay responsive to commands
                if let Some(wait) = clock.wait_for(timestamp) {
                    match command_receiver.recv_timeout(wait) {
                        Ok(PlayerCommand::Stop) | Err(RecvTimeoutError::Disconnected) => return Ok(()),
                        Ok(cmd) => {
                            interrupted = Some(cmd);
                            got_frame = true;
                            break;
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                }

                current_time = timestamp;
                let _ = frame_sender.try_send(VideoFrame {
                    data: rgba_data,
                    width: display_width,
                    height: display_height,
                    _timestamp: timestamp,
                });
                if event_sender.send(MediaEvent::TimeUpdate { current_time }).is_err() {
                    return Ok(()); // Element dropped
                }

                got_frame = true;
                break;
            }

            if got_frame {
                break;
            }
        }

        if !got_frame {
            playing = false;
            ended = true;
            let _ = event_sender.send(MediaEvent::Ended);
        }
    }
}

/// Stream start time in seconds; zero when the container does not report one
fn stream_start_offset(start_time: i64, time_base: f64) -> f64 {
    if start_time == ffmpeg::ffi::AV_NOPTS_VALUE {
        0.0
    } else {
        start_time as f64 * time_base
    }
}

/// Presentation time of a frame relative to the start of the stream
fn frame_seconds(pts: Option<i64>, time_base: f64, start_offset: f64) -> f64 {
    let raw = pts.map_or(start_offset, |pts| pts as f64 * time_base);
    (raw - start_offset).max(0.0)
}

/// Container timestamp (in `AV_TIME_BASE` units) for a stream-relative time
fn seek_timestamp(target_time: f64, start_offset: f64) -> i64 {
    ((target_time + start_offset) * f64::from(ffmpeg::ffi::AV_TIME_BASE)) as i64
}

fn seek_to(
    format_ctx: &mut ffmpeg::format::context::Input,
    decoder: &mut ffmpeg::decoder::Video,
    target_time: f64,
    start_offset: f64,
) {
    let timestamp = seek_timestamp(target_time, start_offset);
    if let Err(e) = format_ctx.seek(timestamp, ..timestamp) {
        tracing::warn!("Seek to {:.2}s failed: {}", target_time, e);
    }
    decoder.flush();
}
