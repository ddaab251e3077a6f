// In-memory media backend for tests
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{bail, Result};

use super::media::{FullscreenError, FullscreenHost, MediaElement, MediaEvent, MediaLoader};

/// Instruction received by a fake element
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Seek(f64),
    Volume(f32),
    Muted(bool),
}

#[derive(Default)]
struct Shared {
    loaded: Vec<String>,
    commands: Vec<Command>,
    events: VecDeque<MediaEvent>,
    live_elements: usize,
}

/// Loader whose elements record commands and replay injected events
#[derive(Clone, Default)]
pub struct FakeLoader {
    shared: Rc<RefCell<Shared>>,
    undecodable: Vec<String>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `load` fail for this URL
    pub fn rejecting(mut self, url: &str) -> Self {
        self.undecodable.push(url.to_string());
        self
    }

    pub fn loaded(&self) -> Vec<String> {
        self.shared.borrow().loaded.clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.shared.borrow().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.shared.borrow_mut().commands.clear();
    }

    /// Queue an event as if the element had emitted it
    pub fn emit(&self, event: MediaEvent) {
        self.shared.borrow_mut().events.push_back(event);
    }

    /// Elements created and not yet dropped
    pub fn live_elements(&self) -> usize {
        self.shared.borrow().live_elements
    }
}

impl MediaLoader for FakeLoader {
    type Element = FakeElement;

    fn load(&mut self, source_url: &str) -> Result<FakeElement> {
        if self.undecodable.iter().any(|u| u == source_url) {
            bail!("cannot decode {source_url}");
        }
        let mut shared = self.shared.borrow_mut();
        shared.loaded.push(source_url.to_string());
        shared.live_elements += 1;
        Ok(FakeElement {
            shared: Rc::clone(&self.shared),
        })
    }
}

pub struct FakeElement {
    shared: Rc<RefCell<Shared>>,
}

impl FakeElement {
    fn record(&self, command: Command) {
        self.shared.borrow_mut().commands.push(command);
    }
}

impl MediaElement for FakeElement {
    fn play(&mut self) {
        self.record(Command::Play);
    }

    fn pause(&mut self) {
        self.record(Command::Pause);
    }

    fn seek(&mut self, time: f64) {
        self.record(Command::Seek(time));
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(Command::Volume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.record(Command::Muted(muted));
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.shared.borrow_mut().events.pop_front()
    }
}

impl Drop for FakeElement {
    fn drop(&mut self) {
        self.shared.borrow_mut().live_elements -= 1;
    }
}

/// Fullscreen host that can be told to refuse requests
#[derive(Default)]
pub struct FakeScreen {
    pub fullscreen: bool,
    pub deny: bool,
}

impl FullscreenHost for FakeScreen {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError> {
        if self.deny {
            return Err(FullscreenError("no user gesture".into()));
        }
        self.fullscreen = fullscreen;
        Ok(())
    }
}
