//! Presentation layer.
//!
//! The game core only talks to the traits below; `terminal` renders to a
//! crossterm alternate screen and `headless` records calls for tests.

pub mod headless;
pub mod terminal;

use std::thread;
use std::time::{Duration, Instant};

use crate::error::GameError;
use crate::sprite::{Image, Rgb};

// ── Text ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Level / lives counters.
    Hud,
    /// The loss banner.
    Banner,
}

/// Rendered text; `width` is in play-area pixels so it can be laid out like
/// an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub font: Font,
    pub color: Rgb,
    pub width: i32,
}

// ── Input ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
}

/// Snapshot of the keys the game cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub escape: bool,
}

// ── Backend traits ───────────────────────────────────────────────────────────

pub trait Surface {
    /// Play-area width in pixels.
    fn width(&self) -> i32;
    /// Play-area height in pixels.
    fn height(&self) -> i32;
    fn blit(&mut self, image: &Image, position: (i32, i32));
    fn render_text(&self, font: Font, text: &str, color: Rgb) -> Label;
    fn blit_label(&mut self, label: &Label, position: (i32, i32));
    fn set_icon(&mut self, _icon: &Image) {}
    /// Flip the finished frame to the screen.
    fn present(&mut self) -> Result<(), GameError>;
}

pub trait Input {
    /// Drain pending window-level events.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn key_state(&self) -> KeyState;
}

pub trait FrameClock {
    /// Block until the next frame boundary at `fps`.
    fn tick(&mut self, fps: u32);
}

/// Everything the director needs from a backend.
pub trait Presentation: Surface + Input + FrameClock {}

impl<T: Surface + Input + FrameClock> Presentation for T {}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Sleep-based frame limiter.
#[derive(Debug, Default)]
pub struct Clock {
    last: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps off whatever is left of the current frame.
    pub fn tick(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
