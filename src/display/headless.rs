//! A backend with no screen: it records what was drawn and replays scripted
//! input.  Frames are never throttled.

use std::collections::VecDeque;

use super::{Font, FrameClock, Input, InputEvent, KeyState, Label, Surface};
use crate::error::GameError;
use crate::sprite::{Image, Rgb};

/// Nominal glyph width used to give labels a width.
const GLYPH_WIDTH_PX: i32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Image {
        width: i32,
        height: i32,
        position: (i32, i32),
    },
    Text {
        text: String,
        position: (i32, i32),
    },
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: i32,
    height: i32,
    /// Calls made since the last `present`.
    pending: Vec<DrawCall>,
    /// The most recently presented frame.
    last_frame: Vec<DrawCall>,
    frames_presented: u64,
    ticks: u64,
    /// Event batches handed out one per `poll_events` call.
    scripted_events: VecDeque<Vec<InputEvent>>,
    keys: KeyState,
    icon_set: bool,
}

impl HeadlessSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Keys reported from now on.
    pub fn hold_keys(&mut self, keys: KeyState) {
        self.keys = keys;
    }

    /// Queue a batch of events for a future `poll_events` call.
    pub fn push_events(&mut self, events: Vec<InputEvent>) {
        self.scripted_events.push_back(events);
    }

    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    /// Texts drawn in the most recently presented frame.
    pub fn last_texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                DrawCall::Image { .. } => None,
            })
            .collect()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn icon_set(&self) -> bool {
        self.icon_set
    }
}

impl Surface for HeadlessSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn blit(&mut self, image: &Image, position: (i32, i32)) {
        self.pending.push(DrawCall::Image {
            width: image.width(),
            height: image.height(),
            position,
        });
    }

    fn render_text(&self, font: Font, text: &str, color: Rgb) -> Label {
        Label {
            text: text.to_string(),
            font,
            color,
            width: text.chars().count() as i32 * GLYPH_WIDTH_PX,
        }
    }

    fn blit_label(&mut self, label: &Label, position: (i32, i32)) {
        self.pending.push(DrawCall::Text {
            text: label.text.clone(),
            position,
        });
    }

    fn set_icon(&mut self, _icon: &Image) {
        self.icon_set = true;
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }
}

impl Input for HeadlessSurface {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.scripted_events.pop_front().unwrap_or_default()
    }

    fn key_state(&self) -> KeyState {
        self.keys
    }
}

impl FrameClock for HeadlessSurface {
    fn tick(&mut self, _fps: u32) {
        self.ticks += 1;
    }
}
