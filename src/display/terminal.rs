//! Crossterm backend.
//!
//! The play area is measured in pixels; the terminal shows it downsampled
//! into character cells, two pixel rows per cell using the upper-half-block
//! glyph (foreground = top pixel, background = bottom pixel).  Text labels are
//! printed as real characters on top.

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Attribute, Color, Colors, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use super::{Clock, Font, FrameClock, Input, InputEvent, KeyState, Label, Surface};
use crate::config::DisplaySettings;
use crate::error::GameError;
use crate::sprite::{Image, Rgb};

/// Play-area pixels per terminal column / row in full-screen mode.
const CELL_WIDTH_PX: i32 = 10;
const CELL_HEIGHT_PX: i32 = 20;

/// A key counts as held while press/repeat events for it keep arriving
/// within this window.  Covers terminals that never report key releases:
/// OS key repeat runs at 15 Hz or faster, so the window is refreshed before
/// it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Owns the terminal writer and undoes exactly the setup steps that were
/// applied, so an early return from `TerminalSurface::open` still hands the
/// terminal back.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
    alternate_screen: bool,
    cursor_hidden: bool,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            raw_mode: false,
            alternate_screen: false,
            cursor_hidden: false,
            keyboard_enhanced: false,
        }
    }

    pub fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        Ok(())
    }

    pub fn enter_alternate_screen(&mut self) -> io::Result<()> {
        self.out.execute(terminal::EnterAlternateScreen)?;
        self.alternate_screen = true;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.out.execute(cursor::Hide)?;
        self.cursor_hidden = true;
        Ok(())
    }

    /// Ask for key-release reporting.  Terminals without the kitty protocol
    /// refuse; returns whether it was accepted.
    pub fn enhance_keyboard(&mut self) -> bool {
        self.keyboard_enhanced = self
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        self.keyboard_enhanced
    }
}

impl<W: Write> Write for TerminalGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(style::ResetColor);
        if self.cursor_hidden {
            let _ = self.out.execute(cursor::Show);
        }
        if self.alternate_screen {
            let _ = self.out.execute(terminal::LeaveAlternateScreen);
        }
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

pub struct TerminalSurface {
    out: TerminalGuard<BufWriter<Stdout>>,
    width: i32,
    height: i32,
    cols: u16,
    rows: u16,
    /// Downsampled frame, `cols` × `rows * 2`.
    pixels: Vec<Option<Rgb>>,
    labels: Vec<(u16, u16, Label)>,
    events: mpsc::Receiver<Event>,
    /// Last press/repeat time per key.
    held: HashMap<KeyCode, Instant>,
    clock: Clock,
}

impl TerminalSurface {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor and
    /// a reader thread feeding key events through a channel.
    pub fn open(settings: &DisplaySettings) -> Result<Self, GameError> {
        let mut out = TerminalGuard::new(BufWriter::new(stdout()));

        out.enable_raw_mode()?;
        out.enter_alternate_screen()?;
        out.hide_cursor()?;
        out.execute(terminal::SetTitle(&settings.caption))?;
        let keyboard_enhanced = out.enhance_keyboard();

        let (cols, rows) = terminal::size()?;
        let (width, height) = if settings.full_screen {
            (cols as i32 * CELL_WIDTH_PX, rows as i32 * CELL_HEIGHT_PX)
        } else {
            (settings.width, settings.height)
        };
        log::info!(
            "terminal {cols}x{rows}, play area {width}x{height}, keyboard enhancement: {keyboard_enhanced}"
        );

        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            out,
            width,
            height,
            cols,
            rows,
            pixels: vec![None; cols as usize * rows as usize * 2],
            labels: Vec::new(),
            events: rx,
            held: HashMap::new(),
            clock: Clock::new(),
        })
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.pixels = vec![None; cols as usize * rows as usize * 2];
        log::debug!("terminal resized to {cols}x{rows}");
    }

    fn to_cell_pixel(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        downsample((x, y), (self.width, self.height), (self.cols, self.rows))
    }

    /// Play-area position to a character cell.
    fn to_cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = (x.max(0) as i64 * self.cols as i64 / self.width.max(1) as i64) as u16;
        let row = (y.max(0) as i64 * self.rows as i64 / self.height.max(1) as i64) as u16;
        (col, row)
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.held
            .get(&code)
            .map(|&last| last.elapsed() <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&code| self.is_held(code))
    }
}

/// Map a play-area pixel onto the half-block grid of a `cols`×`rows`
/// terminal (two pixel rows per cell).  `None` when the pixel is outside the
/// play area or the terminal has no cells.
pub fn downsample(
    (x, y): (i32, i32),
    (width, height): (i32, i32),
    (cols, rows): (u16, u16),
) -> Option<(usize, usize)> {
    if cols == 0 || rows == 0 {
        return None;
    }
    if x < 0 || y < 0 || x >= width || y >= height {
        return None;
    }
    let fx = x as i64 * cols as i64 / width as i64;
    let fy = y as i64 * rows as i64 * 2 / height as i64;
    Some((fx as usize, fy as usize))
}

fn to_color(pixel: Option<Rgb>) -> Color {
    match pixel {
        Some(Rgb(r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn blit(&mut self, image: &Image, position: (i32, i32)) {
        let fb_width = self.cols as usize;
        let (x0, y0) = position;
        for y in 0..image.height() {
            for x in 0..image.width() {
                let Some(color) = image.pixel(x, y) else {
                    continue;
                };
                if let Some((fx, fy)) = self.to_cell_pixel(x0 + x, y0 + y) {
                    self.pixels[fy * fb_width + fx] = Some(color);
                }
            }
        }
    }

    fn render_text(&self, font: Font, text: &str, color: Rgb) -> Label {
        let chars = text.chars().count() as i32;
        Label {
            text: text.to_string(),
            font,
            color,
            width: chars * self.width / self.cols.max(1) as i32,
        }
    }

    fn blit_label(&mut self, label: &Label, position: (i32, i32)) {
        let (col, row) = self.to_cell(position.0, position.1);
        if col < self.cols && row < self.rows {
            self.labels.push((col, row, label.clone()));
        }
    }

    fn present(&mut self) -> Result<(), GameError> {
        let cols = self.cols as usize;
        let mut current: Option<Colors> = None;

        for row in 0..self.rows as usize {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..cols {
                let top = self.pixels[row * 2 * cols + col];
                let bottom = self.pixels[(row * 2 + 1) * cols + col];
                let (glyph, colors) = match (top, bottom) {
                    (None, None) => (' ', Colors::new(Color::Reset, Color::Reset)),
                    (None, Some(_)) => ('▄', Colors::new(to_color(bottom), Color::Reset)),
                    _ => ('▀', Colors::new(to_color(top), to_color(bottom))),
                };
                if current != Some(colors) {
                    self.out.queue(style::SetColors(colors))?;
                    current = Some(colors);
                }
                self.out.queue(Print(glyph))?;
            }
        }

        for (col, row, label) in self.labels.drain(..) {
            let Rgb(r, g, b) = label.color;
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetColors(Colors::new(
                Color::Rgb { r, g, b },
                Color::Reset,
            )))?;
            if label.font == Font::Banner {
                self.out.queue(style::SetAttribute(Attribute::Bold))?;
            }
            self.out.queue(Print(&label.text))?;
            self.out.queue(style::SetAttribute(Attribute::Reset))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        self.pixels.fill(None);
        Ok(())
    }
}

impl Input for TerminalSurface {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(ev) = self.events.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            events.push(InputEvent::Quit);
                        }
                        self.held.insert(code, Instant::now());
                    }
                    KeyEventKind::Repeat => {
                        self.held.insert(code, Instant::now());
                    }
                    KeyEventKind::Release => {
                        self.held.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
        events
    }

    fn key_state(&self) -> KeyState {
        KeyState {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            fire: self.is_held(KeyCode::Char(' ')),
            escape: self.is_held(KeyCode::Esc),
        }
    }
}

impl FrameClock for TerminalSurface {
    fn tick(&mut self, fps: u32) {
        self.clock.tick(fps);
    }
}
