//! Pixel images and the opacity masks derived from them.
//!
//! Sprites come from two sources: PNG files (decoded with `image`) and a
//! text pixel-art format where every character is one pixel.

use std::fmt;
use std::path::Path;

use crate::error::GameError;

/// Alpha above this value counts as opaque when deriving a mask from a PNG.
const ALPHA_THRESHOLD: u8 = 127;

// ── Colour ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Palette used by the text sprite format.
    pub fn from_palette(ch: char) -> Option<Rgb> {
        match ch {
            'W' => Some(Rgb::WHITE),
            'K' => Some(Rgb(90, 90, 100)),
            'R' => Some(Rgb(220, 50, 47)),
            'G' => Some(Rgb(80, 200, 80)),
            'B' => Some(Rgb(60, 120, 230)),
            'Y' => Some(Rgb(240, 220, 60)),
            'C' => Some(Rgb(60, 210, 220)),
            'M' => Some(Rgb(210, 80, 200)),
            'O' => Some(Rgb(240, 150, 40)),
            'P' => Some(Rgb(150, 90, 220)),
            _ => None,
        }
    }
}

// ── Mask ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// An all-transparent mask.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// An all-opaque mask.
    pub fn filled(width: i32, height: i32) -> Self {
        let mut mask = Self::new(width, height);
        mask.bits.fill(true);
        mask
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Opacity at `(x, y)`; anything outside the mask is transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, opaque: bool) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.bits[(y * self.width + x) as usize] = opaque;
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if any opaque pixel of `self` coincides with an opaque pixel of
    /// `other` placed at `offset` relative to `self`'s origin.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = self.width.min(dx + other.width);
        let y1 = self.height.min(dy + other.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

// ── Text sprite syntax errors ────────────────────────────────────────────────

/// An unknown character in a text sprite (1-based line and column).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSyntaxError {
    pub line: usize,
    pub column: usize,
    pub found: char,
}

impl fmt::Display for SpriteSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown pixel {:?} at line {}, column {}",
            self.found, self.line, self.column
        )
    }
}

impl std::error::Error for SpriteSyntaxError {}

// ── Image ────────────────────────────────────────────────────────────────────

/// A sprite: row-major pixels, `None` is transparent.  The mask is derived
/// once at construction and never diverges from the pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<Option<Rgb>>,
    mask: Mask,
}

impl Image {
    pub fn from_pixels(width: i32, height: i32, mut pixels: Vec<Option<Rgb>>) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        pixels.resize((width * height) as usize, None);

        let mut mask = Mask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, pixels[(y * width + x) as usize].is_some());
            }
        }

        Self {
            width,
            height,
            pixels,
            mask,
        }
    }

    /// A solid rectangle of one colour.
    pub fn filled(width: i32, height: i32, color: Rgb) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self::from_pixels(width, height, vec![Some(color); len])
    }

    /// Parse the text pixel-art format.  Shorter rows are padded with
    /// transparent pixels.
    pub fn parse(text: &str) -> Result<Self, SpriteSyntaxError> {
        let rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;

        let mut pixels = vec![None; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pixel = match ch {
                    '.' | ' ' => None,
                    other => Some(Rgb::from_palette(other).ok_or(SpriteSyntaxError {
                        line: y + 1,
                        column: x + 1,
                        found: other,
                    })?),
                };
                pixels[y * width as usize + x] = pixel;
            }
        }

        Ok(Self::from_pixels(width, height, pixels))
    }

    /// Load a sprite from disk: `.png` through the `image` crate, anything
    /// else as text pixel art.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("png"))
            .unwrap_or(false);

        let image = if is_png {
            Self::load_png(path)?
        } else {
            let text = std::fs::read_to_string(path).map_err(|e| GameError::AssetLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            Self::parse(&text).map_err(|source| GameError::SpriteSyntax {
                path: path.to_path_buf(),
                source,
            })?
        };

        log::debug!(
            "loaded sprite {} ({}x{}, {} opaque)",
            path.display(),
            image.width,
            image.height,
            image.mask.count()
        );
        Ok(image)
    }

    fn load_png(path: &Path) -> Result<Self, GameError> {
        let decoded = image::open(path)
            .map_err(|e| GameError::AssetLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        let pixels = decoded
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (a > ALPHA_THRESHOLD).then_some(Rgb(r, g, b))
            })
            .collect();

        Ok(Self::from_pixels(
            decoded.width() as i32,
            decoded.height() as i32,
            pixels,
        ))
    }

    /// Nearest-neighbour resample to `width`×`height`.
    pub fn scale(&self, width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        if self.width == 0 || self.height == 0 {
            return Self::from_pixels(width, height, Vec::new());
        }

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let sy = (y as i64 * self.height as i64 / height as i64) as i32;
            for x in 0..width {
                let sx = (x as i64 * self.width as i64 / width as i64) as i32;
                pixels.push(self.pixel(sx, sy));
            }
        }
        Self::from_pixels(width, height, pixels)
    }

    /// Integer upscale, each pixel becomes a `factor`×`factor` block.
    pub fn scale_by(&self, factor: u32) -> Self {
        let factor = factor.max(1) as i32;
        self.scale(self.width * factor, self.height * factor)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}
