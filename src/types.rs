// Core types shared by the decoder, the compositor and the window.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Number of cells in a `width * height` grid, or `DimensionOverflow`.
/// Counts above `isize::MAX` are rejected.
pub fn pixel_count(width: u32, height: u32) -> Result<usize, Error> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(Error::DimensionOverflow { width, height })
}

/// RGBA interleaved image, 4 bytes per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>, // length = width * height * 4
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes; fails unless `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        let expected = pixel_count(width, height)?
            .checked_mul(4)
            .ok_or(Error::DimensionOverflow { width, height })?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    /// Every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, Error> {
        let n = pixel_count(width, height)?;
        let data = color.to_bytes().repeat(n);
        Self::new(width, height, data)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_len(&self) -> usize {
        self.data.len() / 4
    }

    /// The four channels of pixel `i` (row-major index).
    pub fn pixel(&self, i: usize) -> Rgba {
        let p = &self.data[i * 4..i * 4 + 4];
        Rgba::new(p[0], p[1], p[2], p[3])
    }
}

/// Per-pixel 0/1 segmentation at image resolution; 1 = foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub width: u32,
    pub height: u32,
    bits: Vec<u8>, // length = width * height, values 0 or 1
}

impl BinaryMask {
    /// All-background mask.
    pub fn zeroed(width: u32, height: u32) -> Result<Self, Error> {
        let n = pixel_count(width, height)?;
        let mut bits = Vec::new();
        bits.try_reserve_exact(n).map_err(|_| Error::DimensionOverflow { width, height })?;
        bits.resize(n, 0u8);
        Ok(Self { width, height, bits })
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, i: usize) -> bool {
        self.bits[i] == 1
    }

    /// Mark `[start, end)` as foreground. Caller keeps the range in bounds.
    pub(crate) fn fill_run(&mut self, start: usize, end: usize) {
        self.bits[start..end].fill(1);
    }

    /// How many pixels are foreground.
    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

/// One RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Semi-transparent yellow, the default highlight.
    pub const HIGHLIGHT: Rgba = Rgba::new(255, 255, 0, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pack as 0x00RRGGBB for the window (alpha dropped).
    pub const fn to_screen(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::HIGHLIGHT
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

/// Parses `"R,G,B,A"` with each channel in 0..=255.
impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::Config(format!(
                "color {s:?} must have four channels R,G,B,A"
            )));
        }
        let mut ch = [0u8; 4];
        for (slot, part) in ch.iter_mut().zip(&parts) {
            *slot = part
                .parse::<u8>()
                .map_err(|e| Error::Config(format!("color channel {part:?}: {e}")))?;
        }
        Ok(Rgba::new(ch[0], ch[1], ch[2], ch[3]))
    }
}
