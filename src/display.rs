// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the highlighted image.
// 2) A crosshair that follows your mouse.
// 3) Thin lines and ellipse outlines for the annotation tool.

use crate::error::Error;
use crate::types::{PixelBuffer, Rgba};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// 0x00RRGGBB pixels as minifb wants them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Copy an RGBA buffer in, dropping alpha.
    /// Visual: the window will show exactly the RGB of `buffer` on next present.
    pub fn load(&mut self, buffer: &PixelBuffer) {
        self.width = buffer.width as usize;
        self.height = buffer.height as usize;
        self.pixels.clear();
        self.pixels.extend(
            buffer
                .data()
                .chunks_exact(4)
                .map(|p| Rgba::new(p[0], p[1], p[2], p[3]).to_screen()),
        );
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the image.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, screen: &Screen) -> Result<(), Error> {
        self.window
            .update_with_buffer(&screen.pixels, screen.width, screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    // we flip a boolean in main to switch between overlay and source.
    pub fn m_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::M, KeyRepeat::No)
    }

    /// Visual: when pressed, the mask is re-read and the overlay redrawn.
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    /// Visual: when pressed, all drawn ellipses disappear.
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }
}

/* ---------- Software drawing: pixels, lines, crosshair, ellipses ---------- */

/// Put a pixel on the screen if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(screen: &mut Screen, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= screen.width || y >= screen.height {
        return;
    }
    let idx = y * screen.width + x;
    screen.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
pub fn draw_line(screen: &mut Screen, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(screen, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a “+” shape (with a tiny gap at the center) follows your mouse.
pub fn draw_crosshair(screen: &mut Screen, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(screen, cx - size, cy, cx - 2, cy, color);
    draw_line(screen, cx + 2, cy, cx + size, cy, color);
    draw_line(screen, cx, cy - size, cx, cy - 2, color);
    draw_line(screen, cx, cy + 2, cx, cy + size, color);
    put_pixel(screen, cx, cy, color);
}

/// Outline of the axis-aligned ellipse inscribed in the box (x0,y0)-(x1,y1).
/// Visual: a closed 1-pixel ring; degenerate boxes draw a line or a dot.
pub fn draw_ellipse(screen: &mut Screen, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (left, right) = (x0.min(x1), x0.max(x1));
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    let cx = (left + right) as f32 / 2.0;
    let cy = (top + bottom) as f32 / 2.0;
    let rx = (right - left) as f32 / 2.0;
    let ry = (bottom - top) as f32 / 2.0;

    // Enough segments that neighbours are at most ~2 px apart.
    let steps = ((rx.max(ry) * std::f32::consts::TAU / 2.0).ceil() as i32).max(8);
    let point = |i: i32| {
        let t = i as f32 / steps as f32 * std::f32::consts::TAU;
        ((cx + rx * t.cos()).round() as i32, (cy + ry * t.sin()).round() as i32)
    };
    let mut prev = point(0);
    for i in 1..=steps {
        let next = point(i);
        draw_line(screen, prev.0, prev.1, next.0, next.1, color);
        prev = next;
    }
}
