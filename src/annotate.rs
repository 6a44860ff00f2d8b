// Elliptical region-of-interest tool, driven by the left mouse button.
// Visual: press to anchor a corner, drag to preview, release to keep the ring.
// Works on screen coordinates only; it never touches the overlay pipeline.

use log::info;

use crate::display::{Screen, draw_ellipse};
use crate::types::PixelBuffer;

/// An ellipse inscribed in the box between two corners (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ellipse {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Ellipse {
    fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self { x0: a.0.min(b.0), y0: a.1.min(b.1), x1: a.0.max(b.0), y1: a.1.max(b.1) }
    }

    /// Whether pixel (x,y) lies inside (or on) the ellipse.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let cx = (self.x0 + self.x1) as f32 / 2.0;
        let cy = (self.y0 + self.y1) as f32 / 2.0;
        // Half a pixel of slack so thin ellipses still hold their axis pixels.
        let rx = (self.x1 - self.x0) as f32 / 2.0 + 0.5;
        let ry = (self.y1 - self.y0) as f32 / 2.0 + 0.5;
        let dx = (x as f32 - cx) / rx;
        let dy = (y as f32 - cy) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// Pixel statistics of the source image under an ellipse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiStats {
    pub pixels: usize,
    /// Mean of (R+G+B)/3 over the covered pixels, 0..=255.
    pub mean: f32,
}

/// Count and mean intensity of `image` pixels inside `roi`.
pub fn roi_stats(image: &PixelBuffer, roi: &Ellipse) -> RoiStats {
    let (w, h) = (image.width as i32, image.height as i32);
    let mut count = 0usize;
    let mut sum = 0f64;
    for y in roi.y0.max(0)..=roi.y1.min(h - 1) {
        for x in roi.x0.max(0)..=roi.x1.min(w - 1) {
            if !roi.contains(x, y) {
                continue;
            }
            let p = image.pixel(y as usize * image.width as usize + x as usize);
            sum += (p.r as f64 + p.g as f64 + p.b as f64) / 3.0;
            count += 1;
        }
    }
    let mean = if count == 0 { 0.0 } else { (sum / count as f64) as f32 };
    RoiStats { pixels: count, mean }
}

#[derive(Debug, Default)]
pub struct EllipseRoi {
    anchor: Option<(i32, i32)>,
    cursor: (i32, i32),
    done: Vec<Ellipse>,
}

impl EllipseRoi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of mouse state. Returns the ellipse committed this frame, if any.
    pub fn update(&mut self, mouse: Option<(usize, usize)>, down: bool) -> Option<Ellipse> {
        if let Some((x, y)) = mouse {
            self.cursor = (x as i32, y as i32);
        }
        match (self.anchor, down) {
            (None, true) => {
                self.anchor = Some(self.cursor);
                None
            }
            (Some(a), false) => {
                self.anchor = None;
                let e = Ellipse::from_corners(a, self.cursor);
                self.done.push(e);
                Some(e)
            }
            _ => None,
        }
    }

    /// Drag in progress, if the button is held.
    pub fn preview(&self) -> Option<Ellipse> {
        self.anchor.map(|a| Ellipse::from_corners(a, self.cursor))
    }

    pub fn ellipses(&self) -> &[Ellipse] {
        &self.done
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.done.clear();
    }

    /// Draw committed rings plus the live preview on top of `screen`.
    pub fn render(&self, screen: &mut Screen, color: u32) {
        let preview = self.preview();
        for e in self.done.iter().chain(preview.iter()) {
            draw_ellipse(screen, e.x0, e.y0, e.x1, e.y1, color);
        }
    }
}

/// Log what a freshly committed ROI covers.
pub fn report(image: &PixelBuffer, roi: &Ellipse) {
    let s = roi_stats(image, roi);
    info!(
        "ROI ({},{})-({},{}): {} px, mean intensity {:.1}",
        roi.x0, roi.y0, roi.x1, roi.y1, s.pixels, s.mean
    );
}
