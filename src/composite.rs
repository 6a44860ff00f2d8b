// Compositor: paints the highlight color over masked pixels.
// Visual expectation: the decoded segmentation shows up as a flat yellow
// region on top of the image; every other pixel is untouched.

use rayon::prelude::*;

use crate::error::Error;
use crate::types::{BinaryMask, PixelBuffer, Rgba};

/// How a masked pixel is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverlayMode {
    /// Replace all four channels with the highlight color (alpha stored, not blended).
    #[default]
    Substitute,
    /// Mix the highlight over the source using the highlight alpha.
    Blend,
}

/// Flat-substitution composite; see [`composite_with_mode`].
pub fn composite(
    pixels: &PixelBuffer,
    mask: &BinaryMask,
    color: Rgba,
) -> Result<PixelBuffer, Error> {
    composite_with_mode(pixels, mask, color, OverlayMode::Substitute)
}

/// Build a new buffer where masked pixels take `color` and the rest copy `pixels`.
/// `pixels` is only read. Rows are processed in parallel on the current rayon pool.
pub fn composite_with_mode(
    pixels: &PixelBuffer,
    mask: &BinaryMask,
    color: Rgba,
    mode: OverlayMode,
) -> Result<PixelBuffer, Error> {
    let expected = mask.len() * 4;
    if pixels.data().len() != expected {
        return Err(Error::DimensionMismatch { expected, actual: pixels.data().len() });
    }
    if pixels.width != mask.width || pixels.height != mask.height {
        return Err(Error::GridMismatch {
            pixels: (pixels.width, pixels.height),
            mask: (mask.width, mask.height),
        });
    }

    let src = pixels.data();
    let bits = mask.bits();
    let w = mask.width as usize;
    let stride = w * 4;
    let mut out = src.to_vec();

    // Zero-width rows would make the chunk size 0.
    if stride > 0 {
        out.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
            let row_mask = &bits[y * w..(y + 1) * w];
            for (x, &m) in row_mask.iter().enumerate() {
                if m == 0 {
                    continue; // already a copy of the source
                }
                let pi = x * 4;
                let px = &mut row_out[pi..pi + 4];
                match mode {
                    OverlayMode::Substitute => px.copy_from_slice(&color.to_bytes()),
                    OverlayMode::Blend => px.copy_from_slice(&blend_over(px, color)),
                }
            }
        });
    }

    PixelBuffer::new(pixels.width, pixels.height, out)
}

/// `out = src * (1 - a) + color * a` per color channel, rounded; alpha is source-over.
#[inline]
fn blend_over(src: &[u8], color: Rgba) -> [u8; 4] {
    let a = color.a as u32;
    let inv = 255 - a;
    let mix = |s: u8, c: u8| ((s as u32 * inv + c as u32 * a + 127) / 255) as u8;
    let out_a = a + (src[3] as u32 * inv + 127) / 255;
    [
        mix(src[0], color.r),
        mix(src[1], color.g),
        mix(src[2], color.b),
        out_a.min(255) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle;

    fn grey(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::filled(w, h, Rgba::new(10, 10, 10, 255)).unwrap()
    }

    #[test]
    fn worked_example_highlights_two_pixels() {
        let src = grey(4, 2);
        let mask = rle::decode("3 2", 4, 2).unwrap();
        let out = composite(&src, &mask, Rgba::HIGHLIGHT).unwrap();
        for i in 0..8 {
            let want = if i == 2 || i == 3 { Rgba::HIGHLIGHT } else { Rgba::new(10, 10, 10, 255) };
            assert_eq!(out.pixel(i), want, "pixel {i}");
        }
    }

    #[test]
    fn empty_mask_is_identity() {
        let src = PixelBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let mask = rle::decode("", 2, 1).unwrap();
        let out = composite(&src, &mask, Rgba::HIGHLIGHT).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn source_is_not_mutated() {
        let src = grey(3, 3);
        let before = src.clone();
        let mask = rle::decode("1 9", 3, 3).unwrap();
        let out = composite(&src, &mask, Rgba::HIGHLIGHT).unwrap();
        assert_eq!(src, before);
        assert_ne!(out, src);
    }

    #[test]
    fn length_mismatch_fails() {
        let src = grey(4, 2);
        let mask = BinaryMask::zeroed(4, 3).unwrap();
        let err = composite(&src, &mask, Rgba::HIGHLIGHT).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 48, actual: 32 }));
    }

    #[test]
    fn transposed_dimensions_fail() {
        let src = grey(4, 2);
        let mask = BinaryMask::zeroed(2, 4).unwrap();
        let err = composite(&src, &mask, Rgba::HIGHLIGHT).unwrap_err();
        assert!(matches!(err, Error::GridMismatch { pixels: (4, 2), mask: (2, 4) }));
        assert_eq!(err.to_string(), "Grid mismatch: image is 4x2, mask is 2x4");
    }

    #[test]
    fn blend_mixes_with_alpha() {
        let src = PixelBuffer::filled(1, 1, Rgba::new(0, 0, 200, 255)).unwrap();
        let mask = rle::decode("1 1", 1, 1).unwrap();
        let out = composite_with_mode(&src, &mask, Rgba::HIGHLIGHT, OverlayMode::Blend).unwrap();
        // 128/255 of yellow over blue
        assert_eq!(out.pixel(0), Rgba::new(128, 128, 100, 255));
    }

    #[test]
    fn blend_extremes() {
        let src = PixelBuffer::filled(1, 1, Rgba::new(40, 50, 60, 70)).unwrap();
        let mask = rle::decode("1 1", 1, 1).unwrap();
        let clear = composite_with_mode(&src, &mask, Rgba::new(255, 0, 0, 0), OverlayMode::Blend).unwrap();
        assert_eq!(clear.pixel(0), Rgba::new(40, 50, 60, 70));
        let opaque = composite_with_mode(&src, &mask, Rgba::new(255, 0, 0, 255), OverlayMode::Blend).unwrap();
        assert_eq!(opaque.pixel(0), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn zero_sized_image_composites_to_empty() {
        let src = PixelBuffer::new(0, 3, Vec::new()).unwrap();
        let mask = BinaryMask::zeroed(0, 3).unwrap();
        let out = composite(&src, &mask, Rgba::HIGHLIGHT).unwrap();
        assert_eq!(out.pixel_len(), 0);
    }
}
