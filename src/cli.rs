// Command-line surface: picks the image, the mask and the overlay style,
// then hands an OverlayConfig to the pipeline.
//
// Usage examples:
//   mask-overlay scan.png                               (built-in demo mask, window)
//   mask-overlay scan.png --rle "3 2 10 4"
//   mask-overlay scan.png --rle-file liver.rle --color 0,255,0,160
//   mask-overlay scan.png --mode blend --output overlay.png   (no window)

use std::path::PathBuf;

use clap::Parser;

use crate::composite::OverlayMode;
use crate::config::{OverlayConfig, RleSource};
use crate::types::Rgba;

/// Highlight an RLE segmentation mask on top of an image.
#[derive(Parser, Debug)]
#[command(name = "mask-overlay", version)]
pub struct CliArgs {
    /// Image file to load (any format the `image` crate decodes).
    pub image: PathBuf,

    /// RLE mask text: whitespace-separated "start length" pairs, start 1-based.
    #[arg(long, value_name = "PAIRS", conflicts_with = "rle_file")]
    pub rle: Option<String>,

    /// Read the RLE mask from a file. Press R in the window to re-read it.
    #[arg(long, value_name = "FILE")]
    pub rle_file: Option<PathBuf>,

    /// Highlight color as R,G,B,A.
    #[arg(long, default_value_t = Rgba::HIGHLIGHT, value_name = "R,G,B,A")]
    pub color: Rgba,

    /// substitute: paint the color as-is. blend: mix it over the image by its alpha.
    #[arg(long, value_enum, default_value_t = OverlayMode::Substitute)]
    pub mode: OverlayMode,

    /// Write the result as PNG and exit instead of opening a window.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compositor worker threads (default: one per core).
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Debug-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn overlay_config(&self) -> OverlayConfig {
        let rle = match (&self.rle, &self.rle_file) {
            (Some(text), _) => RleSource::Inline(text.clone()),
            (None, Some(path)) => RleSource::File(path.clone()),
            (None, None) => RleSource::default(),
        };
        OverlayConfig {
            rle,
            highlight: self.color,
            mode: self.mode,
            threads: self.threads,
        }
    }
}
