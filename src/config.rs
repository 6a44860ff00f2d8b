// Overlay settings: which mask to draw, in what color, and how.

use std::path::PathBuf;

use crate::composite::OverlayMode;
use crate::error::Error;
use crate::source;
use crate::types::Rgba;

/// Demo segmentation used when no mask is given. Runs past the image end are skipped.
pub const DEFAULT_RLE: &str = "324033 38 325215 44 326397 50 327580 53 328764 55 329948 56 \
331130 62 332314 64 333497 69 334679 74 335862 77 337046 78 338230 80 339415 80 340599 82 \
341784 83 342968 84 344152 86 345336 88 346521 88 347705 90 348890 90 350075 90 351259 92 \
352444 92 353629 93 354814 93 355999 93 357184 93 358368 94 359553 94 360737 95 361922 95 \
363107 95 364292 95 365477 95 366662 95 367847 95 369032 95 370217 95 371402 95 372587 95 \
373772 95 374957 95 376142 95 377327 94 378513 93 379698 92 380884 91 382069 90 383254 90 \
384440 88 385625 87 386811 86 387997 84 389182 84 390368 82 391553 82 392739 80 393927 77 \
395114 74 396300 72 397487 69 398673 66 399861 62 401049 57 402237 51 403425 47 404614 40 \
405800 38 406988 34 408174 31 409362 25";

/// Where the RLE text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RleSource {
    Inline(String),
    File(PathBuf),
}

impl RleSource {
    /// Fetch the current RLE text. File sources are re-read on every call.
    pub fn load(&self) -> Result<String, Error> {
        match self {
            RleSource::Inline(s) => Ok(s.clone()),
            RleSource::File(path) => source::read_text(path),
        }
    }
}

impl Default for RleSource {
    fn default() -> Self {
        RleSource::Inline(DEFAULT_RLE.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayConfig {
    pub rle: RleSource,
    pub highlight: Rgba,
    pub mode: OverlayMode,
    /// Compositor worker threads; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            rle: RleSource::default(),
            highlight: Rgba::HIGHLIGHT,
            mode: OverlayMode::Substitute,
            threads: None,
        }
    }
}
