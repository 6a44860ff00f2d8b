// Decode-then-composite, once per request.
// The context is built once at startup and handed to whoever runs overlays;
// requests and results carry no UI types.

use std::time::Instant;

use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::composite::composite_with_mode;
use crate::config::OverlayConfig;
use crate::error::Error;
use crate::rle;
use crate::source;
use crate::types::PixelBuffer;

/// What the caller hands in: encoded image bytes plus the RLE text to draw.
#[derive(Clone, Debug)]
pub struct OverlayRequest {
    pub image_bytes: Vec<u8>,
    pub rle: String,
}

/// What goes to the display: the source image, the highlighted image, and stats.
#[derive(Clone, Debug)]
pub struct OverlayResult {
    pub source: PixelBuffer,
    pub output: PixelBuffer,
    pub width: u32,
    pub height: u32,
    /// Number of pixels the mask marked as foreground.
    pub foreground: usize,
}

/// Shared state for overlay requests: settings plus the compositor pool.
pub struct OverlayContext {
    config: OverlayConfig,
    pool: ThreadPool,
}

impl OverlayContext {
    pub fn init(config: OverlayConfig) -> Result<Self, Error> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("overlay-{i}"));
        if let Some(n) = config.threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::Config(format!("thread pool: {e}")))?;
        info!(
            "overlay context ready: color {} mode {:?} threads {}",
            config.highlight,
            config.mode,
            pool.current_num_threads()
        );
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Decode the image, then apply the request's mask.
    pub fn run(&self, request: &OverlayRequest) -> Result<OverlayResult, Error> {
        let source = source::decode_image(&request.image_bytes)?;
        info!("decoded image {}x{}", source.width, source.height);
        self.apply(source, &request.rle)
    }

    /// Mask + composite over an already decoded image.
    /// Nothing partial escapes: either a full result or an error.
    pub fn apply(&self, source: PixelBuffer, rle_text: &str) -> Result<OverlayResult, Error> {
        let started = Instant::now();
        let mask = rle::decode(rle_text, source.width, source.height)?;
        let foreground = mask.count_set();

        let cfg = &self.config;
        let output = self
            .pool
            .install(|| composite_with_mode(&source, &mask, cfg.highlight, cfg.mode))?;

        debug!("overlay took {:.2?}", started.elapsed());
        info!("mask covers {foreground} of {} pixels", mask.len());
        Ok(OverlayResult {
            width: output.width,
            height: output.height,
            source,
            output,
            foreground,
        })
    }
}
