//! Highlight an RLE-encoded segmentation mask on top of an RGBA image.
//!
//! `rle::decode` turns the mask text into a `BinaryMask`, `composite` paints it
//! over a `PixelBuffer`, and `pipeline::OverlayContext` runs both per request.

pub mod annotate;
pub mod cli;
pub mod composite;
pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod rle;
pub mod source;
pub mod types;

pub use composite::{OverlayMode, composite, composite_with_mode};
pub use config::{OverlayConfig, RleSource};
pub use error::Error;
pub use pipeline::{OverlayContext, OverlayRequest, OverlayResult};
pub use types::{BinaryMask, PixelBuffer, Rgba};
