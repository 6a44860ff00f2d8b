// One error type for the whole overlay tool.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// RLE text that cannot be read as (start, length) pairs.
    #[error("Malformed mask: {reason} (token {token:?})")]
    MalformedMask { token: String, reason: &'static str },

    /// A pixel buffer and a mask (or a buffer and its own size) disagree.
    #[error("Dimension mismatch: expected {expected} bytes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Same byte count, different width/height (e.g. a transposed mask).
    #[error("Grid mismatch: image is {}x{}, mask is {}x{}", pixels.0, pixels.1, mask.0, mask.1)]
    GridMismatch { pixels: (u32, u32), mask: (u32, u32) },

    #[error("Dimension overflow: {width}x{height} does not fit in memory indices")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),
}

impl Error {
    pub(crate) fn malformed(token: &str, reason: &'static str) -> Self {
        Error::MalformedMask { token: token.to_string(), reason }
    }
}
