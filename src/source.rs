// Image collaborator: turns file bytes into an RGBA PixelBuffer and back.
// Visual expectation: whatever format `image` understands comes out as the
// same RGBA grid the compositor works on.

use std::fs;
use std::path::Path;

use image::RgbaImage;

use crate::error::Error;
use crate::types::PixelBuffer;

/// Decode encoded image bytes (PNG, JPEG, ...) into RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, Error> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::ImageDecode(e.to_string()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    PixelBuffer::new(w, h, img.into_raw())
}

/// Read a whole file, tagging failures with the path.
pub fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

/// Read a whole text file (RLE masks).
pub fn read_text(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

/// Write an RGBA buffer as PNG, whatever the file extension says.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), Error> {
    let img = RgbaImage::from_raw(buffer.width, buffer.height, buffer.data().to_vec())
        .ok_or_else(|| Error::ImageEncode("buffer smaller than its dimensions".into()))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::ImageEncode(format!("{}: {e}", path.display())))
}
