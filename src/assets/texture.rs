//! Texture image decoding.

use std::path::Path;

use crate::error::LumenError;

/// Decoded RGBA8 pixel data ready for GPU upload.
pub struct RgbaPixels {
    /// Tightly packed RGBA8 pixel data, row major.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Decode an image file to tightly packed RGBA8.
///
/// # Errors
///
/// Returns [`LumenError::Asset`] if the file cannot be read or decoded.
pub fn load_rgba8(path: &Path) -> Result<RgbaPixels, LumenError> {
    let image = image::open(path)
        .map_err(|e| LumenError::Asset(format!("{}: {e}", path.display())))?
        .to_rgba8();
    let (width, height) = image.dimensions();

    Ok(RgbaPixels {
        pixels: image.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_asset_error() {
        let result = load_rgba8(Path::new("/nonexistent/texture.png"));
        assert!(matches!(result, Err(LumenError::Asset(_))));
    }
}
