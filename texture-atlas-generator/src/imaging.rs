//! Narrow image capability used by the atlas core.
//!
//! Placement, compositing and metadata only talk to [`ImageBackend`], so the
//! raster library behind it can be swapped without touching the packing logic.

use crate::error::{AtlasError, AtlasResult};
use constants::texture::CLEAR_PIXEL;
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

pub trait ImageBackend {
    /// Decoded pixel buffer handled by this backend.
    type Image;

    /// Confirms decode and encode work before any real work begins.
    fn probe(&self) -> AtlasResult<()>;

    /// Decodes the file at `path`. The file handle is released on return.
    fn decode(&self, path: &Path) -> AtlasResult<Self::Image>;

    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    /// Resamples to exactly `size` x `size`.
    fn resample(&self, image: Self::Image, size: u32) -> Self::Image;

    /// Allocates a fully transparent square canvas.
    fn blank(&self, size: u32) -> Self::Image;

    /// Overwrites the canvas region at `offset` with `tile` (no blending).
    fn composite(&self, canvas: &mut Self::Image, tile: &Self::Image, offset: (u32, u32));

    /// Encodes the canvas in the format implied by `path` without touching disk.
    fn encode(&self, canvas: &Self::Image, path: &Path) -> AtlasResult<Vec<u8>>;
}

/// [`ImageBackend`] backed by the `image` crate with RGBA8 buffers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RasterBackend {
    type Image = RgbaImage;

    fn probe(&self) -> AtlasResult<()> {
        let sample = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 255, 255]));
        let mut bytes = Vec::new();
        sample
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .map_err(|e| AtlasError::Dependency(format!("PNG encoding failed: {}", e)))?;

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|e| AtlasError::Dependency(format!("PNG decoding failed: {}", e)))?
            .into_rgba8();

        if decoded.get_pixel(0, 0) != sample.get_pixel(0, 0) {
            return Err(AtlasError::Dependency(
                "PNG round trip altered pixel data".to_string(),
            ));
        }
        Ok(())
    }

    fn decode(&self, path: &Path) -> AtlasResult<RgbaImage> {
        let load_error = |reason: String| AtlasError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let reader = image::io::Reader::open(path)
            .map_err(|e| load_error(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| load_error(e.to_string()))?;
        let decoded = reader.decode().map_err(|e| load_error(e.to_string()))?;

        Ok(decoded.into_rgba8())
    }

    fn dimensions(&self, image: &RgbaImage) -> (u32, u32) {
        image.dimensions()
    }

    fn resample(&self, image: RgbaImage, size: u32) -> RgbaImage {
        imageops::resize(&image, size, size, FilterType::Lanczos3)
    }

    fn blank(&self, size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba(CLEAR_PIXEL))
    }

    fn composite(&self, canvas: &mut RgbaImage, tile: &RgbaImage, offset: (u32, u32)) {
        imageops::replace(canvas, tile, i64::from(offset.0), i64::from(offset.1));
    }

    fn encode(&self, canvas: &RgbaImage, path: &Path) -> AtlasResult<Vec<u8>> {
        let encode_error = |reason: String| AtlasError::Encode {
            path: path.to_path_buf(),
            reason,
        };

        let format = ImageFormat::from_path(path).map_err(|e| encode_error(e.to_string()))?;
        let mut bytes = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::from(format))
            .map_err(|e| encode_error(e.to_string()))?;

        Ok(bytes)
    }
}
