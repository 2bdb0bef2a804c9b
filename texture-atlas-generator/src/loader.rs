/// Tile loading with size normalisation.
use crate::discovery::SourceTile;
use crate::error::AtlasResult;
use crate::imaging::ImageBackend;

/// Loads source tiles at exactly `tile_size` x `tile_size`.
pub struct TileLoader<'a, B: ImageBackend> {
    backend: &'a B,
    tile_size: u32,
}

impl<'a, B: ImageBackend> TileLoader<'a, B> {
    pub fn new(backend: &'a B, tile_size: u32) -> Self {
        Self { backend, tile_size }
    }

    /// Decodes the tile, resampling when its native size differs.
    /// A decode failure is returned as-is; callers treat it as fatal.
    pub fn load(&self, tile: &SourceTile) -> AtlasResult<B::Image> {
        let image = self.backend.decode(&tile.path)?;
        let (width, height) = self.backend.dimensions(&image);

        if (width, height) == (self.tile_size, self.tile_size) {
            return Ok(image);
        }

        log::debug!(
            "Resampling {} from {}x{} to {}x{}",
            tile.name,
            width,
            height,
            self.tile_size,
            self.tile_size
        );
        Ok(self.backend.resample(image, self.tile_size))
    }
}
