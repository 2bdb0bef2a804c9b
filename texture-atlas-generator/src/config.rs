/// Atlas grid geometry shared by every pipeline stage.
use crate::error::{AtlasError, AtlasResult};
use constants::texture::{DEFAULT_ATLAS_SIZE, DEFAULT_TILE_SIZE, MAX_ATLAS_SIZE};
use serde::{Deserialize, Serialize};

/// Bytes per RGBA8 pixel of the atlas canvas.
const BYTES_PER_PIXEL: u64 = 4;

/// Configuration parameters for atlas generation.
/// Only constructible through [`AtlasConfig::new`], deserialization included,
/// so the derived grid values always agree with the two sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AtlasSizes")]
pub struct AtlasConfig {
    tile_size: u32,
    atlas_size: u32,
    tiles_per_row: u32,
    capacity: u32,
}

/// Serialized sizes; derived fields in the input are ignored and recomputed.
#[derive(Deserialize)]
struct AtlasSizes {
    tile_size: u32,
    atlas_size: u32,
}

impl TryFrom<AtlasSizes> for AtlasConfig {
    type Error = AtlasError;

    fn try_from(sizes: AtlasSizes) -> AtlasResult<Self> {
        AtlasConfig::new(sizes.tile_size, sizes.atlas_size)
    }
}

impl AtlasConfig {
    /// Validates sizes and derives the grid layout.
    pub fn new(tile_size: u32, atlas_size: u32) -> AtlasResult<Self> {
        if tile_size == 0 {
            return Err(AtlasError::Config(
                "tile size must be a positive integer".to_string(),
            ));
        }
        if atlas_size == 0 {
            return Err(AtlasError::Config(
                "atlas size must be a positive integer".to_string(),
            ));
        }
        if tile_size > atlas_size {
            return Err(AtlasError::Config(format!(
                "tile size {} does not fit in atlas size {}",
                tile_size, atlas_size
            )));
        }
        if atlas_size > MAX_ATLAS_SIZE || canvas_bytes(atlas_size).is_none() {
            return Err(AtlasError::Config(format!(
                "atlas size {} exceeds the maximum of {}",
                atlas_size, MAX_ATLAS_SIZE
            )));
        }

        let tiles_per_row = atlas_size / tile_size;
        let capacity = tiles_per_row.checked_mul(tiles_per_row).ok_or_else(|| {
            AtlasError::Config(format!(
                "grid of {0}x{0} tiles exceeds the supported tile count",
                tiles_per_row
            ))
        })?;

        Ok(Self {
            tile_size,
            atlas_size,
            tiles_per_row,
            capacity,
        })
    }

    /// Edge length of one tile in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Edge length of the square atlas in pixels.
    pub fn atlas_size(&self) -> u32 {
        self.atlas_size
    }

    /// Tiles along one atlas edge (integer division, remainder is unused).
    pub fn tiles_per_row(&self) -> u32 {
        self.tiles_per_row
    }

    /// Maximum tiles the grid can hold.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Pixels along each edge that no tile will ever cover.
    pub fn unused_margin(&self) -> u32 {
        self.atlas_size - self.tiles_per_row * self.tile_size
    }
}

/// RGBA8 canvas size in bytes, if it is addressable on this platform.
fn canvas_bytes(atlas_size: u32) -> Option<usize> {
    let edge = u64::from(atlas_size);
    let bytes = edge.checked_mul(edge)?.checked_mul(BYTES_PER_PIXEL)?;
    usize::try_from(bytes)
        .ok()
        .filter(|&bytes| bytes <= isize::MAX as usize)
}

impl Default for AtlasConfig {
    fn default() -> Self {
        let tiles_per_row = DEFAULT_ATLAS_SIZE / DEFAULT_TILE_SIZE;
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            atlas_size: DEFAULT_ATLAS_SIZE,
            tiles_per_row,
            capacity: tiles_per_row * tiles_per_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_grid() {
        let config = AtlasConfig::new(16, 32).unwrap();
        assert_eq!(config.tiles_per_row(), 2);
        assert_eq!(config.capacity(), 4);
        assert_eq!(config.unused_margin(), 0);
    }

    #[test]
    fn test_default_matches_constructor() {
        let config = AtlasConfig::default();
        assert_eq!(config, AtlasConfig::new(16, 4096).unwrap());
        assert_eq!(config.tiles_per_row(), 256);
        assert_eq!(config.capacity(), 65_536);
    }

    #[test]
    fn test_non_multiple_truncates() {
        let config = AtlasConfig::new(16, 40).unwrap();
        assert_eq!(config.tiles_per_row(), 2);
        assert_eq!(config.capacity(), 4);
        assert_eq!(config.unused_margin(), 8);
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(matches!(AtlasConfig::new(0, 64), Err(AtlasError::Config(_))));
        assert!(matches!(AtlasConfig::new(16, 0), Err(AtlasError::Config(_))));
        assert!(matches!(AtlasConfig::new(64, 32), Err(AtlasError::Config(_))));
    }

    #[test]
    fn test_rejects_oversized_atlas() {
        assert!(matches!(
            AtlasConfig::new(65_536, u32::MAX),
            Err(AtlasError::Config(_))
        ));
        assert!(matches!(
            AtlasConfig::new(16, MAX_ATLAS_SIZE + 1),
            Err(AtlasError::Config(_))
        ));
        let largest = AtlasConfig::new(16, MAX_ATLAS_SIZE).unwrap();
        assert_eq!(largest.tiles_per_row(), MAX_ATLAS_SIZE / 16);
    }

    #[test]
    fn test_single_tile_atlas() {
        let config = AtlasConfig::new(32, 32).unwrap();
        assert_eq!(config.capacity(), 1);
    }

    #[test]
    fn test_deserialize_recomputes_grid() {
        let config: AtlasConfig = serde_json::from_str(
            r#"{"tile_size": 16, "atlas_size": 32, "tiles_per_row": 0, "capacity": 4}"#,
        )
        .unwrap();
        assert_eq!(config, AtlasConfig::new(16, 32).unwrap());
        assert_eq!(config.tiles_per_row(), 2);
    }

    #[test]
    fn test_deserialize_rejects_invalid_sizes() {
        let result = serde_json::from_str::<AtlasConfig>(r#"{"tile_size": 0, "atlas_size": 32}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_includes_derived_grid() {
        let json = serde_json::to_value(AtlasConfig::new(16, 64).unwrap()).unwrap();
        assert_eq!(json["tiles_per_row"], 4);
        assert_eq!(json["capacity"], 16);
    }
}
