/// Extension given to the plain-text metadata written next to the atlas
pub const METADATA_EXTENSION: &str = "txt";

/// Extension given to the optional JSON manifest
pub const MANIFEST_EXTENSION: &str = "json";

/// First header line of the metadata file
pub const METADATA_TITLE: &str = "Fresh Voxel Engine Texture Atlas Metadata";

/// Decimal places used for UV coordinates in persisted metadata
pub const UV_PRECISION: usize = 6;
