/// Shared defaults for atlas generation
pub mod metadata;
pub mod texture;
