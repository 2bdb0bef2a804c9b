/// Default edge length of a single source tile in pixels
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Default edge length of the generated atlas in pixels
pub const DEFAULT_ATLAS_SIZE: u32 = 4096;

/// Extensions picked up when scanning the input directory
pub const DEFAULT_TILE_EXTENSIONS: &[&str] = &["png"];

/// Canvas fill before any tile is painted (fully transparent)
pub const CLEAR_PIXEL: [u8; 4] = [0, 0, 0, 0];

/// Progress bar layout for the per-tile compositing pass
pub const PROGRESS_TEMPLATE: &str = "[{bar:40.green/blue}] {pos}/{len} tiles ({percent}%) {msg}";

/// Progress bar fill characters
pub const PROGRESS_CHARS: &str = "█▉▊▋▌▍▎▏";

/// Largest accepted atlas edge; 32768² RGBA8 is a 4 GiB canvas
pub const MAX_ATLAS_SIZE: u32 = 32_768;
