/// Atlas metadata emission: plain-text UV records and the JSON manifest.
use crate::config::AtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::planner::{AtlasRegion, PlacedTile};
use constants::metadata::{MANIFEST_EXTENSION, METADATA_EXTENSION, METADATA_TITLE, UV_PRECISION};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Metadata file written next to the atlas image.
pub fn metadata_path(atlas_path: &Path) -> PathBuf {
    atlas_path.with_extension(METADATA_EXTENSION)
}

pub fn manifest_path(atlas_path: &Path) -> PathBuf {
    atlas_path.with_extension(MANIFEST_EXTENSION)
}

/// Renders the header and one `name,index,u,v` line per placement.
/// Line order is placement order, so downstream readers may rely on it.
pub fn render_metadata(config: &AtlasConfig, placements: &[PlacedTile]) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# {}", METADATA_TITLE);
    let _ = writeln!(out, "# Atlas size: {0}x{0}", config.atlas_size());
    let _ = writeln!(out, "# Tile size: {0}x{0}", config.tile_size());
    let _ = writeln!(out, "# Total textures: {}", placements.len());
    out.push('\n');

    for placed in placements {
        let (u, v) = placed.cell.uv;
        let _ = writeln!(
            out,
            "{},{},{:.prec$},{:.prec$}",
            placed.name(),
            placed.cell.index,
            u,
            v,
            prec = UV_PRECISION
        );
    }

    out
}

/// Per-tile manifest entry with grid and UV placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Original filename without extension for identification.
    pub name: String,
    pub index: u32,
    /// Grid coordinates as `[col, row]`.
    pub grid_position: [u32; 2],
    pub pixel_offset: [u32; 2],
    pub uv_min: [f64; 2],
    pub uv_max: [f64; 2],
}

/// Machine-readable companion to the plain-text metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasManifest {
    /// Atlas image filename relative to the manifest.
    pub atlas_file: String,
    pub atlas_config: AtlasConfig,
    pub tiles: Vec<ManifestEntry>,
}

impl AtlasManifest {
    pub fn new(atlas_path: &Path, config: &AtlasConfig, placements: &[PlacedTile]) -> Self {
        let tiles = placements
            .iter()
            .map(|placed| {
                let cell = placed.cell;
                let AtlasRegion { uv_min, uv_max } = cell.region(config);
                ManifestEntry {
                    name: placed.name().to_string(),
                    index: cell.index,
                    grid_position: [cell.col, cell.row],
                    pixel_offset: [cell.pixel_offset.0, cell.pixel_offset.1],
                    uv_min,
                    uv_max,
                }
            })
            .collect();

        Self {
            atlas_file: atlas_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            atlas_config: *config,
            tiles,
        }
    }

    pub fn to_json(&self, path: &Path) -> AtlasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AtlasError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
