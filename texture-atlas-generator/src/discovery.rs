/// Source tile discovery for atlas generation.
use crate::error::{AtlasError, AtlasResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Tile file discovered during directory scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTile {
    /// Full path to the tile image.
    pub path: PathBuf,
    /// Identifier derived from the filename without extension.
    pub name: String,
}

impl SourceTile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }

    /// Filename used for progress output.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Scans `input_dir` (non-recursively) for files with one of `extensions`.
/// The result is sorted by raw filename bytes, which fixes every tile's index.
pub fn discover_tiles(input_dir: &Path, extensions: &[String]) -> AtlasResult<Vec<SourceTile>> {
    if !input_dir.is_dir() {
        return Err(AtlasError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut tiles = Vec::new();
    let entries = fs::read_dir(input_dir).map_err(|e| AtlasError::io(input_dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| AtlasError::io(input_dir, e))?;
        let path = entry.path();

        if path.is_file() && has_recognized_extension(&path, extensions) {
            tiles.push(SourceTile::from_path(path));
        }
    }

    tiles.sort_by(|a, b| {
        let a_name = a.path.file_name().unwrap_or_default();
        let b_name = b.path.file_name().unwrap_or_default();
        a_name.as_encoded_bytes().cmp(b_name.as_encoded_bytes())
    });

    if tiles.is_empty() {
        return Err(AtlasError::NoTiles {
            dir: input_dir.to_path_buf(),
            extensions: extensions.to_vec(),
        });
    }

    log::debug!("Tile processing order:");
    for (i, tile) in tiles.iter().enumerate() {
        log::debug!("  {}: {}", i, tile.name);
    }

    Ok(tiles)
}

/// Extension match is ASCII case-insensitive; a leading dot in the allow-list is ignored.
fn has_recognized_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(extension) = path.extension() else {
        return false;
    };
    let extension = extension.to_string_lossy();

    extensions
        .iter()
        .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&extension))
}
