/// Deterministic row-major grid placement.
use crate::config::AtlasConfig;
use crate::discovery::SourceTile;
use crate::error::{AtlasError, AtlasResult};
use crate::report::PipelineWarning;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid cell assigned to a tile index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub index: u32,
    pub row: u32,
    pub col: u32,
    /// Top-left pixel of the cell in the atlas.
    pub pixel_offset: (u32, u32),
    /// Normalised UV origin (top-left corner).
    pub uv: (f64, f64),
}

impl GridCell {
    /// Pure function of the index and grid geometry.
    pub fn for_index(index: u32, config: &AtlasConfig) -> Self {
        let row = index / config.tiles_per_row();
        let col = index % config.tiles_per_row();
        let tiles_per_row = f64::from(config.tiles_per_row());

        Self {
            index,
            row,
            col,
            pixel_offset: (col * config.tile_size(), row * config.tile_size()),
            uv: (f64::from(col) / tiles_per_row, f64::from(row) / tiles_per_row),
        }
    }

    /// UV bounds of the cell for GPU sampling.
    pub fn region(&self, config: &AtlasConfig) -> AtlasRegion {
        AtlasRegion::from_grid_cell(self, config)
    }
}

/// UV coordinate bounds for atlas tile access in normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasRegion {
    /// Minimum UV coordinates (top-left corner).
    pub uv_min: [f64; 2],
    /// Maximum UV coordinates (bottom-right corner).
    pub uv_max: [f64; 2],
}

impl AtlasRegion {
    pub fn from_grid_cell(cell: &GridCell, config: &AtlasConfig) -> Self {
        let step = 1.0 / f64::from(config.tiles_per_row());
        let (u_min, v_min) = cell.uv;

        Self {
            uv_min: [u_min, v_min],
            uv_max: [u_min + step, v_min + step],
        }
    }
}

/// Source tile bound to its grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTile {
    pub source: SourceTile,
    pub cell: GridCell,
}

impl PlacedTile {
    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }
}

/// Placement result for one atlas build.
#[derive(Debug, Clone)]
pub struct PlacementPlan {
    /// Placed tiles in index order.
    pub placements: Vec<PlacedTile>,
    /// Tiles found before truncation.
    pub discovered: usize,
    pub warnings: Vec<PipelineWarning>,
}

/// Assigns sorted tiles to grid cells in row-major order.
/// Tiles beyond capacity are dropped with a warning, never placed.
pub fn plan_placements(tiles: Vec<SourceTile>, config: &AtlasConfig) -> AtlasResult<PlacementPlan> {
    if tiles.is_empty() {
        return Err(AtlasError::NothingToPack);
    }

    let discovered = tiles.len();
    let capacity = config.capacity() as usize;
    let mut warnings = Vec::new();

    let margin = config.unused_margin();
    if margin > 0 {
        warnings.push(PipelineWarning::UnusedMargin {
            atlas_size: config.atlas_size(),
            tile_size: config.tile_size(),
            margin,
        });
    }

    let mut tiles = tiles;
    if discovered > capacity {
        let dropped = tiles.split_off(capacity);
        warnings.push(PipelineWarning::CapacityExceeded {
            discovered,
            capacity,
            dropped: dropped.into_iter().map(|tile| tile.name).collect(),
        });
    }

    // Capacity fits in u32, so every index does too.
    let placements = tiles
        .into_iter()
        .zip(0u32..)
        .map(|(source, index)| PlacedTile {
            source,
            cell: GridCell::for_index(index, config),
        })
        .collect();

    Ok(PlacementPlan {
        placements,
        discovered,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn tiles(names: &[&str]) -> Vec<SourceTile> {
        names
            .iter()
            .map(|n| SourceTile::from_path(PathBuf::from(format!("{}.png", n))))
            .collect()
    }

    #[test]
    fn test_three_tiles_in_two_by_two_grid() {
        let config = AtlasConfig::new(16, 32).unwrap();
        let plan = plan_placements(tiles(&["a", "b", "c"]), &config).unwrap();

        let cells: Vec<_> = plan
            .placements
            .iter()
            .map(|p| (p.name().to_string(), p.cell.index, p.cell.pixel_offset, p.cell.uv))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("a".to_string(), 0, (0, 0), (0.0, 0.0)),
                ("b".to_string(), 1, (16, 0), (0.5, 0.0)),
                ("c".to_string(), 2, (0, 16), (0.0, 0.5)),
            ]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_capacity_truncation() {
        let config = AtlasConfig::new(16, 32).unwrap();
        let plan = plan_placements(tiles(&["a", "b", "c", "d", "e", "f"]), &config).unwrap();

        let names: Vec<_> = plan.placements.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(plan.discovered, 6);
        assert_eq!(
            plan.warnings,
            vec![PipelineWarning::CapacityExceeded {
                discovered: 6,
                capacity: 4,
                dropped: vec!["e".to_string(), "f".to_string()],
            }]
        );
    }

    #[test]
    fn test_index_bijection_and_uv_range() {
        let config = AtlasConfig::new(16, 128).unwrap();
        let names: Vec<String> = (0..70).map(|i| format!("tile_{:03}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let plan = plan_placements(tiles(&names), &config).unwrap();

        assert_eq!(plan.placements.len(), 64);
        let mut seen_indices = HashSet::new();
        let mut seen_offsets = HashSet::new();
        for placed in &plan.placements {
            let cell = placed.cell;
            assert_eq!(cell.row * config.tiles_per_row() + cell.col, cell.index);
            assert!(cell.index < config.capacity());
            assert!(seen_indices.insert(cell.index));
            assert!(seen_offsets.insert(cell.pixel_offset));
            assert!((0.0..1.0).contains(&cell.uv.0));
            assert!((0.0..1.0).contains(&cell.uv.1));
        }
    }

    #[test]
    fn test_margin_warning_for_non_multiple() {
        let config = AtlasConfig::new(16, 40).unwrap();
        let plan = plan_placements(tiles(&["a"]), &config).unwrap();
        assert_eq!(
            plan.warnings,
            vec![PipelineWarning::UnusedMargin {
                atlas_size: 40,
                tile_size: 16,
                margin: 8,
            }]
        );
    }

    #[test]
    fn test_region_spans_one_cell() {
        let config = AtlasConfig::new(16, 64).unwrap();
        let region = GridCell::for_index(5, &config).region(&config);
        assert_eq!(region.uv_min, [0.25, 0.25]);
        assert_eq!(region.uv_max, [0.5, 0.5]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let config = AtlasConfig::default();
        assert!(matches!(
            plan_placements(Vec::new(), &config),
            Err(AtlasError::NothingToPack)
        ));
    }
}
