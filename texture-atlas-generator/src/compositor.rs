/// Atlas canvas painting.
use crate::config::AtlasConfig;
use crate::error::AtlasResult;
use crate::imaging::ImageBackend;
use crate::loader::TileLoader;
use crate::planner::PlacedTile;
use constants::texture::{PROGRESS_CHARS, PROGRESS_TEMPLATE};
use indicatif::{ProgressBar, ProgressStyle};

/// Fully painted atlas canvas, not yet persisted.
pub struct Atlas<I> {
    pub canvas: I,
    /// Tiles painted into the canvas.
    pub painted: usize,
}

/// Paints planned tiles into a transparent canvas.
pub struct AtlasCompositor<'a, B: ImageBackend> {
    backend: &'a B,
    config: AtlasConfig,
}

impl<'a, B: ImageBackend> AtlasCompositor<'a, B> {
    pub fn new(backend: &'a B, config: AtlasConfig) -> Self {
        Self { backend, config }
    }

    /// Loads and paints every placement in index order.
    /// The first tile that fails to load aborts the whole atlas.
    pub fn compose(&self, placements: &[PlacedTile]) -> AtlasResult<Atlas<B::Image>> {
        let loader = TileLoader::new(self.backend, self.config.tile_size());
        let mut canvas = self.backend.blank(self.config.atlas_size());

        let pb = ProgressBar::new(placements.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars(PROGRESS_CHARS),
        );
        pb.set_message("Painting tiles");

        for placed in placements {
            let tile = match loader.load(&placed.source) {
                Ok(tile) => tile,
                Err(e) => {
                    pb.abandon_with_message("Tile load failed");
                    return Err(e);
                }
            };

            let (x, y) = placed.cell.pixel_offset;
            self.backend.composite(&mut canvas, &tile, (x, y));

            pb.suspend(|| {
                log::info!(
                    "  [{}/{}] {} -> ({}, {})",
                    placed.cell.index + 1,
                    placements.len(),
                    placed.source.file_name(),
                    x,
                    y
                );
            });
            pb.inc(1);
        }

        pb.finish_with_message("Tiles painted");

        Ok(Atlas {
            canvas,
            painted: placements.len(),
        })
    }
}
