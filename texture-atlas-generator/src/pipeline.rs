/// Atlas generation pipeline orchestrating discovery, packing and output.
use crate::compositor::AtlasCompositor;
use crate::config::AtlasConfig;
use crate::discovery::discover_tiles;
use crate::error::{AtlasError, AtlasResult};
use crate::imaging::{ImageBackend, RasterBackend};
use crate::metadata::{AtlasManifest, manifest_path, metadata_path, render_metadata};
use crate::planner::plan_placements;
use crate::report::PipelineReport;
use constants::texture::DEFAULT_TILE_EXTENSIONS;
use std::fs;
use std::path::{Path, PathBuf};

/// One atlas build request.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Directory scanned (non-recursively) for tiles.
    pub input_dir: PathBuf,
    /// Atlas image destination; sidecar files are derived from it.
    pub output_file: PathBuf,
    pub config: AtlasConfig,
    /// Recognised tile extensions.
    pub extensions: Vec<String>,
    /// Also write the JSON manifest.
    pub write_manifest: bool,
}

impl PipelineRequest {
    /// Request with the default extension allow-list and no manifest.
    pub fn new(input_dir: &Path, output_file: &Path, config: AtlasConfig) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_file: output_file.to_path_buf(),
            config,
            extensions: DEFAULT_TILE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            write_manifest: false,
        }
    }
}

/// Runs the pipeline with the `image`-crate backend.
pub fn run_pipeline(request: &PipelineRequest) -> AtlasResult<PipelineReport> {
    AtlasPipeline::new(RasterBackend::new()).run(request)
}

/// Atlas generator driving every stage over one image backend.
pub struct AtlasPipeline<B: ImageBackend> {
    backend: B,
}

impl<B: ImageBackend> AtlasPipeline<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Builds the atlas and its sidecar files.
    /// Nothing is written unless every tile was painted and every artifact encoded.
    pub fn run(&self, request: &PipelineRequest) -> AtlasResult<PipelineReport> {
        self.backend.probe()?;

        if request.extensions.is_empty() {
            return Err(AtlasError::Config(
                "at least one tile extension is required".to_string(),
            ));
        }

        let config = &request.config;
        log::info!("Generating texture atlas...");
        log::info!("  Input directory: {}", request.input_dir.display());
        log::info!("  Output file: {}", request.output_file.display());
        log::info!("  Tile size: {0}x{0}", config.tile_size());
        log::info!("  Atlas size: {0}x{0}", config.atlas_size());

        let tiles = discover_tiles(&request.input_dir, &request.extensions)?;
        log::info!("Found {} texture files", tiles.len());

        let plan = plan_placements(tiles, config)?;
        for warning in &plan.warnings {
            log::warn!("{}", warning);
        }

        let atlas = AtlasCompositor::new(&self.backend, *config).compose(&plan.placements)?;

        let atlas_bytes = self.backend.encode(&atlas.canvas, &request.output_file)?;
        drop(atlas);

        let metadata_file = metadata_path(&request.output_file);
        let mut artifacts = vec![
            (request.output_file.clone(), atlas_bytes),
            (
                metadata_file.clone(),
                render_metadata(config, &plan.placements).into_bytes(),
            ),
        ];

        let manifest_file = if request.write_manifest {
            let path = manifest_path(&request.output_file);
            let json = AtlasManifest::new(&request.output_file, config, &plan.placements)
                .to_json(&path)?;
            artifacts.push((path.clone(), json.into_bytes()));
            Some(path)
        } else {
            None
        };

        persist_artifacts(&artifacts)?;
        log::info!("Atlas saved: {}", request.output_file.display());
        log::info!("Metadata saved: {}", metadata_file.display());
        if let Some(path) = &manifest_file {
            log::info!("Manifest saved: {}", path.display());
        }

        Ok(PipelineReport {
            atlas_path: request.output_file.clone(),
            metadata_path: metadata_file,
            manifest_path: manifest_file,
            placed: plan.placements.len(),
            discovered: plan.discovered,
            warnings: plan.warnings,
        })
    }
}

/// Writes every artifact to a sibling temp file, then renames all into place.
/// On failure, this call's files are removed and any previous output is restored.
fn persist_artifacts(artifacts: &[(PathBuf, Vec<u8>)]) -> AtlasResult<()> {
    for (path, _) in artifacts {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AtlasError::io(parent, e))?;
        }
    }

    let mut staged: Vec<StagedArtifact> = artifacts
        .iter()
        .map(|(path, _)| StagedArtifact::new(path))
        .collect();

    for (artifact, (_, bytes)) in staged.iter().zip(artifacts) {
        if let Err(e) = fs::write(&artifact.temp, bytes) {
            discard(staged.iter().map(|a| a.temp.as_path()));
            return Err(AtlasError::io(&artifact.temp, e));
        }
    }

    if let Some(err) = staged.iter_mut().find_map(|a| a.commit().err()) {
        for artifact in &staged {
            artifact.roll_back();
        }
        return Err(err);
    }

    discard(
        staged
            .iter()
            .filter(|a| a.backed_up)
            .map(|a| a.backup.as_path()),
    );
    Ok(())
}

/// One artifact on its way from a temp file to its final path.
struct StagedArtifact<'a> {
    target: &'a Path,
    temp: PathBuf,
    /// Where a previous file at `target` is kept until the run succeeds.
    backup: PathBuf,
    backed_up: bool,
    committed: bool,
}

impl<'a> StagedArtifact<'a> {
    fn new(target: &'a Path) -> Self {
        Self {
            target,
            temp: sibling_path(target, "partial"),
            backup: sibling_path(target, "previous"),
            backed_up: false,
            committed: false,
        }
    }

    /// Moves any previous file aside, then renames the temp file into place.
    fn commit(&mut self) -> AtlasResult<()> {
        if self.target.is_file() {
            fs::rename(self.target, &self.backup).map_err(|e| AtlasError::io(self.target, e))?;
            self.backed_up = true;
        }
        fs::rename(&self.temp, self.target).map_err(|e| AtlasError::io(self.target, e))?;
        self.committed = true;
        Ok(())
    }

    /// Removes whatever this run wrote and puts the previous file back.
    fn roll_back(&self) {
        if self.committed {
            discard(std::iter::once(self.target));
        } else {
            discard(std::iter::once(self.temp.as_path()));
        }
        if self.backed_up {
            if let Err(e) = fs::rename(&self.backup, self.target) {
                log::warn!(
                    "Could not restore {} from {}: {}",
                    self.target.display(),
                    self.backup.display(),
                    e
                );
            }
        }
    }
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{}.{}", file_name, suffix))
}

fn discard<'p>(paths: impl Iterator<Item = &'p Path>) {
    for path in paths {
        if path.exists() {
            if let Err(e) = fs::remove_file(path) {
                log::warn!("Could not remove {}: {}", path.display(), e);
            }
        }
    }
}
