/// Outcome records returned by pipeline stages.
use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions noticed while building an atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// More tiles were discovered than the grid holds; the tail was dropped.
    CapacityExceeded {
        discovered: usize,
        capacity: usize,
        /// Identifiers of the dropped tiles in sorted order.
        dropped: Vec<String>,
    },
    /// The atlas edge is not a multiple of the tile edge.
    UnusedMargin {
        atlas_size: u32,
        tile_size: u32,
        margin: u32,
    },
}

impl PipelineWarning {
    /// Number of discovered tiles left out of the atlas.
    pub fn dropped_count(&self) -> usize {
        match self {
            PipelineWarning::CapacityExceeded { dropped, .. } => dropped.len(),
            PipelineWarning::UnusedMargin { .. } => 0,
        }
    }
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::CapacityExceeded {
                discovered,
                capacity,
                dropped,
            } => write!(
                f,
                "Too many textures ({}), maximum is {}; {} excess skipped",
                discovered,
                capacity,
                dropped.len()
            ),
            PipelineWarning::UnusedMargin {
                atlas_size,
                tile_size,
                margin,
            } => write!(
                f,
                "Atlas size {} is not a multiple of tile size {}; {}px margin left empty",
                atlas_size, tile_size, margin
            ),
        }
    }
}

/// Summary of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub atlas_path: PathBuf,
    pub metadata_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
    /// Tiles painted into the atlas.
    pub placed: usize,
    /// Tiles found in the input directory.
    pub discovered: usize,
    pub warnings: Vec<PipelineWarning>,
}

impl PipelineReport {
    /// Prints the run summary for the operator.
    pub fn print_summary(&self) {
        println!("Atlas Summary:");
        println!("  Tiles placed: {}/{}", self.placed, self.discovered);
        println!("  Atlas: {}", self.atlas_path.display());
        println!("  Metadata: {}", self.metadata_path.display());
        if let Some(manifest_path) = &self.manifest_path {
            println!("  Manifest: {}", manifest_path.display());
        }

        if !self.warnings.is_empty() {
            println!("  Warnings:");
            for warning in &self.warnings {
                println!("    {}", warning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_warning_reports_counts() {
        let warning = PipelineWarning::CapacityExceeded {
            discovered: 6,
            capacity: 4,
            dropped: vec!["e".to_string(), "f".to_string()],
        };
        assert_eq!(warning.dropped_count(), 2);
        assert_eq!(
            warning.to_string(),
            "Too many textures (6), maximum is 4; 2 excess skipped"
        );
    }

    #[test]
    fn test_margin_warning_drops_nothing() {
        let warning = PipelineWarning::UnusedMargin {
            atlas_size: 40,
            tile_size: 16,
            margin: 8,
        };
        assert_eq!(warning.dropped_count(), 0);
        assert!(warning.to_string().contains("8px"));
    }
}
