//! Deterministic texture atlas packing for uniformly sized tiles

pub mod compositor;
pub mod config;
pub mod discovery;
pub mod error;
pub mod imaging;
pub mod loader;
pub mod metadata;
pub mod pipeline;
pub mod planner;
pub mod report;

pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult};
pub use pipeline::{AtlasPipeline, PipelineRequest, run_pipeline};
pub use report::{PipelineReport, PipelineWarning};
