/// Texture atlas generator entry point
use clap::Parser;
use constants::texture::{DEFAULT_ATLAS_SIZE, DEFAULT_TILE_SIZE};
use std::path::PathBuf;
use std::process::ExitCode;
use texture_atlas_generator::{AtlasConfig, AtlasResult, PipelineReport, PipelineRequest, run_pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "texture-atlas-generator",
    version,
    about = "Pack equally sized texture tiles into a single atlas",
    after_help = "Example:\n  texture-atlas-generator textures/blocks textures/atlas.png"
)]
struct Cli {
    /// Directory containing the tile images
    input_dir: PathBuf,
    /// Atlas image to write; metadata goes next to it with a .txt extension
    output_file: PathBuf,
    /// Size of each tile in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,
    /// Size of the output atlas in pixels
    #[arg(long, default_value_t = DEFAULT_ATLAS_SIZE)]
    atlas_size: u32,
    /// Tile file extension to pick up (repeatable)
    #[arg(long = "extension", value_name = "EXT", default_value = "png")]
    extensions: Vec<String>,
    /// Also write a JSON manifest next to the atlas
    #[arg(long)]
    manifest: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match generate(cli) {
        Ok(report) => {
            report.print_summary();
            println!("\nTexture atlas generated successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("\nFailed to generate texture atlas.");
            ExitCode::FAILURE
        }
    }
}

fn generate(cli: Cli) -> AtlasResult<PipelineReport> {
    let config = AtlasConfig::new(cli.tile_size, cli.atlas_size)?;

    let mut request = PipelineRequest::new(&cli.input_dir, &cli.output_file, config);
    request.extensions = cli.extensions;
    request.write_manifest = cli.manifest;

    run_pipeline(&request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["texture-atlas-generator", "blocks", "atlas.png"]).unwrap();
        assert_eq!(cli.tile_size, 16);
        assert_eq!(cli.atlas_size, 4096);
        assert_eq!(cli.extensions, vec!["png".to_string()]);
        assert!(!cli.manifest);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "texture-atlas-generator",
            "blocks",
            "atlas.png",
            "--tile-size",
            "32",
            "--atlas-size",
            "1024",
            "--extension",
            "png",
            "--extension",
            "tga",
            "--manifest",
        ])
        .unwrap();
        assert_eq!(cli.tile_size, 32);
        assert_eq!(cli.atlas_size, 1024);
        assert_eq!(cli.extensions, vec!["png".to_string(), "tga".to_string()]);
        assert!(cli.manifest);
    }

    #[test]
    fn test_missing_positionals_rejected() {
        let err = Cli::try_parse_from(["texture-atlas-generator", "blocks"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_invalid_sizes_are_config_errors() {
        let cli = Cli::try_parse_from([
            "texture-atlas-generator",
            "blocks",
            "atlas.png",
            "--tile-size",
            "0",
        ])
        .unwrap();
        assert!(matches!(
            generate(cli),
            Err(texture_atlas_generator::AtlasError::Config(_))
        ));
    }
}
