/// Error types for atlas generation operations.
use std::path::PathBuf;

pub type AtlasResult<T> = Result<T, AtlasError>;

/// Fatal conditions that abort an atlas build.
/// Every variant is converted to exit code 1 by the binary.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),
    #[error("No tiles with extension {} found in {}", .extensions.join("/"), .dir.display())]
    NoTiles {
        dir: PathBuf,
        extensions: Vec<String>,
    },
    #[error("No tiles to pack")]
    NothingToPack,
    #[error("Failed to load tile {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
    #[error("Image capability unavailable: {0}")]
    Dependency(String),
    #[error("Failed to encode {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AtlasError {
    /// True for the conditions where there was nothing to pack.
    pub fn is_no_input(&self) -> bool {
        matches!(
            self,
            AtlasError::InputDirMissing(_) | AtlasError::NoTiles { .. } | AtlasError::NothingToPack
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AtlasError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_classification() {
        assert!(AtlasError::InputDirMissing(PathBuf::from("missing")).is_no_input());
        assert!(
            AtlasError::NoTiles {
                dir: PathBuf::from("empty"),
                extensions: vec!["png".to_string()],
            }
            .is_no_input()
        );
        assert!(AtlasError::NothingToPack.is_no_input());
        assert!(!AtlasError::Config("tile size".to_string()).is_no_input());
    }

    #[test]
    fn test_load_message_names_path() {
        let err = AtlasError::Load {
            path: PathBuf::from("tiles/stone.png"),
            reason: "corrupt".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("tiles/stone.png"));
        assert!(message.contains("corrupt"));
    }
}
