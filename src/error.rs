use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the layout and rendering pipeline.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Input rejected before any canvas is allocated or file written.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to decode background image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to build archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PlaylistError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        PlaylistError::Validation(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PlaylistError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by caller input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, PlaylistError::Validation(_))
    }
}

pub type Result<T, E = PlaylistError> = std::result::Result<T, E>;
