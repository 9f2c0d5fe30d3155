//! Tagged failures of the viewer.
//!
//! Startup and loading stages return [`ViewerError`] so the application can
//! tell a missing mount point from a broken asset. Application boundaries
//! (`run`, `main`) still speak `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// The DOM element the canvas should be attached to does not exist.
    #[error("couldn't find a container with id #{0}")]
    MountPointMissing(String),

    /// A required constructor field was not provided.
    #[error("missing required configuration: {0}")]
    Configuration(&'static str),

    #[error("failed to load asset {path}: {source}")]
    AssetLoad {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to decode environment map {path}: {source}")]
    EnvironmentDecode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to parse model {path}: {source}")]
    ModelParse {
        path: String,
        #[source]
        source: gltf::Error,
    },

    #[error("unsupported asset content in {path}: {reason}")]
    UnsupportedAsset { path: String, reason: String },

    #[error(transparent)]
    ColorParse(#[from] ColorParseError),

    #[error("gpu setup failed: {0}")]
    Gpu(String),
}

/// Returned when a CSS-like color string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color value {0:?}")]
pub struct ColorParseError(pub String);
