//! Error types for the worm counting pipeline.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong before or during a pipeline run.
///
/// Configuration errors (`UnknownColorMode`, `CustomBounds`, `InputNotFound`)
/// are fatal and reported before any image processing starts. Image decode and
/// encode failures are propagated from the underlying codec, not recovered.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input image path does not point to an existing file.
    #[error("path to input file is not valid: {0}")]
    InputNotFound(PathBuf),

    /// The requested color mode is not one of the recognized names.
    #[error("{0} is not a defined colormode. Available colormodes are GFP, mCherry and Custom")]
    UnknownColorMode(String),

    /// The custom-bounds file could not be parsed into two numeric triples.
    #[error("invalid custom bounds file: {0}")]
    CustomBounds(String),

    /// Failed to decode or encode an image.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to read a configuration file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
