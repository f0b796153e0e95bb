//! Error type shared by every stage of the palette pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// The input bytes are not a recognized image.
    #[error("Unable to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Cluster count (or another caller-supplied value) is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The clustering step could not produce a full palette.
    #[error("Clustering failed: {0}")]
    Clustering(String),

    #[error("PNG encode error: {0}")]
    Encode(#[source] image::ImageError),

    #[error("No image loaded")]
    NoImage,

    #[error("No palette extracted")]
    NoPalette,
}

pub type Result<T> = std::result::Result<T, PaletteError>;
