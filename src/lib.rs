//! Dominant color palette extraction.
//!
//! The pipeline runs in three stages:
//! 1. [`loader::load`] decodes the image and caps its resolution.
//! 2. [`cluster::extract`] runs K-Means (fixed seed) over the pixels.
//! 3. [`render::render`] lays the colors out as swatch bands and
//!    [`report::format`] lists them as numbered RGB triples.
//!
//! [`extract_palette_bytes`] chains all of them for one-shot callers;
//! [`Session`] keeps the intermediate results for step-by-step front ends.

pub mod cluster;
pub mod error;
pub mod loader;
pub mod render;
pub mod report;
pub mod session;
mod wasm;

pub use cluster::{ClusterConfig, Palette, extract, extract_with};
pub use error::{PaletteError, Result};
pub use loader::load;
pub use render::{band_spans, encode_png, render};
pub use report::Swatch;
pub use session::Session;
pub use wasm::extract_palette;

/// Result of the one-shot pipeline.
#[derive(Debug, Clone)]
pub struct PaletteOutput {
    pub swatches: Vec<Swatch>,
    /// PNG-encoded palette image.
    pub png: Vec<u8>,
}

/// Decode `input`, extract `n_colors` colors and render a `width`×`height`
/// palette image.
pub fn extract_palette_bytes(
    input: &[u8],
    n_colors: usize,
    width: u32,
    height: u32,
    config: &ClusterConfig,
) -> Result<PaletteOutput> {
    let img = loader::load(input)?;
    let palette = cluster::extract_with(&img, n_colors, config)?;
    let png = render::encode_png(&render::render(&palette, width, height)?)?;
    Ok(PaletteOutput {
        swatches: report::format(&palette),
        png,
    })
}
