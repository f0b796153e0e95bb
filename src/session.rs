//! Caller-owned state for interactive front ends.
//!
//! A front end that lets the user load an image, extract a palette and save
//! it in separate steps keeps one `Session` per user. The pipeline functions
//! themselves stay stateless.

use crate::cluster::{self, ClusterConfig, Palette};
use crate::error::{PaletteError, Result};
use crate::report::{self, Swatch};
use crate::{loader, render};
use image::RgbImage;

#[derive(Debug, Default)]
pub struct Session {
    config: ClusterConfig,
    image: Option<RgbImage>,
    palette: Option<Palette>,
}

impl Session {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            image: None,
            palette: None,
        }
    }

    /// Decode and keep a new image. Any previous palette belonged to the old
    /// image and is discarded.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&RgbImage> {
        let img = loader::load(bytes)?;
        self.palette = None;
        Ok(&*self.image.insert(img))
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Cluster the current image into `k` colors. On failure the previous
    /// palette is kept.
    pub fn extract(&mut self, k: usize) -> Result<&Palette> {
        let img = self.image.as_ref().ok_or(PaletteError::NoImage)?;
        let palette = cluster::extract_with(img, k, &self.config)?;
        Ok(&*self.palette.insert(palette))
    }

    pub fn swatches(&self) -> Option<Vec<Swatch>> {
        self.palette.as_ref().map(report::format)
    }

    /// Render the current palette and encode it as PNG.
    pub fn render_png(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        let palette = self.palette.as_ref().ok_or(PaletteError::NoPalette)?;
        render::encode_png(&render::render(palette, width, height)?)
    }
}
