//! Image decoding with a resolution guard.
//!
//! Decoded images are normalized to 8-bit RGB and, when larger than a Full HD
//! frame, scaled down uniformly so clustering cost stays bounded.

use crate::error::{PaletteError, Result};
use image::{RgbImage, imageops::FilterType};
use log::{debug, warn};

/// Channel samples allowed per image (a 1920×1080 RGB frame).
pub const MAX_PIXEL_BUDGET: u64 = 1920 * 1080 * 3;

const CHANNELS: u64 = 3;

/// Decode `bytes` into an RGB pixel grid, downscaling it if it exceeds
/// [`MAX_PIXEL_BUDGET`].
pub fn load(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(PaletteError::Decode)?;
    let rgb = img.to_rgb8();
    debug!("decoded {}x{} image", rgb.width(), rgb.height());
    Ok(fit_to_budget(rgb))
}

/// Apply the resolution guard to an already decoded image.
pub fn fit_to_budget(img: RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    match budget_dimensions(w, h) {
        Some((new_w, new_h)) => {
            warn!("image too large ({w}x{h}), resizing to {new_w}x{new_h}");
            image::imageops::resize(&img, new_w, new_h, FilterType::Triangle)
        }
        None => img,
    }
}

/// Target dimensions for a `width`×`height` image, or `None` when it already
/// fits the budget.
///
/// Both sides are scaled by `sqrt(budget / (width * height))` and rounded to
/// the nearest integer. If rounding up pushes the result over the budget the
/// dimensions are floored instead.
pub fn budget_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    let pixels = width as u64 * height as u64;
    if pixels * CHANNELS <= MAX_PIXEL_BUDGET {
        return None;
    }

    let max_pixels = MAX_PIXEL_BUDGET / CHANNELS;
    let scale = (max_pixels as f64 / pixels as f64).sqrt();
    let scaled_w = width as f64 * scale;
    let scaled_h = height as f64 * scale;

    let mut new_w = scaled_w.round().max(1.0) as u32;
    let mut new_h = scaled_h.round().max(1.0) as u32;
    if new_w as u64 * new_h as u64 > max_pixels {
        new_w = scaled_w.floor().max(1.0) as u32;
        new_h = scaled_h.floor().max(1.0) as u32;
    }

    // Extreme aspect ratios: a side clamped up to 1 can still overflow.
    if new_w as u64 * new_h as u64 > max_pixels {
        if new_w >= new_h {
            new_w = (max_pixels / new_h as u64) as u32;
        } else {
            new_h = (max_pixels / new_w as u64) as u32;
        }
    }

    Some((new_w, new_h))
}
