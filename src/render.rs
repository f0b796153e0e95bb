//! Palette swatch image composition.

use crate::cluster::Palette;
use crate::error::{PaletteError, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::ops::Range;

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 100;

/// Column ranges for `n` bands across `width` pixels.
///
/// Every band is `width / n` wide except the last, which also takes the
/// remainder. The ranges are contiguous and cover `0..width` exactly.
pub fn band_spans(n: usize, width: u32) -> Vec<Range<u32>> {
    if n == 0 {
        return Vec::new();
    }
    let step = width / n as u32;
    (0..n as u32)
        .map(|i| {
            let start = i * step;
            let end = if i + 1 == n as u32 { width } else { start + step };
            start..end
        })
        .collect()
}

/// Render `palette` as horizontal color bands in a `width`×`height` image.
///
/// Fails with `InvalidArgument` when the raster would not fit in memory
/// addressable on this target.
pub fn render(palette: &Palette, width: u32, height: u32) -> Result<RgbImage> {
    let bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .filter(|&n| n <= isize::MAX as usize);
    if bytes.is_none() {
        return Err(PaletteError::InvalidArgument(format!(
            "palette image {width}x{height} is too large"
        )));
    }

    let mut out = RgbImage::new(width, height);
    for (span, color) in band_spans(palette.len(), width).into_iter().zip(palette.iter()) {
        let pixel = Rgb([color.red, color.green, color.blue]);
        for x in span {
            for y in 0..height {
                out.put_pixel(x, y, pixel);
            }
        }
    }
    Ok(out)
}

/// Encode a rendered palette as PNG.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buf);
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(PaletteError::Encode)?;
    }
    Ok(buf)
}
