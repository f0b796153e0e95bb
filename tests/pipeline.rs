//! End-to-end tests for the bytes-in, palette-out pipeline.

use image::{ImageFormat, Rgb, RgbImage};
use image_to_palette_wasm::{
    ClusterConfig, PaletteError, Swatch, band_spans, extract, extract_palette_bytes, load,
    report,
};
use std::io::Cursor;

fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// Four quadrants in distinct, well separated colors with mild noise.
fn quadrants() -> RgbImage {
    RgbImage::from_fn(40, 40, |x, y| {
        let jitter = ((x * 3 + y * 5) % 4) as u8;
        match (x < 20, y < 20) {
            (true, true) => Rgb([250 - jitter, jitter, jitter]),
            (false, true) => Rgb([jitter, 250 - jitter, jitter]),
            (true, false) => Rgb([jitter, jitter, 250 - jitter]),
            (false, false) => Rgb([250 - jitter, 250 - jitter, jitter]),
        }
    })
}

#[test]
fn test_two_by_two_red_blue() {
    let img = RgbImage::from_raw(2, 2, vec![255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255]).unwrap();
    let bytes = encode(&img, ImageFormat::Png);

    let output = extract_palette_bytes(&bytes, 2, 500, 100, &ClusterConfig::default()).unwrap();
    let mut triples: Vec<_> = output.swatches.iter().map(|s| (s.r, s.g, s.b)).collect();
    triples.sort();
    assert_eq!(triples, vec![(0, 0, 255), (255, 0, 0)]);

    let rendered = image::load_from_memory(&output.png).unwrap().to_rgb8();
    assert_eq!(rendered.dimensions(), (500, 100));
}

#[test]
fn test_quadrants_recover_four_colors() {
    let bytes = encode(&quadrants(), ImageFormat::Png);
    let img = load(&bytes).unwrap();
    let palette = extract(&img, 4).unwrap();
    assert_eq!(palette.len(), 4);

    let expected = [(248, 1, 1), (1, 248, 1), (1, 1, 248), (248, 248, 1)];
    for (r, g, b) in expected {
        assert!(
            palette.iter().any(|c| {
                (c.red as i32 - r).abs() <= 3
                    && (c.green as i32 - g).abs() <= 3
                    && (c.blue as i32 - b).abs() <= 3
            }),
            "no centroid near ({r}, {g}, {b}) in {palette:?}"
        );
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let bytes = encode(&quadrants(), ImageFormat::Png);
    let config = ClusterConfig::default();
    let first = extract_palette_bytes(&bytes, 3, 300, 50, &config).unwrap();
    let second = extract_palette_bytes(&bytes, 3, 300, 50, &config).unwrap();
    assert_eq!(first.swatches, second.swatches);
    assert_eq!(first.png, second.png);
}

#[test]
fn test_jpeg_input_is_accepted() {
    let bytes = encode(&quadrants(), ImageFormat::Jpeg);
    let img = load(&bytes).unwrap();
    assert_eq!(img.dimensions(), (40, 40));
    let swatches: Vec<Swatch> = report::format(&extract(&img, 2).unwrap());
    assert_eq!(swatches.len(), 2);
    assert_eq!(swatches[1].index, 2);
}

#[test]
fn test_rendered_bands_match_swatches() {
    let bytes = encode(&quadrants(), ImageFormat::Png);
    let output = extract_palette_bytes(&bytes, 3, 500, 20, &ClusterConfig::default()).unwrap();
    let rendered = image::load_from_memory(&output.png).unwrap().to_rgb8();

    for (span, swatch) in band_spans(3, 500).into_iter().zip(&output.swatches) {
        let want = Rgb([swatch.r, swatch.g, swatch.b]);
        assert_eq!(rendered.get_pixel(span.start, 0), &want);
        assert_eq!(rendered.get_pixel(span.end - 1, 19), &want);
    }
}

#[test]
fn test_invalid_inputs() {
    let garbage = extract_palette_bytes(b"\x89PNG but not really", 3, 500, 100, &ClusterConfig::default());
    assert!(matches!(garbage, Err(PaletteError::Decode(_))));

    let bytes = encode(&quadrants(), ImageFormat::Png);
    let zero = extract_palette_bytes(&bytes, 0, 500, 100, &ClusterConfig::default());
    assert!(matches!(zero, Err(PaletteError::InvalidArgument(_))));
}
