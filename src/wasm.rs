use crate::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::{ClusterConfig, extract_palette_bytes};
use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

/// Extract a palette from an uploaded image.
///
/// Returns `{ palette, rgb, image }` where `palette` holds `RRGGBB` strings,
/// `rgb` holds `[r, g, b]` arrays in the same order and `image` is the
/// PNG-encoded swatch strip (500×100 unless overridden).
#[wasm_bindgen]
pub fn extract_palette(
    input: Vec<u8>,
    n_colors: usize,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<Object, JsValue> {
    let output = extract_palette_bytes(
        &input,
        n_colors,
        width.unwrap_or(DEFAULT_WIDTH),
        height.unwrap_or(DEFAULT_HEIGHT),
        &ClusterConfig::default(),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let palette_js = Array::new();
    let rgb_js = Array::new();
    for swatch in &output.swatches {
        palette_js.push(&JsValue::from_str(&swatch.hex()));
        let triple = Array::new();
        for channel in [swatch.r, swatch.g, swatch.b] {
            triple.push(&JsValue::from(channel));
        }
        rgb_js.push(&triple);
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;
    Reflect::set(&result, &JsValue::from_str("rgb"), &rgb_js)?;
    Reflect::set(
        &result,
        &JsValue::from_str("image"),
        &Uint8Array::from(output.png.as_slice()),
    )?;

    Ok(result)
}
