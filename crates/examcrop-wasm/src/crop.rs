//! WASM bindings for raster crop extraction.

use crate::types::JsRaster;
use examcrop_core::{crop_raster, EditorError, NormalizedRect};
use wasm_bindgen::prelude::*;

/// Cut a committed selection out of a page raster at full resolution.
///
/// Edges are in the editor's 0–1000 normalized space and are clamped and
/// ordered before use.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const ctx = canvas.getContext('2d')!;
/// const data = ctx.getImageData(0, 0, canvas.width, canvas.height).data;
/// const page = new JsRaster(canvas.width, canvas.height, new Uint8Array(data.buffer));
/// const question = crop_question(page, rect.xmin, rect.ymin, rect.xmax, rect.ymax);
/// ```
#[wasm_bindgen]
pub fn crop_question(
    raster: &JsRaster,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> Result<JsRaster, JsValue> {
    crop_edges(raster, xmin, ymin, xmax, ymax).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn crop_edges(
    raster: &JsRaster,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> Result<JsRaster, EditorError> {
    let image = raster.to_image()?;
    let rect = NormalizedRect::new(xmin, ymin, xmax, ymax);
    Ok(JsRaster::from_image(crop_raster(&image, &rect)))
}
