//! WASM-compatible wrapper types for page rasters.

use examcrop_core::{rgba_image, EditorError, RgbaImage};
use wasm_bindgen::prelude::*;

/// A decoded page raster for JavaScript.
///
/// Pixels are tightly packed RGBA8 in row-major order, the layout of
/// `ImageData.data`, so a canvas read can be handed over without repacking.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions and RGBA pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGBA pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRaster {
    /// Validate the buffer and convert to an image.
    pub(crate) fn to_image(&self) -> Result<RgbaImage, EditorError> {
        rgba_image(self.width, self.height, self.pixels.clone())
    }

    pub(crate) fn from_image(image: RgbaImage) -> JsRaster {
        let (width, height) = image.dimensions();
        JsRaster {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_round_trip() {
        let pixels: Vec<u8> = (0..2 * 3 * 4).map(|i| i as u8).collect();
        let raster = JsRaster::new(2, 3, pixels.clone());
        assert_eq!(raster.byte_length(), 24);

        let image = raster.to_image().unwrap();
        assert_eq!(image.dimensions(), (2, 3));

        let back = JsRaster::from_image(image);
        assert_eq!(back.width(), 2);
        assert_eq!(back.height(), 3);
        assert_eq!(back.pixels(), pixels);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let raster = JsRaster::new(4, 4, vec![0; 10]);
        assert_eq!(
            raster.to_image(),
            Err(EditorError::RasterSizeMismatch {
                expected: 64,
                actual: 10
            })
        );
    }
}
