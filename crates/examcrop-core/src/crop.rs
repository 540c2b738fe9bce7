//! Raster crop extraction.
//!
//! Turns a committed [`NormalizedRect`] into a pixel region of the page
//! raster and copies that region out at full resolution. Encoding the result
//! is left to the host.
//!
//! Normalized edges are scaled by `dimension / 1000` and rounded to the
//! nearest pixel. The region is clamped to the raster and is never smaller
//! than 1x1.

pub use image::RgbaImage;

use crate::error::EditorError;
use crate::geometry::{NormalizedRect, RasterSize, NORMALIZED_MAX};

/// Integer pixel region of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropBox {
    /// Pixel region covered by `rect` on a raster of `size`.
    ///
    /// Returns `None` for an empty raster.
    pub fn from_normalized(rect: &NormalizedRect, size: RasterSize) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        let rect = NormalizedRect::new(rect.xmin, rect.ymin, rect.xmax, rect.ymax);
        let (x, width) = span(rect.xmin, rect.xmax, size.width);
        let (y, height) = span(rect.ymin, rect.ymax, size.height);
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }
}

/// Rounded `[start, end)` pixel span along one axis, at least one pixel wide.
fn span(min: f64, max: f64, extent: u32) -> (u32, u32) {
    let scale = extent as f64 / NORMALIZED_MAX;
    let start = ((min * scale).round() as u32).min(extent.saturating_sub(1));
    let end = ((max * scale).round() as u32).min(extent);
    (start, end.saturating_sub(start).max(1))
}

/// Wrap a tightly packed RGBA8 buffer.
pub fn rgba_image(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbaImage, EditorError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(EditorError::RasterSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    RgbaImage::from_raw(width, height, pixels).ok_or(EditorError::RasterSizeMismatch {
        expected,
        actual: expected,
    })
}

/// Copy the region under `rect` out of `image`.
///
/// An empty input image is returned as is.
pub fn crop_raster(image: &RgbaImage, rect: &NormalizedRect) -> RgbaImage {
    let size = RasterSize::new(image.width(), image.height());
    match CropBox::from_normalized(rect, size) {
        Some(region) => {
            image::imageops::crop_imm(image, region.x, region.y, region.width, region.height)
                .to_image()
        }
        None => image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Each pixel encodes its own position.
    fn test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        })
    }

    #[test]
    fn test_full_page_crop() {
        let img = test_image(40, 30);
        let out = crop_raster(&img, &NormalizedRect::full_page());
        assert_eq!(out.dimensions(), (40, 30));
        assert_eq!(out, img);
    }

    #[test]
    fn test_crop_box_scales_per_axis() {
        let rect = NormalizedRect::new(100.0, 250.0, 500.0, 750.0);
        let region = CropBox::from_normalized(&rect, RasterSize::new(2000, 2800)).unwrap();
        assert_eq!(
            region,
            CropBox {
                x: 200,
                y: 700,
                width: 800,
                height: 1400
            }
        );
    }

    #[test]
    fn test_crop_box_rounds_to_nearest() {
        // 333/1000 * 10 = 3.33 -> 3; 667/1000 * 10 = 6.67 -> 7
        let rect = NormalizedRect::new(333.0, 333.0, 667.0, 667.0);
        let region = CropBox::from_normalized(&rect, RasterSize::new(10, 10)).unwrap();
        assert_eq!((region.x, region.width), (3, 4));
    }

    #[test]
    fn test_crop_box_minimum_one_pixel() {
        let rect = NormalizedRect::new(1000.0, 1000.0, 1000.0, 1000.0);
        let region = CropBox::from_normalized(&rect, RasterSize::new(50, 50)).unwrap();
        assert_eq!(region.x, 49);
        assert_eq!(region.width, 1);
        assert_eq!(region.height, 1);
    }

    #[test]
    fn test_crop_box_empty_raster() {
        let rect = NormalizedRect::full_page();
        assert!(CropBox::from_normalized(&rect, RasterSize::new(0, 10)).is_none());
        let empty = RgbaImage::new(0, 0);
        assert_eq!(crop_raster(&empty, &rect).dimensions(), (0, 0));
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(100, 100);
        let rect = NormalizedRect::new(100.0, 200.0, 300.0, 400.0);
        let out = crop_raster(&img, &rect);
        assert_eq!(out.dimensions(), (20, 20));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(10, 20));
        assert_eq!(out.get_pixel(19, 19), img.get_pixel(29, 39));
    }

    #[test]
    fn test_rgba_image_validates_length() {
        assert!(rgba_image(2, 2, vec![0; 16]).is_ok());
        assert_eq!(
            rgba_image(2, 2, vec![0; 12]),
            Err(EditorError::RasterSizeMismatch {
                expected: 16,
                actual: 12
            })
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=300, 1u32..=300)
    }

    fn rect_strategy() -> impl Strategy<Value = NormalizedRect> {
        (0.0..=1000.0f64, 0.0..=1000.0f64, 0.0..=1000.0f64, 0.0..=1000.0f64)
            .prop_map(|(a, b, c, d)| NormalizedRect::new(a, b, c, d))
    }

    proptest! {
        /// The region always lies inside the raster and is at least 1x1.
        #[test]
        fn prop_crop_box_within_raster(
            (w, h) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let region = CropBox::from_normalized(&rect, RasterSize::new(w, h)).unwrap();
            prop_assert!(region.width >= 1 && region.height >= 1);
            prop_assert!(region.x + region.width <= w);
            prop_assert!(region.y + region.height <= h);
        }

        /// Cropped pixels come from the matching source position.
        #[test]
        fn prop_cropped_pixels_from_source(
            (w, h) in (1u32..=60, 1u32..=60),
            rect in rect_strategy(),
        ) {
            let img = RgbaImage::from_fn(w, h, |x, y| {
                image::Rgba([x as u8, y as u8, 0, 255])
            });
            let region = CropBox::from_normalized(&rect, RasterSize::new(w, h)).unwrap();
            let out = crop_raster(&img, &rect);
            prop_assert_eq!(out.dimensions(), (region.width, region.height));
            for (x, y, px) in out.enumerate_pixels() {
                prop_assert_eq!(px, img.get_pixel(region.x + x, region.y + y));
            }
        }

        /// A wider rect never yields a narrower region.
        #[test]
        fn prop_crop_box_monotonic(
            w in 1u32..=500,
            a in 0.0..=500.0f64,
            b in 500.0..=1000.0f64,
            grow in 0.0..=500.0f64,
        ) {
            let size = RasterSize::new(w, w);
            let inner = NormalizedRect::new(a, a, b, b);
            let outer =
                NormalizedRect::new((a - grow).max(0.0), 0.0, (b + grow).min(1000.0), 1000.0);
            let inner_box = CropBox::from_normalized(&inner, size).unwrap();
            let outer_box = CropBox::from_normalized(&outer, size).unwrap();
            prop_assert!(outer_box.width >= inner_box.width);
        }
    }
}
