//! Page descriptors.

use serde::{Deserialize, Serialize};

use crate::geometry::RasterSize;

/// One rasterized document page, as produced by the document parser.
///
/// Immutable once produced. A session navigates by position in its page
/// sequence; `page_index` is the page number in the source document and may
/// skip values when pages were filtered upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number in the source document (0-based).
    pub page_index: u32,
    /// Raster reference the host can decode (URL, object URL or data URL).
    pub source: String,
    /// Intrinsic raster width in pixels.
    pub width: u32,
    /// Intrinsic raster height in pixels.
    pub height: u32,
}

impl Page {
    pub fn new(page_index: u32, source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            page_index,
            source: source.into(),
            width,
            height,
        }
    }

    pub fn raster_size(&self) -> RasterSize {
        RasterSize::new(self.width, self.height)
    }
}
