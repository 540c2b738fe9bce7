//! Examcrop Core - Interactive crop-region editor
//!
//! This crate provides the platform-independent engine behind the exam page
//! crop editor: normalized selection geometry, the pointer interaction state
//! machine, keyboard and wheel navigation, viewport fit/zoom/scroll state,
//! render-layer invalidation and raster crop extraction.
//!
//! Hosts drive a [`Session`] with input events and receive callbacks through
//! [`EditorHost`]. All selection coordinates live in a 0–1000 normalized
//! space that is independent of the raster resolution.

pub mod config;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod session;
pub mod viewport;

pub use config::EditorConfig;
pub use crop::{crop_raster, rgba_image, CropBox, RgbaImage};
pub use error::{CaptureError, EditorError};
pub use geometry::{
    DevicePoint, ElementBounds, NormalizedPoint, NormalizedRect, RasterSize, ResizeHandle,
    MIN_SPAN, NORMALIZED_MAX,
};
pub use interaction::{InteractionMode, KeyModifiers, PointerCapture, Tool};
pub use render::{Frame, OverlayGeometry};
pub use session::{EditSeed, EditorHost, Notification, Page, Session, SessionMode};
pub use viewport::{ScrollPosition, ViewportController};

/// Library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
