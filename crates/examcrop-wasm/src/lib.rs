//! Examcrop WASM - WebAssembly bindings for the exam page crop editor
//!
//! This crate exposes the examcrop-core editing session to a browser host.
//!
//! # Module Structure
//!
//! - `editor` - The interactive crop editor session (`JsCropEditor`)
//! - `host` - JS callback and pointer-capture bridge
//! - `types` - WASM-compatible wrapper types for page rasters
//! - `crop` - Full-resolution crop extraction from a page raster
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor } from '@examcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsCropEditor(pages, { startPage: 0 }, pageElement, callbacks);
//! container.addEventListener('wheel', (e) => {
//!   if (editor.wheel(e.deltaY, e.ctrlKey || e.metaKey, e.timeStamp)) e.preventDefault();
//! }, { passive: false });
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod editor;
mod host;
mod types;

// Re-export public types
pub use crop::crop_question;
pub use editor::JsCropEditor;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
