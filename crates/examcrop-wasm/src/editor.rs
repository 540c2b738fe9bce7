//! WASM bindings for the crop editor session.
//!
//! `JsCropEditor` wraps one core `Session`. The host forwards DOM events
//! (pointer, keyboard, wheel, resize, scroll, image load) and repaints from
//! `take_frame()` in its animation frame callback.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsCropEditor(pages, { startPage: 0 }, pageElement, {
//!   onConfirm: (page, rect) => addQuestion(page, rect),
//!   onClose: () => closeModal(),
//!   onScroll: (left, top) => container.scrollTo(left, top),
//! });
//! pageElement.addEventListener('pointerdown', (e) => {
//!   const r = pageElement.getBoundingClientRect();
//!   editor.pointer_down(e.pointerId, e.clientX, e.clientY, r.left, r.top, r.width, r.height);
//! });
//! ```

use examcrop_core::{
    DevicePoint, EditSeed, EditorConfig, EditorError, ElementBounds, KeyModifiers,
    NormalizedRect, Page, Session, SessionMode, Tool,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::host::{HostCallbacks, JsHost};

/// An existing crop to reopen, as passed from JS.
#[derive(Debug, Clone, Copy, Deserialize)]
struct EditTarget {
    page: usize,
    rect: NormalizedRect,
}

/// Constructor options. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SessionOptions {
    start_page: usize,
    edit: Option<EditTarget>,
    config: EditorConfig,
}

impl SessionOptions {
    fn mode(&self) -> SessionMode {
        match self.edit {
            Some(target) => SessionMode::Edit(EditSeed {
                page: target.page,
                rect: target.rect,
            }),
            None => SessionMode::Add {
                start_page: self.start_page,
            },
        }
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Interactive crop editor over a rasterized document.
#[wasm_bindgen]
pub struct JsCropEditor {
    session: Session<JsHost>,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Open the editor.
    ///
    /// # Arguments
    ///
    /// * `pages` - Array of `{ page_index, source, width, height }`
    /// * `options` - `{ startPage?, edit?: { page, rect }, config? }` or undefined
    /// * `surface` - Element that receives pointer capture during gestures
    /// * `callbacks` - `{ onConfirm?, onClose?, onSelectionChange?, onToolChange?,
    ///   onZoomChange?, onScroll? }`
    #[wasm_bindgen(constructor)]
    pub fn new(
        pages: JsValue,
        options: JsValue,
        surface: Option<Element>,
        callbacks: JsValue,
    ) -> Result<JsCropEditor, JsValue> {
        let pages: Vec<Page> = serde_wasm_bindgen::from_value(pages)
            .map_err(|e| JsValue::from_str(&format!("Invalid pages: {}", e)))?;
        let options: SessionOptions = if options.is_undefined() || options.is_null() {
            SessionOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
        };
        let host = JsHost::new(surface, HostCallbacks::from_object(&callbacks));
        JsCropEditor::open(pages, options, host).map_err(to_js_error)
    }

    /// Replace the element that receives pointer capture.
    pub fn set_capture_surface(&mut self, surface: Option<Element>) {
        self.session.host_mut().set_surface(surface);
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// `pointerdown` on the page element. Bounds come from `getBoundingClientRect()`.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        pointer_id: i32,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        self.session.pointer_down(
            pointer_id,
            DevicePoint::new(client_x, client_y),
            ElementBounds::new(left, top, width, height),
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_move(
        &mut self,
        pointer_id: i32,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        self.session.pointer_move(
            pointer_id,
            DevicePoint::new(client_x, client_y),
            ElementBounds::new(left, top, width, height),
        );
    }

    pub fn pointer_up(&mut self, pointer_id: i32) {
        self.session.pointer_up(pointer_id);
    }

    /// `pointercancel` ends the gesture like a release.
    pub fn pointer_cancel(&mut self, pointer_id: i32) {
        self.session.pointer_up(pointer_id);
    }

    /// CSS cursor for a hover position.
    pub fn cursor(
        &self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> String {
        self.session
            .cursor(
                DevicePoint::new(client_x, client_y),
                ElementBounds::new(left, top, width, height),
            )
            .to_string()
    }

    // =========================================================================
    // Keyboard and wheel
    // =========================================================================

    /// Global `keydown`. Returns `true` when the host should `preventDefault()`.
    pub fn key_down(
        &mut self,
        key: &str,
        ctrl: bool,
        meta: bool,
        alt: bool,
        text_input_focused: bool,
        now_ms: f64,
    ) -> bool {
        let modifiers = KeyModifiers { ctrl, meta, alt };
        self.session.key_down(key, modifiers, text_input_focused, now_ms)
    }

    /// `wheel` on the scroll container. Returns `true` when the host should
    /// `preventDefault()`. Register the listener with `passive: false`.
    pub fn wheel(&mut self, delta_y: f64, zoom_modifier: bool, now_ms: f64) -> bool {
        self.session.wheel(delta_y, zoom_modifier, now_ms)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn resize_container(&mut self, width: f64, height: f64) {
        self.session.resize_container(width, height);
    }

    pub fn scroll_changed(&mut self, left: f64, top: f64) {
        self.session.scroll_changed(left, top);
    }

    /// The image for the page at `index` finished loading.
    pub fn page_loaded(&mut self, index: usize) {
        self.session.page_loaded(index);
    }

    /// CSS pixels per raster pixel. Size the page element as
    /// `width * display_scale` by `height * display_scale`.
    pub fn display_scale(&self) -> f64 {
        self.session.viewport().scale()
    }

    /// Layers to repaint plus overlay geometry, as a plain object.
    pub fn take_frame(&mut self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.take_frame()).map_err(to_js_error)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Jump to a page; out-of-range indices are clamped.
    pub fn go_to_page(&mut self, index: i32) {
        self.session.go_to_page(index.max(0) as usize);
    }

    pub fn next_page(&mut self) {
        self.session.next_page();
    }

    pub fn previous_page(&mut self) {
        self.session.previous_page();
    }

    #[wasm_bindgen(getter)]
    pub fn current_page(&self) -> usize {
        self.session.current_page()
    }

    #[wasm_bindgen(getter)]
    pub fn page_count(&self) -> usize {
        self.session.page_count()
    }

    // =========================================================================
    // Toolbar
    // =========================================================================

    /// Select a tool by name (`"select"` or `"pan"`). Returns `false` for
    /// unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match Tool::parse(name) {
            Some(tool) => {
                self.session.set_tool(tool);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        self.session.tool().as_str().to_string()
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.session.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.session.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.session.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.session.reset_zoom();
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.session.zoom()
    }

    // =========================================================================
    // Selection, commit and close
    // =========================================================================

    #[wasm_bindgen(getter)]
    pub fn has_selection(&self) -> bool {
        self.session.selection().is_some()
    }

    /// Current selection as `{ xmin, ymin, xmax, ymax }`, or `null`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        match self.session.selection() {
            Some(rect) => serde_wasm_bindgen::to_value(&rect).map_err(to_js_error),
            None => Ok(JsValue::NULL),
        }
    }

    /// Commit the selection (toolbar confirm button).
    pub fn confirm(&mut self, now_ms: f64) -> bool {
        self.session.confirm_selection(now_ms)
    }

    pub fn close(&mut self) {
        self.session.close();
    }

    #[wasm_bindgen(getter)]
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    /// Expire the notification. Call from a timer or animation frame.
    pub fn tick(&mut self, now_ms: f64) {
        self.session.tick(now_ms);
    }

    /// Visible notification text, if any.
    pub fn notification(&self) -> Option<String> {
        self.session.notification().map(|n| n.message.clone())
    }
}

impl JsCropEditor {
    fn open(
        pages: Vec<Page>,
        options: SessionOptions,
        host: JsHost,
    ) -> Result<JsCropEditor, EditorError> {
        let mode = options.mode();
        let session = Session::new(pages, mode, options.config, host)?;
        Ok(JsCropEditor { session })
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct TestPage {
        page_index: u32,
        source: &'static str,
        width: u32,
        height: u32,
    }

    fn js_pages(count: u32) -> JsValue {
        let pages: Vec<TestPage> = (0..count)
            .map(|i| TestPage {
                page_index: i,
                source: "blob:test",
                width: 1000,
                height: 1400,
            })
            .collect();
        serde_wasm_bindgen::to_value(&pages).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_constructor_with_defaults() {
        let ed = JsCropEditor::new(js_pages(3), JsValue::UNDEFINED, None, JsValue::UNDEFINED)
            .unwrap();
        assert_eq!(ed.page_count(), 3);
        assert_eq!(ed.current_page(), 0);
        assert_eq!(ed.tool(), "select");
    }

    #[wasm_bindgen_test]
    fn test_constructor_partial_config() {
        let options = js_sys::JSON::parse(r#"{"startPage": 9, "config": {"zoom_step": 2.0}}"#)
            .unwrap();
        let mut ed = JsCropEditor::new(js_pages(3), options, None, JsValue::UNDEFINED).unwrap();
        assert_eq!(ed.current_page(), 2);
        ed.zoom_in();
        assert_eq!(ed.zoom(), 2.0);
    }

    #[wasm_bindgen_test]
    fn test_selection_is_null_without_selection() {
        let ed = JsCropEditor::new(js_pages(1), JsValue::UNDEFINED, None, JsValue::UNDEFINED)
            .unwrap();
        let selection = ed.selection().unwrap();
        assert!(selection.is_null());
        assert!(!selection.is_undefined());
    }

    #[wasm_bindgen_test]
    fn test_constructor_rejects_empty_pages() {
        let result = JsCropEditor::new(js_pages(0), JsValue::UNDEFINED, None, JsValue::UNDEFINED);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_constructor_rejects_invalid_pages() {
        let result = JsCropEditor::new(
            JsValue::from_str("not pages"),
            JsValue::UNDEFINED,
            None,
            JsValue::UNDEFINED,
        );
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_edit_mode_selection_round_trips() {
        let options = js_sys::JSON::parse(concat!(
            r#"{"edit": {"page": 1, "#,
            r#""rect": {"xmin": 100, "ymin": 100, "xmax": 400, "ymax": 300}}}"#
        ))
        .unwrap();
        let ed = JsCropEditor::new(js_pages(2), options, None, JsValue::UNDEFINED).unwrap();
        let rect: Option<NormalizedRect> =
            serde_wasm_bindgen::from_value(ed.selection().unwrap()).unwrap();
        assert_eq!(rect, Some(NormalizedRect::new(100.0, 100.0, 400.0, 300.0)));
    }
}
