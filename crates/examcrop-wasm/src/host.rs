//! Browser implementation of the editor host.
//!
//! Callbacks are plain JS functions read from an options object; any of them
//! may be missing. A throwing callback is reported on the console and never
//! propagates into the session.

use examcrop_core::{CaptureError, EditorHost, NormalizedRect, PointerCapture, ScrollPosition, Tool};
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// JS callbacks, by the property name they are read from.
#[derive(Default)]
pub(crate) struct HostCallbacks {
    on_confirm: Option<Function>,
    on_close: Option<Function>,
    on_selection_change: Option<Function>,
    on_tool_change: Option<Function>,
    on_zoom_change: Option<Function>,
    on_scroll: Option<Function>,
}

impl HostCallbacks {
    /// Read callbacks from a JS object. Non-function properties are ignored.
    pub(crate) fn from_object(object: &JsValue) -> HostCallbacks {
        if object.is_undefined() || object.is_null() {
            return HostCallbacks::default();
        }
        let get = |name: &str| -> Option<Function> {
            Reflect::get(object, &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.dyn_into::<Function>().ok())
        };
        HostCallbacks {
            on_confirm: get("onConfirm"),
            on_close: get("onClose"),
            on_selection_change: get("onSelectionChange"),
            on_tool_change: get("onToolChange"),
            on_zoom_change: get("onZoomChange"),
            on_scroll: get("onScroll"),
        }
    }
}

/// Host backed by JS callbacks and a DOM capture surface.
pub(crate) struct JsHost {
    surface: Option<Element>,
    callbacks: HostCallbacks,
}

impl JsHost {
    pub(crate) fn new(surface: Option<Element>, callbacks: HostCallbacks) -> JsHost {
        JsHost { surface, callbacks }
    }

    /// Host without a capture surface or callbacks.
    #[cfg(test)]
    pub(crate) fn detached() -> JsHost {
        JsHost::new(None, HostCallbacks::default())
    }

    pub(crate) fn set_surface(&mut self, surface: Option<Element>) {
        self.surface = surface;
    }
}

/// Call `callback` with lazily built arguments.
fn invoke<F>(callback: &Option<Function>, name: &str, args: F)
where
    F: FnOnce() -> Vec<JsValue>,
{
    let callback = match callback {
        Some(callback) => callback,
        None => return,
    };
    let args = args();
    let result = match args.as_slice() {
        [] => callback.call0(&JsValue::NULL),
        [a] => callback.call1(&JsValue::NULL, a),
        [a, b] => callback.call2(&JsValue::NULL, a, b),
        [a, b, c, ..] => callback.call3(&JsValue::NULL, a, b, c),
    };
    if let Err(err) = result {
        web_sys::console::error_2(&JsValue::from_str(&format!("{name} callback failed")), &err);
    }
}

fn platform_error(err: JsValue) -> CaptureError {
    CaptureError::Platform(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl PointerCapture for JsHost {
    fn capture_pointer(&mut self, pointer_id: i32) -> Result<(), CaptureError> {
        let surface = self
            .surface
            .as_ref()
            .ok_or(CaptureError::InvalidPointer(pointer_id))?;
        surface.set_pointer_capture(pointer_id).map_err(platform_error)
    }

    fn release_pointer(&mut self, pointer_id: i32) -> Result<(), CaptureError> {
        let surface = self
            .surface
            .as_ref()
            .ok_or(CaptureError::InvalidPointer(pointer_id))?;
        if !surface.has_pointer_capture(pointer_id) {
            return Err(CaptureError::InvalidPointer(pointer_id));
        }
        surface.release_pointer_capture(pointer_id).map_err(platform_error)
    }
}

impl EditorHost for JsHost {
    fn on_confirm(&mut self, page: usize, rect: NormalizedRect) {
        invoke(&self.callbacks.on_confirm, "onConfirm", || {
            let rect = serde_wasm_bindgen::to_value(&rect).unwrap_or(JsValue::NULL);
            vec![JsValue::from_f64(page as f64), rect]
        });
    }

    fn on_close(&mut self) {
        invoke(&self.callbacks.on_close, "onClose", Vec::new);
    }

    fn on_selection_change(&mut self, has_selection: bool) {
        invoke(&self.callbacks.on_selection_change, "onSelectionChange", || {
            vec![JsValue::from_bool(has_selection)]
        });
    }

    fn on_tool_change(&mut self, tool: Tool) {
        invoke(&self.callbacks.on_tool_change, "onToolChange", || {
            vec![JsValue::from_str(tool.as_str())]
        });
    }

    fn on_zoom_change(&mut self, zoom: f64) {
        invoke(&self.callbacks.on_zoom_change, "onZoomChange", || {
            vec![JsValue::from_f64(zoom)]
        });
    }

    fn apply_scroll(&mut self, position: ScrollPosition) {
        invoke(&self.callbacks.on_scroll, "onScroll", || {
            vec![JsValue::from_f64(position.left), JsValue::from_f64(position.top)]
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_host_swallows_everything() {
        let mut host = JsHost::detached();
        assert_eq!(host.capture_pointer(3), Err(CaptureError::InvalidPointer(3)));
        assert_eq!(host.release_pointer(3), Err(CaptureError::InvalidPointer(3)));

        // No callbacks registered: nothing is built or called.
        host.on_confirm(0, NormalizedRect::full_page());
        host.on_close();
        host.on_selection_change(true);
        host.on_zoom_change(2.0);
        host.apply_scroll(ScrollPosition::default());
    }
}
