//! Tool and interaction-mode enums.

use serde::{Deserialize, Serialize};

use crate::geometry::{DragOp, ResizeHandle};

/// The active tool selected in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Draw, move and resize selections.
    #[default]
    Select,
    /// Drag the viewport; selection targets are inert.
    Pan,
}

impl Tool {
    /// Parse a toolbar tool name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Tool::Select),
            "pan" => Some(Tool::Pan),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Pan => "pan",
        }
    }

    /// The other tool.
    pub fn toggled(self) -> Self {
        match self {
            Tool::Select => Tool::Pan,
            Tool::Pan => Tool::Select,
        }
    }
}

/// What the pointer is currently doing. Exactly one mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    None,
    Drawing,
    Moving,
    Panning,
    Resizing(ResizeHandle),
}

impl InteractionMode {
    /// The geometry operation driven by this mode, if any.
    pub fn drag_op(self) -> Option<DragOp> {
        match self {
            InteractionMode::Drawing => Some(DragOp::Drawing),
            InteractionMode::Moving => Some(DragOp::Moving),
            InteractionMode::Resizing(handle) => Some(DragOp::Resizing(handle)),
            InteractionMode::None | InteractionMode::Panning => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self == InteractionMode::None
    }

    /// Stable name, e.g. `"resizing-nw"`.
    pub fn name(self) -> &'static str {
        match self {
            InteractionMode::None => "none",
            InteractionMode::Drawing => "drawing",
            InteractionMode::Moving => "moving",
            InteractionMode::Panning => "panning",
            InteractionMode::Resizing(h) => match h {
                ResizeHandle::N => "resizing-n",
                ResizeHandle::S => "resizing-s",
                ResizeHandle::E => "resizing-e",
                ResizeHandle::W => "resizing-w",
                ResizeHandle::NW => "resizing-nw",
                ResizeHandle::NE => "resizing-ne",
                ResizeHandle::SW => "resizing-sw",
                ResizeHandle::SE => "resizing-se",
            },
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas (outside the selection).
    Background,
    /// Inside the selection body.
    Selection,
    /// On a resize handle.
    Handle(ResizeHandle),
}

impl HitTarget {
    /// CSS cursor to show while hovering this target with `tool`.
    pub fn cursor(self, tool: Tool) -> &'static str {
        match (tool, self) {
            (Tool::Pan, _) => "grab",
            (Tool::Select, HitTarget::Background) => "crosshair",
            (Tool::Select, HitTarget::Selection) => "move",
            (Tool::Select, HitTarget::Handle(h)) => h.cursor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_parse_round_trip() {
        for tool in [Tool::Select, Tool::Pan] {
            assert_eq!(Tool::parse(tool.as_str()), Some(tool));
        }
        assert_eq!(Tool::parse("lasso"), None);
    }

    #[test]
    fn test_tool_toggle() {
        assert_eq!(Tool::Select.toggled(), Tool::Pan);
        assert_eq!(Tool::Pan.toggled(), Tool::Select);
    }

    #[test]
    fn test_mode_drag_op() {
        assert_eq!(InteractionMode::Drawing.drag_op(), Some(DragOp::Drawing));
        assert_eq!(
            InteractionMode::Resizing(ResizeHandle::SW).drag_op(),
            Some(DragOp::Resizing(ResizeHandle::SW))
        );
        assert_eq!(InteractionMode::Panning.drag_op(), None);
        assert_eq!(InteractionMode::None.drag_op(), None);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(InteractionMode::None.name(), "none");
        assert_eq!(InteractionMode::Resizing(ResizeHandle::NE).name(), "resizing-ne");
        assert_eq!(InteractionMode::Panning.name(), "panning");
    }

    #[test]
    fn test_cursor() {
        assert_eq!(HitTarget::Selection.cursor(Tool::Pan), "grab");
        assert_eq!(HitTarget::Background.cursor(Tool::Select), "crosshair");
        assert_eq!(HitTarget::Selection.cursor(Tool::Select), "move");
        assert_eq!(
            HitTarget::Handle(ResizeHandle::N).cursor(Tool::Select),
            "ns-resize"
        );
    }
}
