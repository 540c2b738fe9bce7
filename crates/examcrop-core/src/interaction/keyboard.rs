//! Global keyboard shortcuts.

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl KeyModifiers {
    fn any(self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// An editor action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleTool,
    SelectTool,
    PanTool,
    PreviousPage,
    NextPage,
    Close,
    Confirm,
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

/// Map a `KeyboardEvent.key` value to an editor command.
///
/// Nothing is mapped while a text input has focus or while a browser
/// modifier is held, so typing and native shortcuts keep working.
pub fn key_command(
    key: &str,
    modifiers: KeyModifiers,
    text_input_focused: bool,
) -> Option<KeyCommand> {
    if text_input_focused || modifiers.any() {
        return None;
    }

    let command = match key {
        " " => KeyCommand::ToggleTool,
        "v" | "V" => KeyCommand::SelectTool,
        "h" | "H" => KeyCommand::PanTool,
        "ArrowLeft" => KeyCommand::PreviousPage,
        "ArrowRight" => KeyCommand::NextPage,
        "Escape" => KeyCommand::Close,
        "Enter" => KeyCommand::Confirm,
        "+" | "=" => KeyCommand::ZoomIn,
        "-" | "_" => KeyCommand::ZoomOut,
        "0" => KeyCommand::ResetZoom,
        _ => return None,
    };
    Some(command)
}
