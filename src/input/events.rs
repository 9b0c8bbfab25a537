//! Event types delivered to the draw engine by its host.

use super::modifiers::Modifiers;
use super::tool::Tool;
use crate::draw::{DrawingSurface, FillColor, NamedColor, StrokeWidth};
use crate::util::{Point, Viewport};

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Space bar
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used by keybinding strings (`"Backspace"`, `"t"`), or `None` for unknown keys.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Delete => Some("Delete".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Unknown => None,
        }
    }

    /// Parses a key name as written in scripts and configs.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }
        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "space" => Key::Space,
            _ => Key::Unknown,
        }
    }
}

/// Resize notification forwarded by the [`ResizeWatcher`](crate::resize::ResizeWatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub viewport: Viewport,
}

/// Everything the engine reacts to, in host arrival order.
///
/// Pointer positions are in device space; the engine maps them onto the
/// surface itself.
pub enum EngineEvent {
    /// Both surfaces were acquired
    SurfaceReady(DrawingSurface),
    /// A 2D rendering context could not be acquired
    SurfaceUnavailable(String),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerLeave(Point),
    Key { key: Key, modifiers: Modifiers },
    ChangeTool(Tool),
    ChangeStrokeColor(NamedColor),
    ChangeFillColor(FillColor),
    ChangeStrokeWidth(StrokeWidth),
    ToggleVisibility,
    Undo,
    Resize(Viewport),
}

impl EngineEvent {
    /// Short event name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::SurfaceReady(_) => "surface-ready",
            EngineEvent::SurfaceUnavailable(_) => "surface-unavailable",
            EngineEvent::PointerDown(_) => "pointer-down",
            EngineEvent::PointerMove(_) => "pointer-move",
            EngineEvent::PointerUp(_) => "pointer-up",
            EngineEvent::PointerLeave(_) => "pointer-leave",
            EngineEvent::Key { .. } => "key",
            EngineEvent::ChangeTool(_) => "change-tool",
            EngineEvent::ChangeStrokeColor(_) => "change-stroke-color",
            EngineEvent::ChangeFillColor(_) => "change-fill-color",
            EngineEvent::ChangeStrokeWidth(_) => "change-stroke-width",
            EngineEvent::ToggleVisibility => "toggle-visibility",
            EngineEvent::Undo => "undo",
            EngineEvent::Resize(_) => "resize",
        }
    }
}

impl From<ResizeEvent> for EngineEvent {
    fn from(event: ResizeEvent) -> Self {
        EngineEvent::Resize(event.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip_through_parser() {
        for key in [
            Key::Char('t'),
            Key::Escape,
            Key::Return,
            Key::Backspace,
            Key::Delete,
            Key::Space,
        ] {
            let name = key.binding_name().unwrap();
            assert_eq!(Key::from_name(&name), key);
        }
        assert_eq!(Key::from_name("enter"), Key::Return);
        assert_eq!(Key::from_name("F13"), Key::Unknown);
        assert!(Key::Unknown.binding_name().is_none());
    }
}
