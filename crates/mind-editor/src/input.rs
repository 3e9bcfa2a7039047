//! Input abstraction layer.
//!
//! Normalizes window-system events into a unified `InputEvent` enum consumed
//! by the controller. Pointer positions are window pixels.

/// Mouse button that produced a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: select, drag, sliders, filename label.
    Primary,
    /// Right button: pan.
    Secondary,
    Middle,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl, or ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f32,
        y: f32,
        button: PointerButton,
    },

    PointerMove { x: f32, y: f32 },

    PointerUp {
        x: f32,
        y: f32,
        button: PointerButton,
    },

    /// Mouse wheel. Only the sign of `delta` matters: positive zooms in.
    Wheel { x: f32, y: f32, delta: f32 },

    /// Key press. `key` follows `KeyboardEvent.key` naming (`"n"`,
    /// `"Backspace"`, `"Enter"`).
    Key { key: String, modifiers: Modifiers },

    /// Modifier state changed without a key press of interest.
    ModifiersChanged(Modifiers),

    /// Committed text from the platform text-input system.
    Text(String),

    /// Window resized.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}
