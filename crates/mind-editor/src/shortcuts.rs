//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Every command
//! is a single key, optionally with the command modifier (Ctrl, or ⌘ on
//! macOS).

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Nodes ──
    NewNode,
    DeleteNode,
    /// Enter "set parent": the next clicked node becomes the selected
    /// node's parent (or stops being one).
    SetParentMode,
    ClearLinks,

    // ── Text ──
    ToggleTextEdit,
    /// Clear the selected node's text and start editing it.
    ClearText,
    Backspace,

    // ── Color ──
    RandomColor,
    CopyColor,
    PasteColor,

    // ── File ──
    Save,
    Load,

    // ── UI ──
    Cancel,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"n"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        _shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd {
            return match key {
                "n" | "N" => Some(ShortcutAction::NewNode),
                "Backspace" => Some(ShortcutAction::ClearText),
                "s" | "S" => Some(ShortcutAction::SetParentMode),
                "c" | "C" => Some(ShortcutAction::ClearLinks),
                "r" | "R" => Some(ShortcutAction::RandomColor),
                "a" | "A" => Some(ShortcutAction::CopyColor),
                "z" | "Z" => Some(ShortcutAction::PasteColor),
                "w" | "W" => Some(ShortcutAction::Save),
                "o" | "O" => Some(ShortcutAction::Load),
                "Enter" => Some(ShortcutAction::ToggleTextEdit),
                "Delete" => Some(ShortcutAction::DeleteNode),
                "Escape" => Some(ShortcutAction::Cancel),
                _ => None,
            };
        }

        match key {
            "Enter" => Some(ShortcutAction::ToggleTextEdit),
            "Backspace" => Some(ShortcutAction::Backspace),
            "Delete" => Some(ShortcutAction::DeleteNode),
            "Escape" => Some(ShortcutAction::Cancel),
            _ => None,
        }
    }
}
