//! Interaction controller.
//!
//! Translates input events into [`Action`]s against the current map. The
//! controller never mutates the map itself: it reads the map to hit-test and
//! to find the selection, and the session applies what comes back.
//!
//! ## Modes
//!
//! The modes are independent flags and compose freely:
//!
//! | Flag | Entered by | Left by |
//! |------|-----------|---------|
//! | panning | secondary press | secondary release |
//! | dragging | primary press on a node | primary release |
//! | setting parent | Ctrl+S | next node click, Escape |
//! | editing text | Enter, Ctrl+Backspace | Enter, click on empty space, Escape |
//! | editing filename | click on the filename label | Enter (when not editing text), Escape |
//! | adjusting slider | primary press on the slider panel | primary release |

use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::viewport::Viewport;
use mind_core::{Color, EditorConfig, MapMutation, MindMap, Pan};
use mind_render::{FilenameLabel, SliderPanel, hit_test};
use rand::Rng;

/// Something the session must do in response to input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Mutate(MapMutation),
    EditFilename(FilenameEdit),
    Save,
    Load,
    StartTextInput,
    StopTextInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameEdit {
    Append(String),
    Pop,
}

/// World cursor and node position captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    world: (f32, f32),
    node: (f32, f32),
}

pub struct Controller {
    pub viewport: Viewport,
    modifiers: Modifiers,
    /// Last known pointer position, screen pixels.
    cursor: (f32, f32),
    /// World point under the cursor when panning started.
    pan_anchor: Option<(f32, f32)>,
    drag: Option<DragAnchor>,
    setting_parent: bool,
    editing_text: bool,
    editing_filename: bool,
    adjusting_slider: bool,
    /// Single-slot background color clipboard.
    clipboard: Option<Color>,
    spawn_point: (f32, f32),
}

impl Controller {
    pub fn new(config: &EditorConfig, width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height, config.zoom),
            modifiers: Modifiers::NONE,
            cursor: (0.0, 0.0),
            pan_anchor: None,
            drag: None,
            setting_parent: false,
            editing_text: false,
            editing_filename: false,
            adjusting_slider: false,
            clipboard: None,
            spawn_point: config.spawn_point,
        }
    }

    // ─── Mode queries ────────────────────────────────────────────────────

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_setting_parent(&self) -> bool {
        self.setting_parent
    }

    pub fn is_editing_text(&self) -> bool {
        self.editing_text
    }

    pub fn is_editing_filename(&self) -> bool {
        self.editing_filename
    }

    pub fn is_adjusting_slider(&self) -> bool {
        self.adjusting_slider
    }

    pub fn clipboard(&self) -> Option<Color> {
        self.clipboard
    }

    /// Pan to render with: the committed pan plus any drag in progress.
    pub fn effective_pan(&self, committed: Pan) -> Pan {
        match self.pan_anchor {
            Some(anchor) => {
                let (wx, wy) = self.world_cursor(committed);
                Pan::new(committed.dx + wx - anchor.0, committed.dy + wy - anchor.1)
            }
            None => committed,
        }
    }

    fn world_cursor(&self, pan: Pan) -> (f32, f32) {
        self.viewport.screen_to_world(pan, self.cursor.0, self.cursor.1)
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Handle one input event. `label` is the filename label as currently
    /// drawn, for click detection.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        map: &MindMap,
        label: &FilenameLabel,
    ) -> Vec<Action> {
        if let Some(position) = event.position() {
            self.cursor = position;
        }

        match event {
            InputEvent::PointerDown { x, y, button } => match button {
                PointerButton::Primary => self.primary_down(*x, *y, map, label),
                PointerButton::Secondary => {
                    self.pan_anchor = Some(self.world_cursor(map.pan));
                    log::debug!("pan start");
                    Vec::new()
                }
                PointerButton::Middle => Vec::new(),
            },

            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y, map),

            InputEvent::PointerUp { button, .. } => match button {
                PointerButton::Primary => {
                    self.drag = None;
                    self.adjusting_slider = false;
                    Vec::new()
                }
                PointerButton::Secondary => self.finish_pan(map),
                PointerButton::Middle => Vec::new(),
            },

            InputEvent::Wheel { x, y, delta } => {
                let pan = self.viewport.zoom_about(map.pan, *x, *y, *delta);
                log::debug!("zoom {}%", self.viewport.zoom_percent());
                if pan == map.pan {
                    Vec::new()
                } else {
                    vec![Action::Mutate(MapMutation::SetPan { pan })]
                }
            }

            InputEvent::Key { key, modifiers } => {
                self.modifiers = *modifiers;
                match ShortcutMap::resolve(
                    key,
                    modifiers.ctrl,
                    modifiers.shift,
                    modifiers.alt,
                    modifiers.meta,
                ) {
                    Some(shortcut) => self.shortcut(shortcut, map),
                    None => Vec::new(),
                }
            }

            InputEvent::ModifiersChanged(modifiers) => {
                self.modifiers = *modifiers;
                Vec::new()
            }

            InputEvent::Text(text) => self.text(text, map),

            InputEvent::Resize { width, height } => {
                self.viewport.resize(*width, *height);
                Vec::new()
            }
        }
    }

    /// Drop in-progress gestures and set-parent mode after the map is
    /// replaced.
    pub fn reset_gestures(&mut self) {
        self.pan_anchor = None;
        self.drag = None;
        self.setting_parent = false;
        self.adjusting_slider = false;
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    fn primary_down(
        &mut self,
        x: f32,
        y: f32,
        map: &MindMap,
        label: &FilenameLabel,
    ) -> Vec<Action> {
        let panel = SliderPanel::new(self.viewport.width);
        if map.selected().is_some() {
            self.adjusting_slider = panel.grabs(x, y);
            if self.adjusting_slider {
                return self.slider_actions(x, y, map).into_iter().collect();
            }
        }

        if label.contains(x, y) {
            self.editing_filename = true;
            log::debug!("editing filename");
            return vec![Action::StartTextInput];
        }

        let (wx, wy) = self.viewport.screen_to_world(map.pan, x, y);
        let selected = map.selected();

        match hit_test(map, wx, wy) {
            // The child stays selected after the toggle; only the mode ends.
            Some(hit) if self.setting_parent => {
                self.setting_parent = false;
                match selected {
                    Some(child) => vec![Action::Mutate(MapMutation::ToggleParent {
                        child,
                        parent: hit,
                    })],
                    None => Vec::new(),
                }
            }
            Some(hit) => {
                let mut actions = Vec::new();
                if selected != Some(hit) {
                    actions.push(Action::Mutate(MapMutation::Select { id: Some(hit) }));
                }
                if let Some(node) = map.node(hit) {
                    self.drag = Some(DragAnchor {
                        world: (wx, wy),
                        node: (node.x, node.y),
                    });
                }
                actions
            }
            None => {
                let mut actions = Vec::new();
                if selected.is_some() {
                    actions.push(Action::Mutate(MapMutation::Select { id: None }));
                }
                if self.editing_text {
                    self.editing_text = false;
                    if !self.editing_filename {
                        actions.push(Action::StopTextInput);
                    }
                }
                actions
            }
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32, map: &MindMap) -> Vec<Action> {
        if self.adjusting_slider {
            return self.slider_actions(x, y, map).into_iter().collect();
        }

        let (Some(anchor), Some(id)) = (self.drag, map.selected()) else {
            return Vec::new();
        };
        let (wx, wy) = self.viewport.screen_to_world(map.pan, x, y);
        let nx = anchor.node.0 + wx - anchor.world.0;
        let ny = anchor.node.1 + wy - anchor.world.1;

        let mutation = if self.modifiers.command() {
            MapMutation::MoveSubtree { id, x: nx, y: ny }
        } else {
            MapMutation::MoveNode { id, x: nx, y: ny }
        };
        vec![Action::Mutate(mutation)]
    }

    fn finish_pan(&mut self, map: &MindMap) -> Vec<Action> {
        if self.pan_anchor.is_none() {
            return Vec::new();
        }
        let pan = self.effective_pan(map.pan);
        self.pan_anchor = None;
        log::debug!("pan committed ({}, {})", pan.dx, pan.dy);
        vec![Action::Mutate(MapMutation::SetPan { pan })]
    }

    fn slider_actions(&self, x: f32, y: f32, map: &MindMap) -> Option<Action> {
        let id = map.selected()?;
        let channel = SliderPanel::new(self.viewport.width).channel_at(x)?;
        let value = SliderPanel::value_at(y)?;
        let (r, g, b) = channel.channels(value);
        Some(Action::Mutate(MapMutation::SetBackground { id, r, g, b }))
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    fn shortcut(&mut self, shortcut: ShortcutAction, map: &MindMap) -> Vec<Action> {
        let selected = map.selected();
        log::debug!("shortcut {shortcut:?}");

        match shortcut {
            ShortcutAction::NewNode => {
                let (sx, sy) = self.spawn_point;
                vec![Action::Mutate(MapMutation::CreateNode {
                    x: sx - map.pan.dx,
                    y: sy - map.pan.dy,
                })]
            }

            ShortcutAction::DeleteNode => match selected {
                Some(id) => vec![Action::Mutate(MapMutation::RemoveNode { id })],
                None => Vec::new(),
            },

            ShortcutAction::SetParentMode => {
                if selected.is_some() {
                    self.setting_parent = true;
                }
                Vec::new()
            }

            ShortcutAction::ClearLinks => match selected {
                Some(id) => vec![Action::Mutate(MapMutation::ClearLinks { id })],
                None => Vec::new(),
            },

            ShortcutAction::ToggleTextEdit => self.toggle_text_edit(selected.is_some()),

            ShortcutAction::ClearText => match selected {
                Some(id) => {
                    self.editing_text = true;
                    vec![
                        Action::Mutate(MapMutation::SetText {
                            id,
                            text: String::new(),
                        }),
                        Action::StartTextInput,
                    ]
                }
                None => Vec::new(),
            },

            ShortcutAction::Backspace => {
                let mut actions = Vec::new();
                if self.editing_filename {
                    actions.push(Action::EditFilename(FilenameEdit::Pop));
                }
                if let (true, Some(id)) = (self.editing_text, selected) {
                    actions.push(Action::Mutate(MapMutation::PopChar { id }));
                }
                actions
            }

            ShortcutAction::RandomColor => match selected {
                Some(id) => {
                    let mut rng = rand::thread_rng();
                    vec![Action::Mutate(MapMutation::SetBackground {
                        id,
                        r: rng.gen_range(0..=255),
                        g: rng.gen_range(0..=255),
                        b: rng.gen_range(0..=255),
                    })]
                }
                None => Vec::new(),
            },

            ShortcutAction::CopyColor => {
                if let Some(node) = map.selected_node() {
                    self.clipboard = Some(node.bg_color);
                }
                Vec::new()
            }

            ShortcutAction::PasteColor => match (selected, self.clipboard) {
                (Some(id), Some(c)) => vec![Action::Mutate(MapMutation::SetBackground {
                    id,
                    r: c.r.into(),
                    g: c.g.into(),
                    b: c.b.into(),
                })],
                _ => Vec::new(),
            },

            ShortcutAction::Save => vec![Action::Save],

            ShortcutAction::Load => vec![Action::Load],

            ShortcutAction::Cancel => {
                self.setting_parent = false;
                self.editing_text = false;
                self.editing_filename = false;
                vec![Action::StopTextInput]
            }
        }
    }

    fn toggle_text_edit(&mut self, has_selection: bool) -> Vec<Action> {
        let was_active = self.editing_text || self.editing_filename;

        if has_selection {
            self.editing_text = !self.editing_text;
        }
        if !self.editing_text {
            self.editing_filename = false;
        }

        match (was_active, self.editing_text || self.editing_filename) {
            (false, true) => vec![Action::StartTextInput],
            (true, false) => vec![Action::StopTextInput],
            _ => Vec::new(),
        }
    }

    fn text(&mut self, text: &str, map: &MindMap) -> Vec<Action> {
        if self.editing_filename {
            return vec![Action::EditFilename(FilenameEdit::Append(text.to_string()))];
        }
        match (self.editing_text, map.selected()) {
            (true, Some(id)) => vec![Action::Mutate(MapMutation::AppendText {
                id,
                fragment: text.to_string(),
            })],
            _ => Vec::new(),
        }
    }
}
