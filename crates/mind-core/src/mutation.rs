//! Graph mutations requested by the editor.
//!
//! The interaction controller never pokes at the map directly; it emits
//! `MapMutation` values and the session applies them here.

use crate::graph::{LinkToggle, MindMap};
use crate::id::NodeId;
use crate::model::Pan;

/// A single change to a [`MindMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapMutation {
    CreateNode { x: f32, y: f32 },
    /// Free move of one node.
    MoveNode { id: NodeId, x: f32, y: f32 },
    /// Rigid move of a node and its descendants.
    MoveSubtree { id: NodeId, x: f32, y: f32 },
    ToggleParent { child: NodeId, parent: NodeId },
    ClearLinks { id: NodeId },
    RemoveNode { id: NodeId },
    /// Background channels; values outside `[0, 255]` are left unchanged.
    SetBackground { id: NodeId, r: i32, g: i32, b: i32 },
    SetText { id: NodeId, text: String },
    AppendText { id: NodeId, fragment: String },
    PopChar { id: NodeId },
    Select { id: Option<NodeId> },
    SetPan { pan: Pan },
}

impl MindMap {
    /// Apply a mutation. Returns `true` if the map changed.
    pub fn apply_mutation(&mut self, mutation: MapMutation) -> bool {
        log::trace!("apply {mutation:?}");
        match mutation {
            MapMutation::CreateNode { x, y } => {
                self.create_node(x, y);
                true
            }
            MapMutation::MoveNode { id, x, y } => self.set_position(id, x, y),
            MapMutation::MoveSubtree { id, x, y } => self.set_position_rigid(id, x, y),
            MapMutation::ToggleParent { child, parent } => {
                self.toggle_parent_link(child, parent) != LinkToggle::Ignored
            }
            MapMutation::ClearLinks { id } => self.clear_links(id),
            MapMutation::RemoveNode { id } => self.remove_node(id).is_some(),
            MapMutation::SetBackground { id, r, g, b } => match self.node_mut(id) {
                Some(node) => {
                    let before = node.bg_color;
                    node.set_background_channels(r, g, b);
                    node.bg_color != before
                }
                None => false,
            },
            MapMutation::SetText { id, text } => match self.node_mut(id) {
                Some(node) => {
                    node.set_text(text);
                    true
                }
                None => false,
            },
            MapMutation::AppendText { id, fragment } => match self.node_mut(id) {
                Some(node) if !fragment.is_empty() => {
                    node.append_text(&fragment);
                    true
                }
                _ => false,
            },
            MapMutation::PopChar { id } => self.node_mut(id).is_some_and(|n| n.pop_char()),
            MapMutation::Select { id } => self.select(id),
            MapMutation::SetPan { pan } => {
                let changed = self.pan != pan;
                self.pan = pan;
                changed
            }
        }
    }
}
