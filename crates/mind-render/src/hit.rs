//! Hit testing: world point → node lookup.

use mind_core::{MindMap, NodeId};

/// First node, in arena order, whose circle strictly contains `(wx, wy)`.
///
/// Arena order is also paint order, so on overlap the node painted first
/// (underneath) wins.
pub fn hit_test(map: &MindMap, wx: f32, wy: f32) -> Option<NodeId> {
    map.nodes()
        .find(|(_, node)| node.distance_to(wx, wy) < node.radius())
        .map(|(id, _)| id)
}
