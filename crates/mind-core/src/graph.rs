//! The mind map: a node arena plus parent→child links.
//!
//! Nodes live in a `StableDiGraph`, so a [`NodeId`] keeps pointing at the
//! same node across unrelated insertions and removals. A link is a single
//! edge `parent → child`; a node's parents are its incoming neighbors and its
//! children its outgoing ones, which makes parent/child symmetry structural.
//!
//! Each edge carries two ranks so both sides keep a stable order: the
//! child's position among the parent's children and the parent's position
//! among the child's parents. Links created at runtime use one increasing
//! sequence for both.
//!
//! The root set (parentless nodes) is materialized in `roots` and updated by
//! `sync_root`, which every parent-set mutation goes through.

use crate::id::NodeId;
use crate::layout::TextMeasure;
use crate::model::{MindNode, Pan};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::{Dfs, EdgeRef};
use smallvec::SmallVec;

/// Edge weight of a parent→child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    /// Order among the parent's children.
    pub(crate) child_rank: u64,
    /// Order among the child's parents.
    pub(crate) parent_rank: u64,
}

/// Ordered list of link endpoints.
pub type NodeList = SmallVec<[NodeId; 4]>;

/// Outcome of [`MindMap::toggle_parent_link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkToggle {
    Added,
    Removed,
    /// Self link or unknown node.
    Ignored,
}

/// The whole document: nodes, links, root set, selection and pan.
#[derive(Debug, Clone, Default)]
pub struct MindMap {
    pub(crate) graph: StableDiGraph<MindNode, Link>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) selected: Option<NodeId>,
    /// Committed canvas translation.
    pub pan: Pan,
    pub(crate) next_rank: u64,
    /// Generation handed to the next inserted node.
    pub(crate) next_generation: u32,
}

impl MindMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Create a node with default style at a world position. It starts
    /// parentless and is registered as a root.
    pub fn create_node(&mut self, x: f32, y: f32) -> NodeId {
        let id = self.insert_node(MindNode::new(x, y));
        self.roots.push(id);
        log::debug!("created node {id} at ({x}, {y})");
        id
    }

    /// Add a node to the arena without touching the root set.
    pub(crate) fn insert_node(&mut self, mut node: MindNode) -> NodeId {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        node.generation = generation;
        NodeId::new(self.graph.add_node(node), generation)
    }

    /// Id of the node currently living at `idx`.
    fn id_at(&self, idx: NodeIndex) -> NodeId {
        NodeId::new(idx, self.graph[idx].generation)
    }

    pub fn node(&self, id: NodeId) -> Option<&MindNode> {
        self.graph
            .node_weight(id.index())
            .filter(|n| n.generation == id.generation())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut MindNode> {
        self.graph
            .node_weight_mut(id.index())
            .filter(|n| n.generation == id.generation())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All node ids in arena order. Painting, hit testing and serialization
    /// all walk nodes in this order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices().map(|idx| self.id_at(idx))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &MindNode)> + '_ {
        self.graph
            .node_indices()
            .map(|idx| (self.id_at(idx), &self.graph[idx]))
    }

    /// Destroy a node: sever every parent and child link, drop it from the
    /// root set and the selection, and remove it from the arena.
    pub fn remove_node(&mut self, id: NodeId) -> Option<MindNode> {
        if !self.contains(id) {
            log::warn!("remove_node: {id} is not in the map");
            return None;
        }
        self.clear_links(id);
        self.roots.retain(|r| *r != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        let removed = self.graph.remove_node(id.index());
        log::debug!("removed node {id}");
        removed
    }

    // ─── Position ────────────────────────────────────────────────────────

    /// Move a single node.
    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.set_position(x, y);
                true
            }
            None => false,
        }
    }

    /// Move a node and translate its whole descendant closure by the same
    /// delta. Every reachable node moves exactly once, so shared
    /// descendants and link cycles are handled.
    pub fn set_position_rigid(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let (dx, dy) = (x - node.x, y - node.y);

        let mut dfs = Dfs::new(&self.graph, id.index());
        while let Some(idx) = dfs.next(&self.graph) {
            self.graph[idx].translate(dx, dy);
        }
        true
    }

    // ─── Links ───────────────────────────────────────────────────────────

    /// Parents of `id`, in link order.
    pub fn parents(&self, id: NodeId) -> NodeList {
        self.linked(id, Direction::Incoming)
    }

    /// Children of `id`, in link order.
    pub fn children(&self, id: NodeId) -> NodeList {
        self.linked(id, Direction::Outgoing)
    }

    fn linked(&self, id: NodeId, dir: Direction) -> NodeList {
        if !self.contains(id) {
            return NodeList::new();
        }
        let me = id.index();
        let mut ranked: SmallVec<[(u64, NodeId); 4]> = self
            .graph
            .edges_directed(me, dir)
            .map(|e| {
                let other = if e.source() == me { e.target() } else { e.source() };
                let rank = match dir {
                    Direction::Incoming => e.weight().parent_rank,
                    Direction::Outgoing => e.weight().child_rank,
                };
                (rank, self.id_at(other))
            })
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, id)| id).collect()
    }

    /// Whether `parent` is a parent of `child`.
    pub fn has_parent(&self, child: NodeId, parent: NodeId) -> bool {
        self.contains(child)
            && self.contains(parent)
            && self.graph.find_edge(parent.index(), child.index()).is_some()
    }

    /// Make `parent` a parent of `child`. Rejects self links, unknown ids and
    /// links that already exist.
    pub fn add_parent_link(&mut self, child: NodeId, parent: NodeId) -> bool {
        if child == parent
            || !self.contains(child)
            || !self.contains(parent)
            || self.has_parent(child, parent)
        {
            return false;
        }
        let rank = self.next_rank;
        self.next_rank += 1;
        self.graph.add_edge(
            parent.index(),
            child.index(),
            Link {
                child_rank: rank,
                parent_rank: rank,
            },
        );
        self.sync_root(child);
        true
    }

    /// Remove `parent` from `child`'s parents. No-op if not linked.
    pub fn remove_parent_link(&mut self, child: NodeId, parent: NodeId) -> bool {
        if !self.contains(child) || !self.contains(parent) {
            return false;
        }
        let Some(edge) = self.graph.find_edge(parent.index(), child.index()) else {
            return false;
        };
        self.graph.remove_edge(edge);
        self.sync_root(child);
        true
    }

    /// Same link as [`add_parent_link`](Self::add_parent_link), seen from the parent.
    pub fn add_child_link(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.add_parent_link(child, parent)
    }

    pub fn remove_child_link(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.remove_parent_link(child, parent)
    }

    /// Remove the link if `parent` is already a parent of `child`, add it
    /// otherwise. This is how the editor creates hierarchy.
    pub fn toggle_parent_link(&mut self, child: NodeId, parent: NodeId) -> LinkToggle {
        if child == parent || !self.contains(child) || !self.contains(parent) {
            return LinkToggle::Ignored;
        }
        if self.remove_parent_link(child, parent) {
            log::debug!("unlinked {parent} -> {child}");
            LinkToggle::Removed
        } else {
            self.add_parent_link(child, parent);
            log::debug!("linked {parent} -> {child}");
            LinkToggle::Added
        }
    }

    /// Sever every parent and child link of `id` without removing it.
    pub fn clear_links(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        for parent in self.parents(id) {
            self.remove_parent_link(id, parent);
        }
        for child in self.children(id) {
            self.remove_parent_link(child, id);
        }
        true
    }

    // ─── Roots ───────────────────────────────────────────────────────────

    /// Parentless nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.roots.contains(&id)
    }

    /// Bring `id`'s membership in the root set in line with its parents.
    fn sync_root(&mut self, id: NodeId) {
        let parentless = self
            .graph
            .neighbors_directed(id.index(), Direction::Incoming)
            .next()
            .is_none();
        let pos = self.roots.iter().position(|r| *r == id);
        match (parentless, pos) {
            (true, None) => self.roots.push(id),
            (false, Some(i)) => {
                self.roots.remove(i);
            }
            _ => {}
        }
    }

    /// Check that `roots` holds exactly the parentless nodes, once each.
    pub fn roots_consistent(&self) -> bool {
        let parentless = self
            .node_ids()
            .filter(|id| {
                self.graph
                    .neighbors_directed(id.index(), Direction::Incoming)
                    .next()
                    .is_none()
            })
            .count();
        parentless == self.roots.len()
            && self.roots.iter().all(|id| {
                self.contains(*id)
                    && self.parents(*id).is_empty()
                    && self.roots.iter().filter(|r| *r == id).count() == 1
            })
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&MindNode> {
        self.selected.and_then(|id| self.node(id))
    }

    /// Select a node, or clear the selection. Unknown ids clear it.
    pub fn select(&mut self, id: Option<NodeId>) -> bool {
        let next = id.filter(|id| self.contains(*id));
        let changed = self.selected != next;
        self.selected = next;
        changed
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    /// Re-derive text layout for every node whose text changed. Returns the
    /// number of nodes laid out.
    pub fn refresh_layouts(&mut self, measure: &dyn TextMeasure) -> usize {
        let indices: Vec<_> = self.graph.node_indices().collect();
        indices
            .into_iter()
            .filter(|&idx| self.graph[idx].refresh_layout(measure))
            .count()
    }
}
