use petgraph::graph::NodeIndex;
use std::fmt;

/// Handle to a node living in a [`MindMap`](crate::MindMap).
///
/// An arena slot plus the generation of the node created in it. Slots are
/// recycled after removal; the generation is not, so an id stays bound to
/// the node it was issued for. Once that node is removed the id is dead and
/// every map operation given it is a no-op, even after the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: NodeIndex,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: NodeIndex, generation: u32) -> Self {
        NodeId { index, generation }
    }

    /// The underlying arena index.
    pub fn index(self) -> NodeIndex {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index.index(), self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index.index())
    }
}
