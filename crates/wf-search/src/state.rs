//! Per-search node bookkeeping.

use wf_core::NodeId;

/// The search fields of a single node.
///
/// Under [`ExpansionPolicy::FirstDiscovery`] a node with `visited == true`
/// has had `g_value`, `h_value` and `parent` (except the start node)
/// assigned exactly once; they are never revised.
///
/// [`ExpansionPolicy::FirstDiscovery`]: crate::ExpansionPolicy::FirstDiscovery
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeState {
    /// Discovered (or, for the start node, expanded).
    pub visited: bool,

    /// Removed from the open set and expanded.  Only read under
    /// `Relaxing`, where it filters stale heap entries.
    pub closed: bool,

    /// Cost from the start node, normalized units.  `INFINITY` until set.
    pub g_value: f32,

    /// Straight-line distance to the goal, normalized units.
    pub h_value: f32,

    /// Predecessor on the best path found so far.  A non-owning index into
    /// the model's node storage.
    pub parent: Option<NodeId>,
}

impl NodeState {
    pub const UNSEEN: NodeState = NodeState {
        visited: false,
        closed:  false,
        g_value: f32::INFINITY,
        h_value: 0.0,
        parent:  None,
    };

    /// `f = g + h`, the open-set priority.
    #[inline]
    pub fn f_value(&self) -> f32 {
        self.g_value + self.h_value
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::UNSEEN
    }
}

/// Search state for every node of one model, indexed by `NodeId`.
///
/// Scoped to a single search.  Allocated once per search in O(N); nothing
/// is written back to the model.
#[derive(Clone, Debug)]
pub struct SearchState {
    nodes: Vec<NodeState>,
}

impl SearchState {
    pub fn new(node_count: usize) -> Self {
        Self { nodes: vec![NodeState::UNSEEN; node_count] }
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> &NodeState {
        &self.nodes[node.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> &mut NodeState {
        &mut self.nodes[node.index()]
    }

    #[inline]
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.nodes[node.index()].visited
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Number of nodes discovered so far.
    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|s| s.visited).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
