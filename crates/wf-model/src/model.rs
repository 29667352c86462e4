//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `NodeId n`, its neighbours occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[n] .. adj_start[n+1] ]
//! ```
//!
//! Roads are undirected: the builder stores every road in both directions,
//! so adjacency is symmetric by construction.  Each node's neighbour slice
//! is sorted by `NodeId`, which makes expansion order (and therefore search
//! tie-breaking) reproducible across runs.
//!
//! # Coordinates
//!
//! Node positions live in the normalized plane (`[0, 1]` on both axes).
//! `metric_scale` converts a normalized distance into metres.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a normalized `(x, y)` to the nearest
//! `NodeId`.  Used to resolve the caller's start/end coordinates.

use std::fmt;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use wf_core::{NodeId, Point};

// ── Node snapshot ─────────────────────────────────────────────────────────────

/// A node as a value: its identity plus its position.
///
/// Paths are sequences of these snapshots, so a finished path stays valid
/// (and cheap to hand to a renderer) independent of the model that
/// produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:  NodeId,
    pub pos: Point,
}

impl Node {
    /// Euclidean distance to `other` in normalized units.
    #[inline]
    pub fn distance(&self, other: &Node) -> f32 {
        self.pos.distance(other.pos)
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [x, y]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RouteModel ────────────────────────────────────────────────────────────────

/// Undirected road graph in CSR format, a nearest-node index, and the sink
/// that receives the most recent search result.
///
/// The model owns node storage for its whole lifetime.  It holds no search
/// state: the search engine keeps its own per-search table, so the graph is
/// only ever borrowed immutably while a search runs.  Do not construct
/// directly; use [`RouteModelBuilder`] or one of the loaders.
pub struct RouteModel {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Normalized position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Neighbours of node `n` are at
    /// `adj_start[n] .. adj_start[n+1]` in `adj_to`.
    /// Length = `node_count + 1`.
    pub adj_start: Vec<u32>,

    /// Neighbour node ids, grouped by source node.
    pub adj_to: Vec<NodeId>,

    // ── Scale ─────────────────────────────────────────────────────────────
    metric_scale: f32,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,

    // ── Output sink ───────────────────────────────────────────────────────
    path: Vec<Node>,
}

impl RouteModel {
    /// Construct an empty model with no nodes.
    ///
    /// Any planner constructed against it fails with `EmptyGraph`.
    pub fn empty() -> Self {
        RouteModelBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected roads (each stored twice internally).
    pub fn edge_count(&self) -> usize {
        self.adj_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Node access ───────────────────────────────────────────────────────

    /// Position of `node`.
    ///
    /// # Panics
    /// Panics if `node` is not in this model.
    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// Value snapshot of `node`.
    ///
    /// # Panics
    /// Panics if `node` is not in this model.
    #[inline]
    pub fn node(&self, node: NodeId) -> Node {
        Node { id: node, pos: self.position(node) }
    }

    /// Euclidean distance between two nodes in normalized units.
    #[inline]
    pub fn distance(&self, a: NodeId, b: NodeId) -> f32 {
        self.position(a).distance(self.position(b))
    }

    /// Conversion factor from normalized units to metres.
    #[inline]
    pub fn metric_scale(&self) -> f32 {
        self.metric_scale
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Neighbours of `node`, ascending by `NodeId`.
    ///
    /// A contiguous slice scan; no heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        self.adj_to[start..end].iter().copied()
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` nearest to `pos` by Euclidean distance.
    ///
    /// Returns `None` only if the model has no nodes.
    pub fn closest_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&pos.to_array())
            .map(|e| e.id)
    }

    // ── Path sink ─────────────────────────────────────────────────────────

    /// Store the result of the latest search for downstream consumers.
    pub fn set_path(&mut self, path: Vec<Node>) {
        self.path = path;
    }

    /// The path stored by the latest search; empty if none was found.
    pub fn path(&self) -> &[Node] {
        &self.path
    }

    /// Move the stored path out, leaving the sink empty.
    pub fn take_path(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.path)
    }
}

impl fmt::Debug for RouteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteModel")
            .field("nodes", &self.node_count())
            .field("roads", &self.edge_count())
            .field("metric_scale", &self.metric_scale)
            .field("path_len", &self.path.len())
            .finish()
    }
}

// ── RouteModelBuilder ─────────────────────────────────────────────────────────

/// Construct a [`RouteModel`] incrementally, then call [`build`](Self::build).
///
/// Nodes and roads may be added in any order.  `build()` sorts and
/// deduplicates the adjacency, constructs the CSR arrays, and bulk-loads the
/// R-tree.
///
/// # Example
///
/// ```
/// use wf_core::Point;
/// use wf_model::RouteModelBuilder;
///
/// let mut b = RouteModelBuilder::new();
/// let a = b.add_node(Point::new(0.1, 0.1));
/// let c = b.add_node(Point::new(0.4, 0.5));
/// b.add_road(a, c);
/// let model = b.metric_scale(1_000.0).build();
/// assert_eq!(model.node_count(), 2);
/// assert_eq!(model.edge_count(), 1);
/// ```
pub struct RouteModelBuilder {
    nodes:        Vec<Point>,
    raw_adj:      Vec<(NodeId, NodeId)>,
    metric_scale: f32,
}

impl RouteModelBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_adj: Vec::new(), metric_scale: 1.0 }
    }

    /// Pre-allocate for the expected number of nodes and roads to reduce
    /// reallocations when bulk-loading from OSM or CSV.
    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            nodes:        Vec::with_capacity(nodes),
            raw_adj:      Vec::with_capacity(roads * 2),
            metric_scale: 1.0,
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add an undirected road between `a` and `b`.
    ///
    /// Self-loops are ignored: they can never shorten a path.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        self.raw_adj.push((a, b));
        self.raw_adj.push((b, a));
    }

    /// Set the normalized-unit → metre conversion factor (default `1.0`).
    pub fn metric_scale(mut self, scale: f32) -> Self {
        self.metric_scale = scale;
        self
    }

    pub fn set_metric_scale(&mut self, scale: f32) {
        self.metric_scale = scale;
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Consume the builder and produce a [`RouteModel`].
    ///
    /// Time complexity: O(E log E) for the adjacency sort + O(N log N) for
    /// the R-tree bulk load.
    ///
    /// # Panics
    /// Panics if a road references a node that was never added.
    pub fn build(self) -> RouteModel {
        let node_count = self.nodes.len();

        let mut raw = self.raw_adj;
        raw.sort_unstable();
        raw.dedup();

        let adj_to: Vec<NodeId> = raw.iter().map(|&(_, to)| to).collect();

        let mut adj_start = vec![0u32; node_count + 1];
        for &(from, _) in &raw {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[node_count] as usize, adj_to.len());

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { point: pos.to_array(), id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RouteModel {
            node_pos: self.nodes,
            adj_start,
            adj_to,
            metric_scale: self.metric_scale,
            spatial_idx,
            path: Vec::new(),
        }
    }
}

impl Default for RouteModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
