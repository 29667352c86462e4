//! Routing trait, A* router, and a reference Dijkstra.
//!
//! # Pluggability
//!
//! Applications that route between known node ids call through the
//! [`Router`] trait, so the A* engine and the plain Dijkstra are
//! interchangeable.  [`DijkstraRouter`] shares no code with the A* engine,
//! which makes it the independent yardstick for optimality checks.
//!
//! # Units
//!
//! Edge costs are Euclidean lengths in normalized units; `Route::distance`
//! is already multiplied by the model's metric scale.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wf_core::NodeId;
use wf_model::{ModelError, Node, RouteModel};

use crate::{SearchConfig, SearchError, SearchResult, SearchStatus, astar};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query between two nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Node snapshots from source to destination, both included.
    pub nodes: Vec<Node>,
    /// Route length in physical units.
    pub distance: f32,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Ids of the route's nodes in order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`.  Routers hold no per-search state,
/// so one instance can serve any number of sequential queries.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields a trivial one-node route with distance 0.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoRoute`] if `to` is unreachable from `from`;
    /// [`SearchError::LimitReached`] if a search budget ran out first;
    /// [`ModelError::NodeNotFound`] if either id is not in `model`.
    fn route(&self, model: &RouteModel, from: NodeId, to: NodeId) -> SearchResult<Route>;
}

fn check_nodes(model: &RouteModel, from: NodeId, to: NodeId) -> SearchResult<()> {
    for node in [from, to] {
        if !model.contains(node) {
            return Err(ModelError::NodeNotFound(node).into());
        }
    }
    Ok(())
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// [`Router`] over the A* engine with a fixed [`SearchConfig`].
#[derive(Clone, Debug, Default)]
pub struct AStarRouter {
    pub config: SearchConfig,
}

impl AStarRouter {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl Router for AStarRouter {
    fn route(&self, model: &RouteModel, from: NodeId, to: NodeId) -> SearchResult<Route> {
        check_nodes(model, from, to)?;
        let outcome = astar(model, from, to, &self.config);
        match outcome.status {
            SearchStatus::Found => Ok(Route { nodes: outcome.path, distance: outcome.distance }),
            SearchStatus::NoRoute => Err(SearchError::NoRoute { from, to }),
            SearchStatus::LimitReached => {
                Err(SearchError::LimitReached { from, to, expanded: outcome.expanded })
            }
        }
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR graph.
///
/// Always optimal; expands more nodes than A* because it has no goal
/// direction.  Costs are accumulated in `f64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, model: &RouteModel, from: NodeId, to: NodeId) -> SearchResult<Route> {
        check_nodes(model, from, to)?;
        dijkstra(model, from, to).ok_or(SearchError::NoRoute { from, to })
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct Candidate {
    cost: f64,
    node: NodeId,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost; NodeId as secondary key for deterministic ties.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(model: &RouteModel, from: NodeId, to: NodeId) -> Option<Route> {
    let n = model.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = node that reached v; INVALID for unreached nodes.
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Candidate { cost: 0.0, node: from });

    while let Some(Candidate { cost, node }) = heap.pop() {
        if node == to {
            return Some(reconstruct(model, &prev, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for neighbor in model.neighbors(node) {
            let new_cost = cost + f64::from(model.distance(node, neighbor));
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Candidate { cost: new_cost, node: neighbor });
            }
        }
    }

    None
}

fn reconstruct(model: &RouteModel, prev: &[NodeId], to: NodeId, total: f64) -> Route {
    let mut nodes = vec![model.node(to)];
    let mut cur = to;
    while prev[cur.index()].is_valid() {
        cur = prev[cur.index()];
        nodes.push(model.node(cur));
    }
    nodes.reverse();
    Route {
        nodes,
        distance: (total * f64::from(model.metric_scale())) as f32,
    }
}
