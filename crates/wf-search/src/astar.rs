//! The A* engine.
//!
//! # Loop
//!
//! ```text
//! add_neighbors(start); current = next_node()
//! while current exists:
//!     if current == goal → construct_final_path(goal)   (GoalReached)
//!     add_neighbors(current); current = next_node()
//!     if expanded >= max_expansions → LimitReached
//! → NoRoute                                            (OpenSetExhausted)
//! ```
//!
//! Edge cost and heuristic are both Euclidean distance in normalized units.
//! The total is multiplied by the model's metric scale only once, when the
//! final path is built.

use tracing::{debug, trace, warn};

use wf_core::{NodeId, Point};
use wf_model::{Node, RouteModel};

use crate::{ExpansionPolicy, OpenSet, SearchConfig, SearchState};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Terminal state of a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The goal was reached.  A zero distance means start and goal coincide.
    Found,
    /// The open set ran dry: start and goal are disconnected.  Definitive
    /// for this model and endpoint pair.
    NoRoute,
    /// `max_expansions` was hit before the goal.  Says nothing about
    /// whether a route exists.
    LimitReached,
}

/// What a search produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Node snapshots ordered start → goal.  Empty unless `Found`.
    pub path: Vec<Node>,
    /// Path length in physical units (normalized length × metric scale).
    /// Zero unless `Found`.
    pub distance: f32,
    /// Number of nodes whose neighbours were expanded.
    pub expanded: usize,
}

impl SearchOutcome {
    fn unfinished(status: SearchStatus, expanded: usize) -> Self {
        Self { status, path: Vec::new(), distance: 0.0, expanded }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run A* from `from` to `to` over `model`.
///
/// # Panics
/// Panics if either node is not in `model`; callers resolve ids through the
/// model first (see [`RoutePlanner`](crate::RoutePlanner)).
pub fn astar(model: &RouteModel, from: NodeId, to: NodeId, config: &SearchConfig) -> SearchOutcome {
    let mut search = AStar::new(model, from, to, config);
    let outcome = search.run();
    debug!(
        %from,
        %to,
        status = ?outcome.status,
        distance = outcome.distance,
        expanded = outcome.expanded,
        "A* search finished"
    );
    outcome
}

// ── Engine ────────────────────────────────────────────────────────────────────

struct AStar<'a> {
    model:    &'a RouteModel,
    config:   &'a SearchConfig,
    start:    NodeId,
    goal:     NodeId,
    goal_pos: Point,
    state:    SearchState,
    open:     OpenSet,
    expanded: usize,
}

impl<'a> AStar<'a> {
    fn new(model: &'a RouteModel, start: NodeId, goal: NodeId, config: &'a SearchConfig) -> Self {
        let mut state = SearchState::new(model.node_count());
        let goal_pos = model.position(goal);

        let s = state.get_mut(start);
        s.g_value = 0.0;
        s.h_value = model.position(start).distance(goal_pos);

        Self {
            model,
            config,
            start,
            goal,
            goal_pos,
            state,
            open: OpenSet::new(config.tie_break),
            expanded: 0,
        }
    }

    fn run(&mut self) -> SearchOutcome {
        if self.start == self.goal {
            return self.construct_final_path(self.goal);
        }

        self.add_neighbors(self.start);
        while let Some(current) = self.next_node() {
            if current == self.goal {
                return self.construct_final_path(current);
            }
            if self.config.max_expansions.is_some_and(|max| self.expanded >= max) {
                warn!(
                    expanded = self.expanded,
                    open = self.open.len(),
                    "expansion limit reached before the goal"
                );
                return SearchOutcome::unfinished(SearchStatus::LimitReached, self.expanded);
            }
            self.add_neighbors(current);
        }

        SearchOutcome::unfinished(SearchStatus::NoRoute, self.expanded)
    }

    /// Straight-line distance from `node` to the goal.
    #[inline]
    fn h_value(&self, node: NodeId) -> f32 {
        self.model.position(node).distance(self.goal_pos)
    }

    /// Expand `current`: mark it visited and push its eligible neighbours.
    fn add_neighbors(&mut self, current: NodeId) {
        self.expanded += 1;
        let model = self.model;

        let cur = self.state.get_mut(current);
        cur.visited = true;
        cur.closed = true;
        let current_g = cur.g_value;

        trace!(node = %current, g = current_g, "expand");

        for neighbor in model.neighbors(current) {
            let g = current_g + model.distance(current, neighbor);
            let n = *self.state.get(neighbor);

            let take = match self.config.expansion {
                ExpansionPolicy::FirstDiscovery => !n.visited,
                ExpansionPolicy::Relaxing => !n.closed && g < n.g_value,
            };
            if !take {
                continue;
            }

            let h = if n.visited { n.h_value } else { self.h_value(neighbor) };
            let slot = self.state.get_mut(neighbor);
            slot.parent = Some(current);
            slot.g_value = g;
            slot.h_value = h;
            slot.visited = true;
            self.open.push(neighbor, g + h);
        }
    }

    /// Pop the open node with the lowest `f`, skipping entries superseded by
    /// a later relaxation.
    fn next_node(&mut self) -> Option<NodeId> {
        while let Some((node, f)) = self.open.pop() {
            let s = self.state.get(node);
            if s.closed || f > s.f_value() {
                continue;
            }
            return Some(node);
        }
        None
    }

    /// Follow `parent` links from `goal` back to the start.
    fn construct_final_path(&self, goal: NodeId) -> SearchOutcome {
        let mut path: Vec<Node> = Vec::new();
        let mut distance = 0.0f32;
        let mut cur = goal;

        path.push(self.model.node(cur));
        while let Some(parent) = self.state.parent(cur) {
            distance += self.model.distance(cur, parent);
            path.push(self.model.node(parent));
            cur = parent;
        }
        debug_assert_eq!(cur, self.start);

        path.reverse();
        SearchOutcome {
            status: SearchStatus::Found,
            path,
            distance: distance * self.model.metric_scale(),
            expanded: self.expanded,
        }
    }
}
