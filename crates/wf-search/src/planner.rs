//! Route planner facade: map-percentage input, model path sink, distance.

use tracing::debug;

use wf_core::{MapPercent, NodeId};
use wf_model::{ModelError, Node, RouteModel};

use crate::{SearchConfig, SearchOutcome, SearchResult, SearchStatus, astar};

/// Plans one route over a [`RouteModel`] between two map positions.
///
/// Construction resolves both positions to their nearest graph nodes;
/// [`search`](Self::search) runs A* and writes the resulting path into the
/// model's path sink for downstream consumers (rendering, export).
///
/// The planner holds the model mutably only for that write.  All search
/// bookkeeping lives in a per-search table, so a model can be planned on
/// again without any reset.
///
/// # Example
///
/// ```rust,ignore
/// let start = MapPercent::new(10.0, 10.0)?;
/// let end   = MapPercent::new(90.0, 90.0)?;
/// let mut planner = RoutePlanner::new(&mut model, start, end, SearchConfig::default())?;
/// if planner.search() == SearchStatus::Found {
///     println!("Distance: {} meters.", planner.distance());
/// }
/// ```
pub struct RoutePlanner<'m> {
    model:      &'m mut RouteModel,
    config:     SearchConfig,
    start_node: NodeId,
    end_node:   NodeId,
    outcome:    Option<SearchOutcome>,
}

impl<'m> RoutePlanner<'m> {
    /// Resolve `start` and `end` to their closest nodes in `model`.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyGraph`] (wrapped in `SearchError::Model`) if the
    /// model has no nodes.
    pub fn new(
        model:  &'m mut RouteModel,
        start:  MapPercent,
        end:    MapPercent,
        config: SearchConfig,
    ) -> SearchResult<Self> {
        let start_node = model
            .closest_node(start.normalized())
            .ok_or(ModelError::EmptyGraph)?;
        let end_node = model
            .closest_node(end.normalized())
            .ok_or(ModelError::EmptyGraph)?;

        debug!(%start, %end, %start_node, %end_node, "resolved route endpoints");

        Ok(Self {
            model,
            config,
            start_node,
            end_node,
            outcome: None,
        })
    }

    /// Like [`new`](Self::new), validating raw percentages first.
    ///
    /// # Errors
    ///
    /// `SearchError::InvalidInput` if any coordinate is outside `[0, 100]`;
    /// otherwise as [`new`](Self::new).
    pub fn from_percentages(
        model:   &'m mut RouteModel,
        start_x: f32,
        start_y: f32,
        end_x:   f32,
        end_y:   f32,
        config:  SearchConfig,
    ) -> SearchResult<Self> {
        let start = MapPercent::new(start_x, start_y)?;
        let end = MapPercent::new(end_x, end_y)?;
        Self::new(model, start, end, config)
    }

    /// Run the search to completion.
    ///
    /// On `Found` the model's path sink holds the route, start first.
    /// Otherwise the sink is cleared and [`distance`](Self::distance) is 0.
    /// Calling again repeats the identical search.
    pub fn search(&mut self) -> SearchStatus {
        let outcome = astar(&*self.model, self.start_node, self.end_node, &self.config);
        let status = outcome.status;

        self.model.set_path(outcome.path.clone());
        self.outcome = Some(outcome);

        status
    }

    /// Total route length in physical units.  0 before a search and unless
    /// the last one was `Found`; check [`status`](Self::status) to tell a
    /// zero-length route apart.
    pub fn distance(&self) -> f32 {
        self.outcome.as_ref().map_or(0.0, |o| o.distance)
    }

    /// `None` until [`search`](Self::search) has run.
    pub fn status(&self) -> Option<SearchStatus> {
        self.outcome.as_ref().map(|o| o.status)
    }

    /// Full result of the last search, `None` until one has run.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// The route stored in the model's path sink.
    pub fn path(&self) -> &[Node] {
        self.model.path()
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    /// Nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.outcome.as_ref().map_or(0, |o| o.expanded)
    }
}
