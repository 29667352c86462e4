//! Search configuration.
//!
//! The defaults reproduce the reference engine exactly: discovery-time
//! visiting and last-inserted-wins tie-breaking.  Both can be switched
//! per search without touching the model.

/// Which open-set entry wins when several share the lowest `f = g + h`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// The most recently inserted node is selected.
    #[default]
    LastInserted,
    /// The earliest inserted node is selected.
    FirstInserted,
}

/// How a node's cost is assigned when it is reached more than once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExpansionPolicy {
    /// A node is marked visited the first time it is discovered.  Its
    /// `g_value`, `h_value` and `parent` are final from then on, even if a
    /// cheaper predecessor is expanded later.
    ///
    /// Not guaranteed optimal: when two discovery paths differ in cost, the
    /// first one wins regardless.
    #[default]
    FirstDiscovery,
    /// Textbook A*: a discovered node whose cost improves through a later
    /// predecessor is updated and re-queued.  Optimal with the Euclidean
    /// heuristic.
    Relaxing,
}

/// Tuning knobs for one search.
///
/// Typically built in code or loaded from a JSON file by the application.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub tie_break: TieBreak,

    pub expansion: ExpansionPolicy,

    /// Stop with `LimitReached` after expanding this many nodes.  `None` runs
    /// until the goal is reached or the open set is exhausted.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Textbook, always-optimal A*.
    pub fn optimal() -> Self {
        Self { expansion: ExpansionPolicy::Relaxing, ..Self::default() }
    }
}
