//! `wf-search`: A* shortest-path search over a [`RouteModel`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`config`]   | `SearchConfig`, `TieBreak`, `ExpansionPolicy`              |
//! | [`state`]    | `NodeState`, `SearchState`: per-search node bookkeeping    |
//! | [`open_set`] | `OpenSet`: min-heap on `f = g + h` with insertion stamps   |
//! | [`astar`]    | `astar`, `SearchOutcome`, `SearchStatus`                   |
//! | [`planner`]  | `RoutePlanner`: percentage input, path sink, distance      |
//! | [`router`]   | `Router` trait, `Route`, `AStarRouter`, `DijkstraRouter`   |
//! | [`error`]    | `SearchError`, `SearchResult<T>`                           |
//!
//! # Search state
//!
//! Per-node search fields (`visited`, `g_value`, `h_value`, `parent`) live
//! in a [`SearchState`] owned by one search, never on the model.  The model
//! is borrowed immutably while the search runs, so repeated searches on the
//! same model need no reset and cannot observe each other's state.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and result types. |
//!
//! [`RouteModel`]: wf_model::RouteModel

pub mod astar;
pub mod config;
pub mod error;
pub mod open_set;
pub mod planner;
pub mod router;
pub mod state;


pub use astar::{SearchOutcome, SearchStatus, astar};
pub use config::{ExpansionPolicy, SearchConfig, TieBreak};
pub use error::{SearchError, SearchResult};
pub use open_set::OpenSet;
pub use planner::RoutePlanner;
pub use router::{AStarRouter, DijkstraRouter, Route, Router};
pub use state::{NodeState, SearchState};
