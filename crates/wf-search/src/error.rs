//! Search error type.

use thiserror::Error;

use wf_core::{CoreError, NodeId};
use wf_model::ModelError;

/// Errors produced by `wf-search`.
///
/// An exhausted open set is *not* an error for [`RoutePlanner`]; it is the
/// [`SearchStatus::NoRoute`] outcome.  Only the [`Router`] interface, which
/// must return a usable route or fail, maps it to [`SearchError::NoRoute`].
///
/// [`RoutePlanner`]: crate::RoutePlanner
/// [`SearchStatus::NoRoute`]: crate::SearchStatus::NoRoute
/// [`Router`]: crate::Router
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("gave up routing {from} to {to} after expanding {expanded} nodes")]
    LimitReached { from: NodeId, to: NodeId, expanded: usize },
}

pub type SearchResult<T> = Result<T, SearchError>;
