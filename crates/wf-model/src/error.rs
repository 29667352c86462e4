//! Graph-model error type.

use thiserror::Error;

use wf_core::NodeId;

/// Errors produced by `wf-model`.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("node {0} not found in model")]
    NodeNotFound(NodeId),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
