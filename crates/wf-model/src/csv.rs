//! CSV graph loader.
//!
//! # CSV format
//!
//! Two files: one row per node, one row per undirected road.
//!
//! ```csv
//! node_id,x,y
//! 0,0.0,0.0
//! 1,1.0,0.0
//! 2,1.0,1.0
//! ```
//!
//! ```csv
//! from,to
//! 0,1
//! 1,2
//! ```
//!
//! Node positions are already normalized (`[0, 1]` on each axis); the
//! caller supplies the metric scale, which must be finite and positive.
//! Node ids must cover `0..n` exactly, in any row order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use wf_core::{NodeId, Point};

use crate::ModelError;
use crate::model::{RouteModel, RouteModelBuilder};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id: u32,
    x:       f32,
    y:       f32,
}

#[derive(Deserialize)]
struct RoadRecord {
    from: u32,
    to:   u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a model from a nodes CSV file and a roads CSV file.
pub fn load_from_csv_paths(
    nodes: &Path,
    roads: &Path,
    metric_scale: f32,
) -> Result<RouteModel, ModelError> {
    let nodes = std::fs::File::open(nodes)?;
    let roads = std::fs::File::open(roads)?;
    load_from_csv(nodes, roads, metric_scale)
}

/// Like [`load_from_csv_paths`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded map data.
pub fn load_from_csv<N: Read, R: Read>(
    nodes: N,
    roads: R,
    metric_scale: f32,
) -> Result<RouteModel, ModelError> {
    if !(metric_scale.is_finite() && metric_scale > 0.0) {
        return Err(ModelError::Parse(format!(
            "metric scale must be a positive number of metres, got {metric_scale}"
        )));
    }

    // ── Nodes: collect, then place by id ──────────────────────────────────
    let mut rows: Vec<NodeRecord> = ::csv::Reader::from_reader(nodes)
        .deserialize::<NodeRecord>()
        .collect::<Result<_, _>>()
        .map_err(|e| ModelError::Parse(e.to_string()))?;
    rows.sort_unstable_by_key(|r| r.node_id);

    let mut builder = RouteModelBuilder::with_capacity(rows.len(), rows.len() * 2);
    builder.set_metric_scale(metric_scale);
    for (expected, row) in rows.iter().enumerate() {
        if row.node_id as usize != expected {
            return Err(ModelError::Parse(format!(
                "node ids must be dense 0..{}: expected {expected}, found {}",
                rows.len(),
                row.node_id
            )));
        }
        builder.add_node(Point::new(row.x, row.y));
    }

    // ── Roads ─────────────────────────────────────────────────────────────
    let node_count = builder.node_count() as u32;
    let mut road_count = 0usize;
    for result in ::csv::Reader::from_reader(roads).deserialize::<RoadRecord>() {
        let road = result.map_err(|e| ModelError::Parse(e.to_string()))?;
        for id in [road.from, road.to] {
            if id >= node_count {
                return Err(ModelError::Parse(format!(
                    "road {}-{} references unknown node {id}",
                    road.from, road.to
                )));
            }
        }
        builder.add_road(NodeId(road.from), NodeId(road.to));
        road_count += 1;
    }

    debug!(nodes = node_count, roads = road_count, "loaded CSV road graph");
    Ok(builder.build())
}
