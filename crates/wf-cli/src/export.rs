//! JSON export of the model's path sink for external viewers.
//!
//! ```json
//! { "distance_m": 1234.5, "nodes": [ { "node_id": 17, "x": 0.12, "y": 0.40 }, … ] }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use wf_model::Node;

#[derive(Serialize)]
struct ExportedPath {
    distance_m: f32,
    nodes:      Vec<ExportedNode>,
}

#[derive(Serialize)]
struct ExportedNode {
    node_id: u32,
    x:       f32,
    y:       f32,
}

pub fn path_json(path: &[Node], distance_m: f32) -> Result<String> {
    let exported = ExportedPath {
        distance_m,
        nodes: path
            .iter()
            .map(|n| ExportedNode { node_id: n.id.0, x: n.pos.x, y: n.pos.y })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&exported)?)
}

pub fn write_path(out: &Path, path: &[Node], distance_m: f32) -> Result<()> {
    let json = path_json(path, distance_m)?;
    std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))
}

#[cfg(test)]
mod tests {
    use wf_core::{NodeId, Point};
    use wf_model::Node;

    use super::path_json;

    #[test]
    fn shape() {
        let path = [
            Node { id: NodeId(0), pos: Point::new(0.0, 0.0) },
            Node { id: NodeId(3), pos: Point::new(0.0, 0.5) },
        ];
        let json: serde_json::Value = serde_json::from_str(&path_json(&path, 5.0).unwrap()).unwrap();
        assert_eq!(json["distance_m"], 5.0);
        assert_eq!(json["nodes"][1]["node_id"], 3);
        assert_eq!(json["nodes"][1]["y"], 0.5);
    }
}
