//! OSM map loaders (PBF and XML): enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use wf_model::osm::{LoadOptions, load_from_path};
//!
//! // `.pbf` files go through `osmpbf`; anything else is read as OSM XML.
//! let model = load_from_path(Path::new("map.osm"), &LoadOptions::default())?;
//! ```
//!
//! # What is loaded
//!
//! Only routable `highway=*` ways are included (see [`is_routable`]).
//! Buildings, POIs, relations and `area=yes` highways are ignored.  Every
//! way is loaded as undirected: `oneway` tags are not modelled.
//!
//! # Normalization
//!
//! Road nodes are projected to local metres (equirectangular around the
//! south-west corner of their bounding box) and divided by the larger of
//! the two extents, so positions land in `[0, 1]` with the aspect ratio
//! preserved.  That extent becomes the model's metric scale.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use osmpbf::{Element, ElementReader};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use wf_core::{GeoPoint, NodeId, Point};

use crate::ModelError;
use crate::model::{RouteModel, RouteModelBuilder};

// ── Options ───────────────────────────────────────────────────────────────────

/// Which ways the loader turns into roads.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadOptions {
    /// Include pedestrian-only ways (`footway`, `path`, `steps`, …).
    /// Default: `false`.
    pub include_footways: bool,
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Load a road model from `path`, choosing the format by extension:
/// `.pbf` is read as OSM PBF, everything else as OSM XML.
pub fn load_from_path(path: &Path, options: &LoadOptions) -> Result<RouteModel, ModelError> {
    let is_pbf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pbf"));
    if is_pbf {
        load_from_pbf(path, options)
    } else {
        load_from_xml(path, options)
    }
}

/// Load a road model from an OSM PBF file.
///
/// # Errors
///
/// Returns [`ModelError::Osm`] on parse errors and [`ModelError::EmptyGraph`]
/// if the file contains no routable ways.
pub fn load_from_pbf(path: &Path, options: &LoadOptions) -> Result<RouteModel, ModelError> {
    let reader = ElementReader::from_path(path).map_err(|e| ModelError::Osm(e.to_string()))?;

    let mut raw = RawMap::default();
    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                raw.nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                raw.nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                if is_road(&tags, options) {
                    raw.ways.push(w.refs().collect());
                }
            }
            _ => {}
        })
        .map_err(|e| ModelError::Osm(e.to_string()))?;

    raw.build()
}

/// Load a road model from an OSM XML file (`.osm`).
///
/// # Errors
///
/// As [`load_from_pbf`]; a missing file is [`ModelError::Io`].
pub fn load_from_xml(path: &Path, options: &LoadOptions) -> Result<RouteModel, ModelError> {
    let file = File::open(path)?;
    load_from_xml_reader(BufReader::new(file), options)
}

/// Like [`load_from_xml`] but reads from any buffered source.
pub fn load_from_xml_reader<R: BufRead>(
    input: R,
    options: &LoadOptions,
) -> Result<RouteModel, ModelError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut raw = RawMap::default();
    // The way currently open: its node refs and tags.
    let mut way: Option<(Vec<i64>, Vec<(String, String)>)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) if e.name().as_ref() == b"way" => {
                way = Some((Vec::new(), Vec::new()));
            }
            // A self-closing `<way/>` has no refs and lands in the catch-all.
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"node" => {
                    let id: i64 = parse_attr(&e, "id")?;
                    let lat: f64 = parse_attr(&e, "lat")?;
                    let lon: f64 = parse_attr(&e, "lon")?;
                    raw.nodes.insert(id, GeoPoint::new(lat, lon));
                }
                b"nd" => {
                    if let Some((refs, _)) = way.as_mut() {
                        refs.push(parse_attr(&e, "ref")?);
                    }
                }
                b"tag" => {
                    if let Some((_, tags)) = way.as_mut() {
                        let k = attr(&e, "k")?.unwrap_or_default();
                        let v = attr(&e, "v")?.unwrap_or_default();
                        tags.push((k, v));
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"way" => {
                if let Some((refs, tags)) = way.take() {
                    let tags: Vec<(&str, &str)> =
                        tags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                    if is_road(&tags, options) {
                        raw.ways.push(refs);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    raw.build()
}

// ── Graph assembly ────────────────────────────────────────────────────────────

/// OSM nodes and road ways as read from a file, before normalization.
#[derive(Default)]
struct RawMap {
    nodes: HashMap<i64, GeoPoint>,
    ways:  Vec<Vec<i64>>,
}

impl RawMap {
    fn build(self) -> Result<RouteModel, ModelError> {
        let RawMap { nodes, ways } = self;

        // Road-referenced node ids, sorted for stable NodeIds.
        let mut road_node_ids: Vec<i64> = ways
            .iter()
            .flatten()
            .copied()
            .filter(|id| nodes.contains_key(id))
            .collect();
        road_node_ids.sort_unstable();
        road_node_ids.dedup();

        if road_node_ids.is_empty() {
            return Err(ModelError::EmptyGraph);
        }

        let geo: Vec<GeoPoint> = road_node_ids.iter().map(|id| nodes[id]).collect();
        drop(nodes);

        let (points, metric_scale) = normalize(&geo);

        let mut builder = RouteModelBuilder::with_capacity(points.len(), points.len() * 2);
        let mut osm_to_wf: HashMap<i64, NodeId> = HashMap::with_capacity(points.len());
        for (osm_id, pos) in road_node_ids.iter().zip(points) {
            osm_to_wf.insert(*osm_id, builder.add_node(pos));
        }

        // Roads from consecutive way nodes.
        for way in &ways {
            for window in way.windows(2) {
                if let (Some(&a), Some(&b)) = (osm_to_wf.get(&window[0]), osm_to_wf.get(&window[1])) {
                    builder.add_road(a, b);
                }
            }
        }

        debug!(
            nodes = builder.node_count(),
            ways = ways.len(),
            metric_scale,
            "loaded OSM road graph"
        );
        Ok(builder.metric_scale(metric_scale).build())
    }
}

// ── XML attribute helpers ─────────────────────────────────────────────────────

fn xml_error(e: impl std::fmt::Display) -> ModelError {
    ModelError::Osm(e.to_string())
}

fn attr(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, ModelError> {
    for a in e.attributes() {
        let a = a.map_err(xml_error)?;
        if a.key.as_ref() == key.as_bytes() {
            return Ok(Some(a.unescape_value().map_err(xml_error)?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_attr<T: FromStr>(e: &BytesStart<'_>, key: &str) -> Result<T, ModelError> {
    let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let value = attr(e, key)?
        .ok_or_else(|| ModelError::Osm(format!("<{element}> is missing `{key}`")))?;
    value
        .parse()
        .map_err(|_| ModelError::Osm(format!("<{element}> has invalid `{key}`: {value:?}")))
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Project `geo` into the unit square, returning the positions and the
/// metres-per-unit scale.
pub(crate) fn normalize(geo: &[GeoPoint]) -> (Vec<Point>, f32) {
    let min_lat = geo.iter().map(|p| p.lat).fold(f64::INFINITY, f64::min);
    let min_lon = geo.iter().map(|p| p.lon).fold(f64::INFINITY, f64::min);
    let origin = GeoPoint::new(min_lat, min_lon);

    let projected: Vec<(f64, f64)> = geo.iter().map(|p| p.project_m(origin)).collect();
    let min_e = projected.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let min_n = projected.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_e = projected.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let max_n = projected.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    // A single-point extract has zero extent; any positive scale works.
    let extent = (max_e - min_e).max(max_n - min_n);
    let extent = if extent > 0.0 { extent } else { 1.0 };

    let points = projected
        .into_iter()
        .map(|(e, n)| Point::new(((e - min_e) / extent) as f32, ((n - min_n) / extent) as f32))
        .collect();
    (points, extent as f32)
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

fn is_road(tags: &[(&str, &str)], options: &LoadOptions) -> bool {
    let Some(highway) = tags.iter().find(|(k, _)| *k == "highway").map(|(_, v)| *v) else {
        return false;
    };
    let is_area = tags.iter().any(|(k, v)| *k == "area" && *v == "yes");
    !is_area && is_routable(highway, options.include_footways)
}

/// Whether a `highway` value becomes a road in the model.
///
/// Construction sites, proposals and platforms are never routable.
/// Pedestrian-only classes are routable only when `include_footways` is set.
pub fn is_routable(highway: &str, include_footways: bool) -> bool {
    match highway {
        "construction" | "proposed" | "platform" | "bus_stop" | "elevator" => false,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "bridleway"
        | "corridor" => include_footways,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use wf_core::{GeoPoint, NodeId};

    use super::{LoadOptions, is_routable, load_from_xml_reader, normalize};
    use crate::ModelError;

    /// Three road nodes on a residential way, a footway spur to node 4, and
    /// a building outline that must not become a road.
    const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="hand">
  <bounds minlat="30.00" minlon="-88.00" maxlat="30.01" maxlon="-87.99"/>
  <node id="30" lat="30.000" lon="-88.000"/>
  <node id="10" lat="30.000" lon="-87.990"/>
  <node id="20" lat="30.010" lon="-87.990"/>
  <node id="40" lat="30.005" lon="-87.995"/>
  <node id="50" lat="30.009" lon="-88.000"/>
  <way id="1">
    <nd ref="30"/>
    <nd ref="10"/>
    <nd ref="20"/>
    <tag k="highway" v="residential"/>
    <tag k="name" v="Dauphin &amp; Royal"/>
  </way>
  <way id="2">
    <nd ref="20"/>
    <nd ref="40"/>
    <tag k="highway" v="footway"/>
  </way>
  <way id="3">
    <nd ref="50"/>
    <nd ref="30"/>
    <tag k="building" v="yes"/>
  </way>
  <way id="4"/>
</osm>
"#;

    #[test]
    fn xml_loads_routable_ways_only() {
        let model = load_from_xml_reader(Cursor::new(MAP), &LoadOptions::default()).unwrap();
        // OSM ids 10, 20, 30 sorted → NodeId 0, 1, 2.
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.edge_count(), 2);
        assert_eq!(model.neighbors(NodeId(0)).collect::<Vec<_>>(), vec![NodeId(1), NodeId(2)]);
        assert!(model.metric_scale() > 1_000.0);
    }

    #[test]
    fn xml_footways_follow_option() {
        let options = LoadOptions { include_footways: true };
        let model = load_from_xml_reader(Cursor::new(MAP), &options).unwrap();
        assert_eq!(model.node_count(), 4);
        assert_eq!(model.edge_count(), 3);
    }

    #[test]
    fn xml_without_roads_is_empty() {
        let map = r#"<osm><node id="1" lat="0" lon="0"/></osm>"#;
        let err = load_from_xml_reader(Cursor::new(map), &LoadOptions::default()).err().unwrap();
        assert!(matches!(err, ModelError::EmptyGraph));
    }

    #[test]
    fn xml_bad_coordinate_rejected() {
        let map = r#"<osm><node id="1" lat="north" lon="0"/></osm>"#;
        let err = load_from_xml_reader(Cursor::new(map), &LoadOptions::default()).err().unwrap();
        assert!(matches!(err, ModelError::Osm(ref m) if m.contains("lat")), "{err}");
    }

    #[test]
    fn footways_gated_by_option() {
        assert!(is_routable("residential", false));
        assert!(!is_routable("footway", false));
        assert!(is_routable("footway", true));
        assert!(!is_routable("construction", true));
    }

    #[test]
    fn normalize_fits_unit_square() {
        let geo = [
            GeoPoint::new(30.00, -88.00),
            GeoPoint::new(30.01, -88.00),
            GeoPoint::new(30.00, -87.98),
        ];
        let (points, scale) = normalize(&geo);
        for p in &points {
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y), "{p}");
        }
        // The east-west extent (~1.9 km) is the larger one.
        assert!((scale - 1_925.0).abs() < 20.0, "got {scale}");
        // Metric distance survives the round trip through the scale.
        let d = points[0].distance(points[1]) * scale;
        assert!((d as f64 - geo[0].distance_m(geo[1])).abs() < 5.0);
    }

    #[test]
    fn single_point_has_unit_scale() {
        let (points, scale) = normalize(&[GeoPoint::new(1.0, 1.0)]);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(scale, 1.0);
    }
}
