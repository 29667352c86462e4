//! `wf-model`: the road graph consumed by the search engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`model`]   | `RouteModel` (CSR + R-tree + path sink), `RouteModelBuilder`, `Node` |
//! | [`csv`]     | `load_from_csv`: node and road lists                        |
//! | [`osm`]     | `load_from_path`, `load_from_pbf`, `load_from_xml` (feature `"osm"`) |
//! | [`error`]   | `ModelError`, `ModelResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | OSM loading: PBF via `osmpbf`, XML via `quick-xml`.          |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod csv;
pub mod error;
pub mod model;

#[cfg(feature = "osm")]
pub mod osm;


pub use crate::csv::{load_from_csv, load_from_csv_paths};
pub use error::{ModelError, ModelResult};
pub use model::{Node, RouteModel, RouteModelBuilder};
