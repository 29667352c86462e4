//! `wf-core`: foundational types for the `wayfinder` route planner.
//!
//! This crate is a dependency of every other `wf-*` crate.  It has no `wf-*`
//! dependencies and a single required external one (`thiserror`), plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `NodeId`                                                  |
//! | [`geo`]    | `Point` (normalized plane), `GeoPoint` (WGS-84, haversine) |
//! | [`input`]  | `MapPercent`: validated start/end coordinates             |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod input;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{Axis, CoreError, CoreResult};
pub use geo::{GeoPoint, Point};
pub use ids::NodeId;
pub use input::MapPercent;
