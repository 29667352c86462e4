//! Planar and geographic coordinate types.
//!
//! The search engine works exclusively in the **normalized plane**: every
//! node position lies in `[0, 1] × [0, 1]` and distances are plain Euclidean
//! distances in those units.  Converting to metres is a single multiplication
//! by the model's metric scale, applied once when a path is finalized.
//!
//! `GeoPoint` exists only for the map loaders, which need real-world
//! distances to derive that scale.

use std::fmt;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position in the normalized map plane, stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in normalized units.
    ///
    /// This is both the edge cost and the A* heuristic, which keeps the
    /// heuristic admissible and consistent: the straight line between two
    /// points never exceeds any polyline between them.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_2(other).sqrt()
    }

    /// Squared Euclidean distance, for comparisons without the `sqrt`.
    #[inline]
    pub fn distance_2(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Mean Earth radius in metres.
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Self::EARTH_RADIUS_M * c
    }

    /// Equirectangular projection to local metres around `origin`.
    ///
    /// Returns `(east_m, north_m)`.  Error stays well under 1 % across a
    /// city-sized extract, which is all the loaders ever project.
    pub fn project_m(self, origin: GeoPoint) -> (f64, f64) {
        let mean_lat = ((self.lat + origin.lat) * 0.5).to_radians();
        let east = (self.lon - origin.lon).to_radians() * mean_lat.cos() * Self::EARTH_RADIUS_M;
        let north = (self.lat - origin.lat).to_radians() * Self::EARTH_RADIUS_M;
        (east, north)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
