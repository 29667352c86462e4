//! Validated start/end coordinates.
//!
//! Callers give positions as **percentages of the map extent**, `0–100` on
//! each axis.  Values outside that closed range are rejected rather than
//! clamped, so a typo never silently routes from the map edge.

use std::fmt;
use std::str::FromStr;

use crate::{Axis, CoreError, CoreResult, Point};

/// A map position expressed as percentages of the map extent.
///
/// Only constructible through [`MapPercent::new`] (or `FromStr`), so holding
/// one proves both axes are within `[0, 100]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapPercent {
    x: f32,
    y: f32,
}

impl MapPercent {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;

    /// Validate and wrap a percentage pair.
    ///
    /// # Errors
    ///
    /// [`CoreError::CoordinateOutOfRange`] if either axis is below `0`,
    /// above `100`, or NaN.
    pub fn new(x: f32, y: f32) -> CoreResult<Self> {
        check_axis(Axis::X, x)?;
        check_axis(Axis::Y, y)?;
        Ok(Self { x, y })
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }

    /// Convert to the normalized `[0, 1]` plane used by the graph model.
    #[inline]
    pub fn normalized(self) -> Point {
        Point::new(self.x * 0.01, self.y * 0.01)
    }
}

fn check_axis(axis: Axis, value: f32) -> CoreResult<()> {
    // `contains` is false for NaN, so NaN is rejected here too.
    if (MapPercent::MIN..=MapPercent::MAX).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::CoordinateOutOfRange { axis, value })
    }
}

impl fmt::Display for MapPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Parses `"x y"` or `"x,y"`.
impl FromStr for MapPercent {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::Parse(format!(
                "invalid coordinate {s:?}: expected two numbers, e.g. \"10 90\""
            )));
        };

        let parse = |v: &str| {
            v.parse::<f32>()
                .map_err(|e| CoreError::Parse(format!("invalid number {v:?}: {e}")))
        };
        MapPercent::new(parse(x)?, parse(y)?)
    }
}
