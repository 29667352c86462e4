//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use std::fmt;

use thiserror::Error;

/// Which coordinate axis a validation failure refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{axis} coordinate {value} is outside the valid range 0 to 100")]
    CoordinateOutOfRange { axis: Axis, value: f32 },

    #[error("parse error: {0}")]
    Parse(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
