//! 2D points and per-player position maps.
//!
//! ## Coordinate Systems
//!
//! **Pixel** (tracker output): origin top-left, X right, Y down, bounded by
//! the frame size.
//!
//! **Normalized** (engine output): both axes scaled to 0-100. After
//! orientation canonicalization X is the depth axis (0 = own goal side) and Y
//! is the lateral axis.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::track::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Player id -> position. Ordered so iteration and output are reproducible.
pub type PositionMap = BTreeMap<PlayerId, Point>;

/// Arithmetic mean of the X coordinates, `None` for an empty map.
pub fn mean_x(positions: &PositionMap) -> Option<f64> {
    mean(positions.values().map(|p| p.x))
}

/// Arithmetic mean of the Y coordinates, `None` for an empty map.
pub fn mean_y(positions: &PositionMap) -> Option<f64> {
    mean(positions.values().map(|p| p.y))
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    Some(values.sum::<f64>() / n as f64)
}
