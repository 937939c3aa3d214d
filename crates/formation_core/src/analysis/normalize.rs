//! # Position Normalizer
//!
//! Maps pixel positions onto the 0-100 analysis board.
//!
//! 1. Each axis is scaled by its own frame dimension (aspect ratio is not kept).
//! 2. A squashed vertical spread (oblique camera) is stretched around the
//!    group mean and clamped to the configured band.
//! 3. The group is mirrored horizontally when its mean X is past the middle,
//!    so every team is drawn defending on the left.

use crate::config::PerspectiveConfig;
use crate::models::{mean_x, mean_y, Point, PositionMap};

pub const BOARD_SIZE: f64 = 100.0;
pub const BOARD_MID: f64 = BOARD_SIZE / 2.0;

/// Normalized positions plus the orientation decision that produced them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedPositions {
    pub positions: PositionMap,
    /// True when X was mirrored (`100 - x`).
    pub mirrored: bool,
}

/// Scales a single pixel point onto the board, clamped to `[0, 100]`.
pub fn scale_to_board(point: Point, frame_width: f64, frame_height: f64) -> Point {
    Point::new(
        (point.x / frame_width * BOARD_SIZE).clamp(0.0, BOARD_SIZE),
        (point.y / frame_height * BOARD_SIZE).clamp(0.0, BOARD_SIZE),
    )
}

pub fn mirror_x(point: Point) -> Point {
    Point::new(BOARD_SIZE - point.x, point.y)
}

/// Runs the three normalization steps. `frame_width` and `frame_height` must be
/// positive; callers validate them at the API boundary.
pub fn normalize_positions(
    positions: &PositionMap,
    frame_width: f64,
    frame_height: f64,
    perspective: &PerspectiveConfig,
) -> NormalizedPositions {
    debug_assert!(frame_width > 0.0 && frame_height > 0.0);

    if positions.is_empty() {
        return NormalizedPositions::default();
    }

    let mut normalized: PositionMap = positions
        .iter()
        .map(|(id, p)| (*id, scale_to_board(*p, frame_width, frame_height)))
        .collect();

    expand_depth(&mut normalized, perspective);

    let mirrored = mean_x(&normalized).is_some_and(|avg| avg > BOARD_MID);
    if mirrored {
        for p in normalized.values_mut() {
            *p = mirror_x(*p);
        }
    }

    NormalizedPositions {
        positions: normalized,
        mirrored,
    }
}

/// Perspective correction on the Y axis. Groups of fewer than two players are
/// left untouched.
fn expand_depth(positions: &mut PositionMap, perspective: &PerspectiveConfig) {
    if positions.len() < 2 {
        return;
    }

    let (min_y, max_y) = positions
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let range = max_y - min_y;
    if range >= perspective.compressed_range {
        return;
    }

    let Some(center) = mean_y(positions) else {
        return;
    };
    let factor = perspective.expansion_factor(range);

    for p in positions.values_mut() {
        p.y = (center + (p.y - center) * factor).clamp(perspective.clamp_min, perspective.clamp_max);
    }
}
