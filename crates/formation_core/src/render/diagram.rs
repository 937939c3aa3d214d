//! Diagram layout for one team at one phase.
//!
//! The core does not rasterize anything. It resolves where every marker and
//! caption goes on a canvas the size of the source frame, so any image backend
//! can draw the diagram without knowing about board coordinates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{PhaseFormation, PlayerId, Point, Rgb};

/// Inset of the pitch rectangle from the canvas edge, in pixels.
pub const PITCH_MARGIN: f64 = 100.0;

pub const BALL_COLOR: Rgb = Rgb([0, 0, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    Player { id: PlayerId, at: PixelPos, color: Rgb },
    Ball { at: PixelPos, color: Rgb },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiagramLayout {
    pub width: i64,
    pub height: i64,
    /// Top-left and bottom-right corners of the pitch outline.
    pub pitch: [PixelPos; 2],
    pub title: String,
    pub caption: String,
    pub markers: Vec<Marker>,
}

/// Maps a board point (0-100) into the pitch rectangle of the canvas.
pub fn board_to_pixel(point: Point, width: f64, height: f64) -> PixelPos {
    let span = |norm: f64, extent: f64| {
        (norm / 100.0 * (extent - 2.0 * PITCH_MARGIN) + PITCH_MARGIN) as i64
    };
    PixelPos {
        x: span(point.x, width),
        y: span(point.y, height),
    }
}

impl DiagramLayout {
    /// Players are only placed when the formation has a line grouping; the
    /// ball is placed whenever it was resolved.
    pub fn for_phase(formation: &PhaseFormation, width: f64, height: f64) -> Self {
        let mut markers: Vec<Marker> = if formation.lines.is_empty() {
            Vec::new()
        } else {
            formation
                .positions
                .iter()
                .map(|(id, p)| Marker::Player {
                    id: *id,
                    at: board_to_pixel(*p, width, height),
                    color: formation.team_color,
                })
                .collect()
        };

        if let Some(ball) = formation.ball {
            markers.push(Marker::Ball {
                at: board_to_pixel(ball, width, height),
                color: BALL_COLOR,
            });
        }

        let margin = PITCH_MARGIN as i64;
        Self {
            width: width as i64,
            height: height as i64,
            pitch: [
                PixelPos { x: margin, y: margin },
                PixelPos {
                    x: width as i64 - margin,
                    y: height as i64 - margin,
                },
            ],
            title: format!("Formation: {}", formation.label),
            caption: format!("Frame: {} ({})", formation.phase, formation.frame),
            markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineAssignment, Phase, PositionMap};

    #[test]
    fn test_board_to_pixel() {
        assert_eq!(
            board_to_pixel(Point::new(0.0, 100.0), 1920.0, 1080.0),
            PixelPos { x: 100, y: 980 }
        );
        // 50% of 1720 + 100 = 960; 25% of 880 + 100 = 320
        assert_eq!(
            board_to_pixel(Point::new(50.0, 25.0), 1920.0, 1080.0),
            PixelPos { x: 960, y: 320 }
        );
        // truncation, not rounding
        assert_eq!(board_to_pixel(Point::new(33.3, 0.0), 1000.0, 1000.0).x, 366);
    }

    #[test]
    fn test_layout_texts_and_markers() {
        let mut positions = PositionMap::new();
        positions.insert(PlayerId(9), Point::new(10.0, 50.0));
        let formation = PhaseFormation {
            phase: Phase::Middle,
            frame: 412,
            label: "4-4-2 (10 players)".to_string(),
            lines: LineAssignment(vec![vec![PlayerId(9)]]),
            positions,
            team_color: Rgb([10, 20, 30]),
            ball: Some(Point::new(90.0, 50.0)),
        };

        let layout = DiagramLayout::for_phase(&formation, 1920.0, 1080.0);
        assert_eq!(layout.title, "Formation: 4-4-2 (10 players)");
        assert_eq!(layout.caption, "Frame: Middle (412)");
        assert_eq!(layout.pitch[1], PixelPos { x: 1820, y: 980 });
        assert_eq!(layout.markers.len(), 2);
        assert!(matches!(
            layout.markers[0],
            Marker::Player { id: PlayerId(9), at: PixelPos { x: 272, y: 540 }, .. }
        ));
        assert!(matches!(layout.markers[1], Marker::Ball { color: BALL_COLOR, .. }));
    }

    #[test]
    fn test_unknown_formation_draws_ball_only() {
        let mut positions = PositionMap::new();
        positions.insert(PlayerId(3), Point::new(20.0, 40.0));
        positions.insert(PlayerId(4), Point::new(60.0, 40.0));
        let formation = PhaseFormation {
            phase: Phase::End,
            frame: 7,
            label: "2 players (unknown formation) (2 players)".to_string(),
            lines: LineAssignment::empty(),
            positions,
            team_color: Rgb([10, 20, 30]),
            ball: Some(Point::new(50.0, 50.0)),
        };

        let layout = DiagramLayout::for_phase(&formation, 1000.0, 1000.0);
        assert_eq!(layout.title, "Formation: 2 players (unknown formation) (2 players)");
        assert_eq!(layout.markers.len(), 1);
        assert!(matches!(
            layout.markers[0],
            Marker::Ball { at: PixelPos { x: 500, y: 500 }, .. }
        ));
    }
}
