//! Tracking input records.
//!
//! These mirror what the detection/tracking and team-assignment stages hand
//! over: one player snapshot and one ball snapshot per video frame. The engine
//! only ever reads them.

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::geometry::Point;

/// Key under which the tracker stores the single ball detection of a frame.
pub const BALL_ID: u32 = 1;

/// Fallback diagram color when no team color was assigned upstream.
pub const DEFAULT_TEAM_COLOR: Rgb = Rgb([255, 0, 0]);

/// Stable per-match player identifier assigned by the tracker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two teams on the pitch, serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamId {
    One,
    Two,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::One, TeamId::Two];

    pub fn number(self) -> u8 {
        match self {
            TeamId::One => 1,
            TeamId::Two => 2,
        }
    }
}

impl TryFrom<u8> for TeamId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamId::One),
            2 => Ok(TeamId::Two),
            other => Err(format!("team must be 1 or 2, got {other}")),
        }
    }
}

impl From<TeamId> for u8 {
    fn from(team: TeamId) -> Self {
        team.number()
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

impl JsonSchema for TeamId {
    fn schema_name() -> String {
        "TeamId".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <u8>::json_schema(gen)
    }
}

/// Pixel-space bounding box, serialized as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

impl From<[f64; 4]> for BBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl JsonSchema for BBox {
    fn schema_name() -> String {
        "BBox".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <[f64; 4]>::json_schema(gen)
    }
}

/// Team display color. Accepts fractional channels (cluster centers from
/// the color assigner) and stores them rounded and clamped to `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[u8; 3]")]
pub struct Rgb(pub [u8; 3]);

impl From<[f64; 3]> for Rgb {
    fn from(channels: [f64; 3]) -> Self {
        Rgb(channels.map(|c| c.round().clamp(0.0, 255.0) as u8))
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.0
    }
}

impl JsonSchema for Rgb {
    fn schema_name() -> String {
        "Rgb".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <[u8; 3]>::json_schema(gen)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerRecord {
    pub bbox: BBox,
    /// Missing until the team assigner has labelled the detection.
    #[serde(default)]
    pub team: Option<TeamId>,
    #[serde(default)]
    pub team_color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BallRecord {
    pub bbox: BBox,
}

pub type PlayerFrame = BTreeMap<PlayerId, PlayerRecord>;
pub type BallFrame = BTreeMap<u32, BallRecord>;

/// Full per-frame tracking history of one clip.
///
/// `ball` runs parallel to `players` but may be shorter; frames past its end
/// simply have no ball.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackHistory {
    pub players: Vec<PlayerFrame>,
    #[serde(default)]
    pub ball: Vec<BallFrame>,
}

impl TrackHistory {
    pub fn frame_count(&self) -> usize {
        self.players.len()
    }

    pub fn players_at(&self, frame: usize) -> Option<&PlayerFrame> {
        self.players.get(frame)
    }

    pub fn ball_at(&self, frame: usize) -> Option<&BallRecord> {
        self.ball.get(frame).and_then(|snapshot| snapshot.get(&BALL_ID))
    }

    /// Color of the first labelled player of `team` at `frame` (id order).
    pub fn team_color_at(&self, team: TeamId, frame: usize) -> Rgb {
        self.players_at(frame)
            .and_then(|snapshot| snapshot.values().find(|record| record.team == Some(team)))
            .and_then(|record| record.team_color)
            .unwrap_or(DEFAULT_TEAM_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tracker_snapshot() {
        let raw = json!({
            "players": [
                {
                    "7": { "bbox": [10.0, 20.0, 30.0, 60.0], "team": 1, "team_color": [12.4, 200.6, 300.0] },
                    "9": { "bbox": [0, 0, 4, 4] }
                }
            ],
            "ball": [ { "1": { "bbox": [100, 100, 110, 110] } } ]
        });

        let tracks: TrackHistory = serde_json::from_value(raw).unwrap();
        let frame = tracks.players_at(0).unwrap();
        let seven = &frame[&PlayerId(7)];
        assert_eq!(seven.team, Some(TeamId::One));
        assert_eq!(seven.team_color, Some(Rgb([12, 201, 255])));
        assert_eq!(seven.bbox.center(), Point::new(20.0, 40.0));
        assert_eq!(frame[&PlayerId(9)].team, None);
        assert_eq!(tracks.ball_at(0).unwrap().bbox.center(), Point::new(105.0, 105.0));
        assert!(tracks.ball_at(1).is_none());
    }

    #[test]
    fn test_invalid_team_is_rejected() {
        let raw = json!({ "players": [ { "3": { "bbox": [0, 0, 1, 1], "team": 3 } } ] });
        assert!(serde_json::from_value::<TrackHistory>(raw).is_err());
    }

    #[test]
    fn test_non_numeric_bbox_is_rejected() {
        let raw = json!({ "players": [ { "3": { "bbox": ["a", 0, 1, 1], "team": 1 } } ] });
        assert!(serde_json::from_value::<TrackHistory>(raw).is_err());
    }

    #[test]
    fn test_team_color_defaults_to_red() {
        let raw = json!({
            "players": [ { "4": { "bbox": [0, 0, 1, 1], "team": 2, "team_color": [0, 0, 255] } } ]
        });
        let tracks: TrackHistory = serde_json::from_value(raw).unwrap();
        assert_eq!(tracks.team_color_at(TeamId::Two, 0), Rgb([0, 0, 255]));
        assert_eq!(tracks.team_color_at(TeamId::One, 0), DEFAULT_TEAM_COLOR);
        assert_eq!(tracks.team_color_at(TeamId::Two, 5), DEFAULT_TEAM_COLOR);
    }
}
