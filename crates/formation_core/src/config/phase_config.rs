//! Phase candidate windows and ball orientation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PhaseConfig {
    /// Candidate frames at the start and at the end of the clip (default: 50)
    pub edge_window: usize,
    /// Candidate frames on each side of the clip midpoint (default: 25)
    pub middle_half_window: usize,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            edge_window: 50,
            middle_half_window: 25,
        }
    }
}

/// How the ball position is oriented relative to the team diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BallMirror {
    /// Observed behavior of the original pipeline: the ball is only placed
    /// when the team's normalized mean X is below 50, and its X is then
    /// always mirrored regardless of whether the players were.
    #[default]
    Reference,
    /// Mirror the ball exactly when the team's players were mirrored.
    FollowTeam,
}
