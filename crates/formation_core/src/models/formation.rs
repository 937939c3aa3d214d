//! Engine output types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::{Point, PositionMap};
use super::track::{PlayerId, Rgb, TeamId};

/// Label used when a team has no detections at the analysed frame.
pub const NO_PLAYERS_LABEL: &str = "No players detected";

/// Players grouped into depth lines.
///
/// Line 0 is the deepest (goalkeeper side); each line lists its players by
/// ascending lateral position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct LineAssignment(pub Vec<Vec<PlayerId>>);

impl LineAssignment {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Players in `line`, empty if the line does not exist.
    pub fn line(&self, line: usize) -> &[PlayerId] {
        self.0.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn lines(&self) -> impl Iterator<Item = &[PlayerId]> {
        self.0.iter().map(Vec::as_slice)
    }

    pub fn counts(&self) -> Vec<usize> {
        self.0.iter().map(Vec::len).collect()
    }

    pub fn player_count(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

/// Label plus line grouping chosen by the formation matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormationMatch {
    pub label: String,
    pub lines: LineAssignment,
}

impl FormationMatch {
    pub fn no_players() -> Self {
        Self {
            label: NO_PLAYERS_LABEL.to_string(),
            lines: LineAssignment::empty(),
        }
    }
}

/// Match checkpoint a formation is sampled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Phase {
    Start,
    Middle,
    End,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Start, Phase::Middle, Phase::End];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Start => "Start",
            Phase::Middle => "Middle",
            Phase::End => "End",
        }
    }

    /// Lower-cased label used in artifact file names.
    pub fn slug(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Middle => "middle",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Formation of one team at one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PhaseFormation {
    pub phase: Phase,
    /// Absolute frame index the formation was computed from.
    pub frame: usize,
    pub label: String,
    pub lines: LineAssignment,
    /// Normalized positions of every player detected at `frame`.
    pub positions: PositionMap,
    pub team_color: Rgb,
    /// Normalized ball position in the same orientation as `positions`.
    pub ball: Option<Point>,
}

impl PhaseFormation {
    pub fn detected_players(&self) -> usize {
        self.positions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamReport {
    pub team: TeamId,
    pub phases: Vec<PhaseFormation>,
}

impl TeamReport {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseFormation> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}
