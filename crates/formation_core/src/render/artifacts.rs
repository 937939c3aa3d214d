//! Image artifact names.
//!
//! Downstream retrieval looks the images up by these exact file names, so
//! they must not change.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{Phase, TeamId};

pub fn team_diagram_name(team: TeamId, phase: Phase) -> String {
    format!("team{}_formation_{}.png", team.number(), phase.slug())
}

pub fn comparison_name(phase: Phase) -> String {
    format!("formations_comparison_{}.png", phase.slug())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    /// One team's diagram for one phase.
    TeamDiagram {
        file_name: String,
        team: TeamId,
        phase: Phase,
    },
    /// Both teams' diagrams of one phase concatenated left to right, team one first.
    Comparison { file_name: String, phase: Phase },
}

impl Artifact {
    pub fn file_name(&self) -> &str {
        match self {
            Artifact::TeamDiagram { file_name, .. } | Artifact::Comparison { file_name, .. } => {
                file_name
            }
        }
    }
}

/// Every artifact of a match: six team diagrams, then three comparisons.
pub fn match_artifacts() -> Vec<Artifact> {
    let diagrams = TeamId::ALL.into_iter().flat_map(|team| {
        Phase::ALL.into_iter().map(move |phase| Artifact::TeamDiagram {
            file_name: team_diagram_name(team, phase),
            team,
            phase,
        })
    });
    let comparisons = Phase::ALL.into_iter().map(|phase| Artifact::Comparison {
        file_name: comparison_name(phase),
        phase,
    });
    diagrams.chain(comparisons).collect()
}
