//! JSON API for formation analysis
//!
//! Takes the tracker output of one clip, runs the engine for both teams and
//! returns a report the renderer and downstream retrieval can consume.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::PhaseAnalyzer;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{Phase, TeamId, TeamReport, TrackHistory};
use crate::render::{match_artifacts, team_diagram_name, Artifact, DiagramLayout};
use crate::SCHEMA_VERSION;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct AnalyzeRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub frame_width: f64,
    pub frame_height: f64,
    pub tracks: TrackHistory,
    /// Overrides the environment/default configuration for this request
    #[serde(default)]
    pub config: Option<AnalyzerConfig>,
}

/// Render-ready diagram of one team at one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamDiagram {
    pub team: TeamId,
    pub phase: Phase,
    pub file_name: String,
    pub layout: DiagramLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchReport {
    pub schema_version: u8,
    pub frame_count: usize,
    pub frame_width: f64,
    pub frame_height: f64,
    pub teams: Vec<TeamReport>,
    pub diagrams: Vec<TeamDiagram>,
    pub artifacts: Vec<Artifact>,
}

impl MatchReport {
    pub fn team(&self, team: TeamId) -> Option<&TeamReport> {
        self.teams.iter().find(|t| t.team == team)
    }

    /// One human-readable line per team and phase, e.g. `Team 1 Start: 4-4-2 (frame 12)`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.teams
            .iter()
            .flat_map(|report| {
                report.phases.iter().map(move |p| {
                    format!("{} {}: {} (frame {})", report.team, p.phase, p.label, p.frame)
                })
            })
            .collect()
    }
}

/// Runs the engine over a parsed track history.
pub fn analyze_tracks(
    tracks: &TrackHistory,
    frame_width: f64,
    frame_height: f64,
    config: &AnalyzerConfig,
) -> Result<MatchReport> {
    config.validate()?;
    let analyzer = PhaseAnalyzer::new(tracks, frame_width, frame_height, config)?;

    info!(
        frames = tracks.frame_count(),
        frame_width, frame_height, "analysing formations"
    );

    let teams = analyzer.analyze_match();

    let diagrams = teams
        .iter()
        .flat_map(|report| {
            report.phases.iter().map(move |p| TeamDiagram {
                team: report.team,
                phase: p.phase,
                file_name: team_diagram_name(report.team, p.phase),
                layout: DiagramLayout::for_phase(p, frame_width, frame_height),
            })
        })
        .collect();

    Ok(MatchReport {
        schema_version: SCHEMA_VERSION,
        frame_count: tracks.frame_count(),
        frame_width,
        frame_height,
        teams,
        diagrams,
        artifacts: match_artifacts(),
    })
}

pub fn analyze_request(request: &AnalyzeRequest) -> Result<MatchReport> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(AnalysisError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let config = match &request.config {
        Some(config) => config.clone(),
        None => AnalyzerConfig::from_env()?,
    };

    analyze_tracks(&request.tracks, request.frame_width, request.frame_height, &config)
}

/// JSON in, JSON out. Identical input strings produce identical output strings.
pub fn analyze_tracks_json(request_json: &str) -> Result<String> {
    let request: AnalyzeRequest = serde_json::from_str(request_json)?;
    let report = analyze_request(&request)?;
    serde_json::to_string(&report).map_err(|e| AnalysisError::Serialization(e.to_string()))
}

pub fn request_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(AnalyzeRequest)).unwrap_or_default()
}

pub fn report_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(MatchReport)).unwrap_or_default()
}
