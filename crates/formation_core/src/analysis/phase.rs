//! # Phase Orchestrator
//!
//! Runs frame selection, roster aggregation, normalization and formation
//! matching for each team at the start, middle and end of a clip.
//!
//! Every team/phase job only reads the shared track history and allocates its
//! own intermediate maps, so the six jobs can run on the rayon pool without
//! changing the result.

use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{AnalyzerConfig, BallMirror, PhaseConfig};
use crate::error::{AnalysisError, Result};
use crate::models::{mean_x, Phase, PhaseFormation, Point, TeamId, TeamReport, TrackHistory};

use super::frame_selector::best_frame;
use super::matcher::FormationMatcher;
use super::normalize::{mirror_x, normalize_positions, scale_to_board, NormalizedPositions, BOARD_MID};
use super::roster::player_positions;

/// Candidate frame ranges for the three phases of a clip of `total` frames.
pub fn phase_windows(total: usize, config: &PhaseConfig) -> [(Phase, Range<usize>); 3] {
    let mid = total / 2;
    let half = config.middle_half_window;
    [
        (Phase::Start, 0..config.edge_window.min(total)),
        (
            Phase::Middle,
            mid.saturating_sub(half)..mid.saturating_add(half).min(total),
        ),
        (Phase::End, total.saturating_sub(config.edge_window)..total),
    ]
}

/// Normalized ball position at `frame`, oriented per `policy`.
pub fn resolve_ball(
    tracks: &TrackHistory,
    frame: usize,
    team: &NormalizedPositions,
    frame_width: f64,
    frame_height: f64,
    policy: BallMirror,
) -> Option<Point> {
    let ball = tracks.ball_at(frame)?;
    let scaled = scale_to_board(ball.bbox.center(), frame_width, frame_height);

    match policy {
        BallMirror::Reference => {
            let team_mean = mean_x(&team.positions)?;
            if team_mean >= BOARD_MID {
                return None;
            }
            if !team.mirrored {
                // Players kept their orientation but the ball is flipped anyway.
                debug!(frame, "ball mirrored independently of its team");
            }
            Some(mirror_x(scaled))
        }
        BallMirror::FollowTeam => Some(if team.mirrored { mirror_x(scaled) } else { scaled }),
    }
}

/// Drives the engine over one clip.
#[derive(Debug, Clone, Copy)]
pub struct PhaseAnalyzer<'a> {
    tracks: &'a TrackHistory,
    frame_width: f64,
    frame_height: f64,
    config: &'a AnalyzerConfig,
}

impl<'a> PhaseAnalyzer<'a> {
    pub fn new(
        tracks: &'a TrackHistory,
        frame_width: f64,
        frame_height: f64,
        config: &'a AnalyzerConfig,
    ) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(frame_width) || !valid(frame_height) {
            return Err(AnalysisError::InvalidFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }
        Ok(Self {
            tracks,
            frame_width,
            frame_height,
            config,
        })
    }

    /// Formation of `team` at exactly `frame`.
    pub fn analyze_frame(&self, team: TeamId, frame: usize, phase: Phase) -> PhaseFormation {
        let pixels = player_positions(self.tracks, team, frame, &self.config.roster);
        let normalized = normalize_positions(
            &pixels,
            self.frame_width,
            self.frame_height,
            &self.config.perspective,
        );
        let formation = FormationMatcher::from_config(self.config).detect(&normalized.positions);

        let ball = resolve_ball(
            self.tracks,
            frame,
            &normalized,
            self.frame_width,
            self.frame_height,
            self.config.ball_mirror,
        );

        if normalized.positions.is_empty() {
            warn!(%team, %phase, frame, "no players detected");
        } else {
            debug!(
                %team,
                %phase,
                frame,
                detected = normalized.positions.len(),
                mirrored = normalized.mirrored,
                label = %formation.label,
                "phase analysed"
            );
        }

        PhaseFormation {
            phase,
            frame,
            label: formation.label,
            lines: formation.lines,
            positions: normalized.positions,
            team_color: self.tracks.team_color_at(team, frame),
            ball,
        }
    }

    /// Selects the best frame of `phase` for `team` and analyses it.
    pub fn analyze_phase(&self, team: TeamId, phase: Phase) -> PhaseFormation {
        let windows = phase_windows(self.tracks.frame_count(), &self.config.phases);
        let candidates: Vec<usize> = windows
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, range)| range.clone().collect())
            .unwrap_or_default();

        let frame = best_frame(self.tracks, team, &candidates, &self.config.roster);
        self.analyze_frame(team, frame, phase)
    }

    pub fn analyze_team(&self, team: TeamId) -> TeamReport {
        let phases: Vec<PhaseFormation> = if self.config.parallel {
            Phase::ALL
                .par_iter()
                .map(|&phase| self.analyze_phase(team, phase))
                .collect()
        } else {
            Phase::ALL
                .iter()
                .map(|&phase| self.analyze_phase(team, phase))
                .collect()
        };

        info!(
            %team,
            start = %phases[0].label,
            middle = %phases[1].label,
            end = %phases[2].label,
            "team formations resolved"
        );

        TeamReport { team, phases }
    }

    /// Reports for both teams, team one first.
    pub fn analyze_match(&self) -> Vec<TeamReport> {
        if self.config.parallel {
            TeamId::ALL
                .par_iter()
                .map(|&team| self.analyze_team(team))
                .collect()
        } else {
            TeamId::ALL.iter().map(|&team| self.analyze_team(team)).collect()
        }
    }
}
