//! # Frame Selector
//!
//! Picks the candidate frame whose detected player count is closest to a
//! full team.

use crate::config::RosterConfig;
use crate::models::{TeamId, TrackHistory};

use super::roster::player_positions;

/// Scored candidate, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScore {
    pub frame: usize,
    pub detected: usize,
    /// `|target_size - detected|`, lower is better
    pub score: usize,
}

/// Scores every in-range candidate, preserving input order.
pub fn score_frames(
    tracks: &TrackHistory,
    team: TeamId,
    candidates: &[usize],
    config: &RosterConfig,
) -> Vec<FrameScore> {
    candidates
        .iter()
        .copied()
        .filter(|&frame| frame < tracks.frame_count())
        .map(|frame| {
            let detected = player_positions(tracks, team, frame, config).len();
            FrameScore {
                frame,
                detected,
                score: config.target_size.abs_diff(detected),
            }
        })
        .collect()
}

/// Best representative frame among `candidates`.
///
/// The first minimum in input order wins. With no in-range candidate the
/// first candidate is returned, or `0` for an empty list.
pub fn best_frame(
    tracks: &TrackHistory,
    team: TeamId,
    candidates: &[usize],
    config: &RosterConfig,
) -> usize {
    let scores = score_frames(tracks, team, candidates, config);

    match scores.iter().min_by_key(|s| s.score) {
        Some(s) => s.frame,
        None => candidates.first().copied().unwrap_or(0),
    }
}
