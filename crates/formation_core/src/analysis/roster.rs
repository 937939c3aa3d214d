//! # Track Aggregator
//!
//! Resolves which players of a team are visible at a target frame.
//!
//! The roster is collected over a window of neighbouring frames so that a
//! player the detector dropped for a frame or two still belongs to the team,
//! but only positions actually observed at the target frame are returned.
//! Nothing is interpolated.

use fxhash::FxHashSet;

use crate::config::RosterConfig;
use crate::models::{PlayerId, PositionMap, TeamId, TrackHistory};

/// Every player labelled `team` in any frame of `[frame - window, frame + window]`,
/// clamped to the history bounds.
pub fn team_roster(
    tracks: &TrackHistory,
    team: TeamId,
    frame: usize,
    window: usize,
) -> FxHashSet<PlayerId> {
    let total = tracks.frame_count();
    let start = frame.saturating_sub(window);
    let end = frame.saturating_add(window).saturating_add(1).min(total);

    let mut roster = FxHashSet::default();
    for snapshot in tracks.players.get(start..end).unwrap_or(&[]) {
        roster.extend(
            snapshot
                .iter()
                .filter(|(_, record)| record.team == Some(team))
                .map(|(id, _)| *id),
        );
    }
    roster
}

/// Pixel-space centers of the roster members detected at exactly `frame`
/// with a matching team label. Empty when `frame` is out of range.
pub fn player_positions(
    tracks: &TrackHistory,
    team: TeamId,
    frame: usize,
    config: &RosterConfig,
) -> PositionMap {
    let Some(snapshot) = tracks.players_at(frame) else {
        return PositionMap::new();
    };

    let roster = team_roster(tracks, team, frame, config.window);

    snapshot
        .iter()
        .filter(|(id, record)| roster.contains(*id) && record.team == Some(team))
        .map(|(id, record)| (*id, record.bbox.center()))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{BBox, PlayerFrame, PlayerId, PlayerRecord, TeamId};

    pub fn record(team: Option<TeamId>, x: f64, y: f64) -> PlayerRecord {
        PlayerRecord {
            bbox: BBox::new(x - 5.0, y - 10.0, x + 5.0, y + 10.0),
            team,
            team_color: None,
        }
    }

    /// Snapshot with `count` players of `team`, ids starting at `first_id`.
    pub fn team_frame(team: TeamId, first_id: u32, count: u32) -> PlayerFrame {
        (0..count)
            .map(|i| {
                let id = first_id + i;
                (PlayerId(id), record(Some(team), 100.0 + 40.0 * i as f64, 300.0))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::models::{Point, TrackHistory};

    fn history(frames: usize) -> TrackHistory {
        TrackHistory {
            players: (0..frames).map(|_| team_frame(TeamId::One, 1, 3)).collect(),
            ball: vec![],
        }
    }

    #[test]
    fn test_positions_are_bbox_centers() {
        let tracks = history(5);
        let positions = player_positions(&tracks, TeamId::One, 2, &RosterConfig::default());
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[&PlayerId(1)], Point::new(100.0, 300.0));
    }

    #[test]
    fn test_out_of_range_frame_is_empty() {
        let tracks = history(5);
        assert!(player_positions(&tracks, TeamId::One, 5, &RosterConfig::default()).is_empty());
        assert!(player_positions(&tracks, TeamId::One, usize::MAX, &RosterConfig::default())
            .is_empty());
    }

    #[test]
    fn test_missing_player_is_in_roster_but_not_positions() {
        let mut tracks = history(30);
        // Player 3 drops out of frame 15 only.
        tracks.players[15].remove(&PlayerId(3));

        let roster = team_roster(&tracks, TeamId::One, 15, 10);
        assert!(roster.contains(&PlayerId(3)));

        let positions = player_positions(&tracks, TeamId::One, 15, &RosterConfig::default());
        assert_eq!(positions.len(), 2);
        assert!(!positions.contains_key(&PlayerId(3)));
    }

    #[test]
    fn test_roster_window_is_clamped() {
        let mut tracks = history(30);
        tracks.players[29].insert(PlayerId(40), record(Some(TeamId::One), 10.0, 10.0));
        tracks.players[0].insert(PlayerId(41), record(Some(TeamId::One), 10.0, 10.0));

        let roster = team_roster(&tracks, TeamId::One, 25, 10);
        assert!(roster.contains(&PlayerId(40)));
        assert!(!roster.contains(&PlayerId(41)));

        // Frame 11 is 11 away from frame 0: outside the window.
        assert!(!team_roster(&tracks, TeamId::One, 11, 10).contains(&PlayerId(41)));
        assert!(team_roster(&tracks, TeamId::One, 10, 10).contains(&PlayerId(41)));
    }

    #[test]
    fn test_unlabelled_or_other_team_excluded() {
        let mut tracks = history(5);
        tracks.players[2].insert(PlayerId(50), record(None, 10.0, 10.0));
        tracks.players[2].insert(PlayerId(51), record(Some(TeamId::Two), 10.0, 10.0));
        // Player 52 is team one nearby but relabelled at the target frame.
        tracks.players[1].insert(PlayerId(52), record(Some(TeamId::One), 10.0, 10.0));
        tracks.players[2].insert(PlayerId(52), record(Some(TeamId::Two), 10.0, 10.0));

        let positions = player_positions(&tracks, TeamId::One, 2, &RosterConfig::default());
        assert_eq!(
            positions.keys().copied().collect::<Vec<_>>(),
            vec![PlayerId(1), PlayerId(2), PlayerId(3)]
        );
    }
}
