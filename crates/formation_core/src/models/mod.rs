//! Data model: tracker input records, geometry and engine output.

pub mod formation;
pub mod geometry;
pub mod track;

pub use formation::{
    FormationMatch, LineAssignment, Phase, PhaseFormation, TeamReport, NO_PLAYERS_LABEL,
};
pub use geometry::{mean_x, mean_y, Point, PositionMap};
pub use track::{
    BBox, BallFrame, BallRecord, PlayerFrame, PlayerId, PlayerRecord, Rgb, TeamId, TrackHistory,
    BALL_ID, DEFAULT_TEAM_COLOR,
};
