//! # Analysis Module
//!
//! The formation inference pipeline, leaves first.
//!
//! ## Submodules
//!
//! - `roster` - Track aggregation (team roster over a frame window)
//! - `frame_selector` - Representative frame per phase
//! - `normalize` - Board scaling, perspective and orientation correction
//! - `line_cluster` - One-dimensional depth clustering
//! - `matcher` - Template scoring and fallback labels
//! - `phase` - Start/middle/end orchestration and ball placement

pub mod frame_selector;
pub mod line_cluster;
pub mod matcher;
pub mod normalize;
pub mod phase;
pub mod roster;

pub use frame_selector::{best_frame, score_frames, FrameScore};
pub use line_cluster::cluster_lines;
pub use matcher::{detect_formation, FormationMatcher, TemplateScore};
pub use normalize::{normalize_positions, NormalizedPositions};
pub use phase::{phase_windows, resolve_ball, PhaseAnalyzer};
pub use roster::{player_positions, team_roster};
