//! # formation_core - Deterministic Formation Inference
//!
//! Turns per-frame player and ball detections from a match video into a
//! named formation and a depth-line grouping per team, sampled at the start,
//! middle and end of the clip.
//!
//! ## Pipeline
//! - Track aggregation: roster over a ±10 frame window, positions at one frame
//! - Frame selection: frame closest to a full team per phase
//! - Normalization: 0-100 board, perspective stretch, canonical orientation
//! - Line clustering: exact one-dimensional partition along the depth axis
//! - Formation matching: template scoring with a tolerance band and fallback
//!
//! Same input = same output: nothing in the pipeline is seeded or random.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod tactics;

pub use analysis::{
    best_frame, cluster_lines, detect_formation, normalize_positions, player_positions,
    FormationMatcher, PhaseAnalyzer,
};
pub use api::{analyze_tracks, analyze_tracks_json, AnalyzeRequest, MatchReport};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use models::{
    FormationMatch, LineAssignment, Phase, PhaseFormation, PlayerId, Point, PositionMap, TeamId,
    TeamReport, TrackHistory,
};
pub use tactics::{FormationCatalog, FormationTemplate};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
