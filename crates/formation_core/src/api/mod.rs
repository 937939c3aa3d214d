//! JSON entry points

pub mod json_api;

pub use json_api::{
    analyze_request, analyze_tracks, analyze_tracks_json, report_schema, request_schema,
    AnalyzeRequest, MatchReport, TeamDiagram,
};
