//! Renderer hand-off: diagram layouts and artifact naming.

pub mod artifacts;
pub mod diagram;

pub use artifacts::{comparison_name, match_artifacts, team_diagram_name, Artifact};
pub use diagram::{board_to_pixel, DiagramLayout, Marker, PixelPos};
