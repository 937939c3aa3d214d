//! Position normalization parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Vertical expansion applied when an oblique camera squashes pitch depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PerspectiveConfig {
    /// Y ranges below this trigger expansion (default: 40)
    pub compressed_range: f64,
    /// Span the expanded group is stretched toward (default: 50)
    pub target_span: f64,
    /// Floor on the measured range when computing the factor (default: 10)
    pub min_range: f64,
    /// Lower clamp for expanded Y (default: 10)
    pub clamp_min: f64,
    /// Upper clamp for expanded Y (default: 90)
    pub clamp_max: f64,
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            compressed_range: 40.0,
            target_span: 50.0,
            min_range: 10.0,
            clamp_min: 10.0,
            clamp_max: 90.0,
        }
    }
}

impl PerspectiveConfig {
    /// Stretch factor for a group whose Y values span `range`.
    pub fn expansion_factor(&self, range: f64) -> f64 {
        self.target_span / range.max(self.min_range)
    }
}
