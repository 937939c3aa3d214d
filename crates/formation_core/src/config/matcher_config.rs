//! Formation matching parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatcherConfig {
    /// Max |detected - expected| for a template to be considered (default: 3)
    pub tolerance: usize,
    /// Score weight of the player-count mismatch (default: 2)
    pub count_penalty: usize,
    /// Line counts tried, in order, when no template is accepted (default: 4, 5, 3)
    pub fallback_line_counts: Vec<usize>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            tolerance: 3,
            count_penalty: 2,
            fallback_line_counts: vec![4, 5, 3],
        }
    }
}
