//! Roster reconstruction and frame selection parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RosterConfig {
    /// Frames on each side of the target frame scanned to build the roster (default: 10)
    pub window: usize,
    /// Player count a fully detected team is expected to show (default: 11)
    pub target_size: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            window: 10,
            target_size: 11,
        }
    }
}
