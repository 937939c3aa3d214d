//! # Analyzer Configuration
//!
//! Every tuning constant of the engine lives here so callers and tests can
//! substitute their own values (including the formation catalog).
//!
//! ## Usage
//! ```rust
//! use formation_core::config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::default();
//! assert_eq!(config.roster.target_size, 11);
//! ```

mod matcher_config;
mod perspective_config;
mod phase_config;
mod roster_config;

pub use matcher_config::MatcherConfig;
pub use perspective_config::PerspectiveConfig;
pub use phase_config::{BallMirror, PhaseConfig};
pub use roster_config::RosterConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::{AnalysisError, Result};
use crate::tactics::FormationCatalog;

/// Points at a JSON file overriding the default configuration.
pub const CONFIG_PATH_ENV: &str = "FORMATION_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub roster: RosterConfig,
    pub perspective: PerspectiveConfig,
    pub matcher: MatcherConfig,
    pub phases: PhaseConfig,
    pub ball_mirror: BallMirror,
    pub catalog: FormationCatalog,
    /// Run the team/phase jobs on the rayon pool
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            roster: RosterConfig::default(),
            perspective: PerspectiveConfig::default(),
            matcher: MatcherConfig::default(),
            phases: PhaseConfig::default(),
            ball_mirror: BallMirror::default(),
            catalog: FormationCatalog::standard(),
            parallel: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_catalog(mut self, catalog: FormationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| AnalysisError::invalid_config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Defaults, unless `FORMATION_CONFIG_PATH` names a config file.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::load_from_path(Path::new(path))
    }

    pub fn validate(&self) -> Result<()> {
        self.catalog.validate().map_err(AnalysisError::InvalidConfig)?;

        if self.roster.target_size == 0 {
            return Err(AnalysisError::invalid_config("roster.target_size must be > 0"));
        }

        let p = &self.perspective;
        if !(p.min_range > 0.0) {
            return Err(AnalysisError::invalid_config("perspective.min_range must be > 0"));
        }
        if !(p.target_span > 0.0) {
            return Err(AnalysisError::invalid_config("perspective.target_span must be > 0"));
        }
        if !(0.0..=100.0).contains(&p.clamp_min)
            || !(0.0..=100.0).contains(&p.clamp_max)
            || p.clamp_min >= p.clamp_max
        {
            return Err(AnalysisError::invalid_config(format!(
                "perspective clamp band [{}, {}] must be an increasing range inside [0, 100]",
                p.clamp_min, p.clamp_max
            )));
        }

        if self.matcher.fallback_line_counts.is_empty()
            || self.matcher.fallback_line_counts.contains(&0)
        {
            return Err(AnalysisError::invalid_config(
                "matcher.fallback_line_counts must list positive line counts",
            ));
        }

        if self.phases.edge_window == 0 || self.phases.middle_half_window == 0 {
            return Err(AnalysisError::invalid_config("phase windows must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactics::FormationTemplate;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = AnalyzerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.roster.window, 10);
        assert_eq!(cfg.matcher.tolerance, 3);
        assert_eq!(cfg.matcher.fallback_line_counts, vec![4, 5, 3]);
        assert_eq!(cfg.ball_mirror, BallMirror::Reference);
        assert!((cfg.perspective.expansion_factor(25.0) - 2.0).abs() < 1e-9);
        assert!((cfg.perspective.expansion_factor(2.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = AnalyzerConfig::from_json(
            r#"{ "matcher": { "tolerance": 1 }, "ball_mirror": "follow_team" }"#,
        )
        .unwrap();
        assert_eq!(cfg.matcher.tolerance, 1);
        assert_eq!(cfg.matcher.count_penalty, 2);
        assert_eq!(cfg.ball_mirror, BallMirror::FollowTeam);
        assert_eq!(cfg.catalog, FormationCatalog::standard());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut cfg = AnalyzerConfig::default();
        cfg.perspective.clamp_min = 95.0;
        assert!(cfg.validate().is_err());

        let cfg = AnalyzerConfig::default().with_catalog(FormationCatalog::new(vec![]));
        assert!(cfg.validate().is_err());

        let mut cfg = AnalyzerConfig::default();
        cfg.matcher.fallback_line_counts = vec![4, 0];
        assert!(cfg.validate().is_err());

        assert!(matches!(
            AnalyzerConfig::from_json("{ not json"),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "catalog": [ {{ "name": "2-2", "lines": [1, 2, 2] }} ] }}"#
        )
        .unwrap();

        let cfg = AnalyzerConfig::load_from_path(file.path()).unwrap();
        assert_eq!(
            cfg.catalog,
            FormationCatalog::new(vec![FormationTemplate::new("2-2", &[1, 2, 2])])
        );

        let missing = AnalyzerConfig::load_from_path(Path::new("/nonexistent/formation.json"));
        assert!(matches!(missing, Err(AnalysisError::Io { .. })));
    }

    #[test]
    fn test_config_serialization() {
        let cfg = AnalyzerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed = AnalyzerConfig::from_json(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
