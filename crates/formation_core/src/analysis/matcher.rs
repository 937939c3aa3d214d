//! # Formation Matcher
//!
//! Scores every catalog template against a line clustering of the team and
//! keeps the best one. Detection noise is tolerated: a template is still
//! considered when the detected count is within `tolerance` of its expected
//! total, at a cost of `count_penalty` per missing or extra player.
//!
//! When no template is accepted the label is built from a plain clustering
//! (outfield line counts joined with `-`).

use tracing::debug;

use crate::config::{AnalyzerConfig, MatcherConfig};
use crate::models::{FormationMatch, LineAssignment, PositionMap};
use crate::tactics::{FormationCatalog, FormationTemplate};

use super::line_cluster::cluster_lines;

/// Score of one accepted template. Lower is better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateScore {
    pub name: String,
    pub score: usize,
    pub lines: LineAssignment,
}

#[derive(Debug, Clone, Copy)]
pub struct FormationMatcher<'a> {
    catalog: &'a FormationCatalog,
    config: &'a MatcherConfig,
    full_team: usize,
}

impl<'a> FormationMatcher<'a> {
    pub fn new(catalog: &'a FormationCatalog, config: &'a MatcherConfig, full_team: usize) -> Self {
        Self {
            catalog,
            config,
            full_team,
        }
    }

    pub fn from_config(config: &'a AnalyzerConfig) -> Self {
        Self::new(&config.catalog, &config.matcher, config.roster.target_size)
    }

    /// Scores `template` against `positions`, or `None` when the template is
    /// outside the tolerance band or the clustering is empty.
    pub fn score_template(
        &self,
        template: &FormationTemplate,
        positions: &PositionMap,
    ) -> Option<TemplateScore> {
        let detected = positions.len();
        let expected = template.expected_players();
        let count_gap = detected.abs_diff(expected);
        if count_gap > self.config.tolerance {
            return None;
        }

        let lines = cluster_lines(positions, template.line_count());
        if lines.is_empty() {
            return None;
        }

        let shape_gap: usize = template
            .lines
            .iter()
            .enumerate()
            .map(|(i, &want)| want.abs_diff(lines.line(i).len()))
            .sum();

        Some(TemplateScore {
            name: template.name.clone(),
            score: shape_gap + self.config.count_penalty * count_gap,
            lines,
        })
    }

    /// Every accepted template with its score, in catalog order.
    pub fn rank_templates(&self, positions: &PositionMap) -> Vec<TemplateScore> {
        self.catalog
            .iter()
            .filter_map(|template| self.score_template(template, positions))
            .collect()
    }

    /// Best-fit formation label and line grouping for normalized positions.
    pub fn detect(&self, positions: &PositionMap) -> FormationMatch {
        if positions.is_empty() {
            return FormationMatch::no_players();
        }

        let detected = positions.len();

        let mut best: Option<TemplateScore> = None;
        for candidate in self.rank_templates(positions) {
            debug!(template = %candidate.name, score = candidate.score, "template scored");
            // strict improvement: earlier catalog entries win ties
            if best.as_ref().map_or(true, |b| candidate.score < b.score) {
                best = Some(candidate);
            }
        }

        let (label, lines) = match best {
            Some(best) => (best.name, best.lines),
            None => self.fallback(positions).unwrap_or_else(|| {
                (
                    format!("{detected} players (unknown formation)"),
                    LineAssignment::empty(),
                )
            }),
        };

        let label = if detected != self.full_team {
            format!("{label} ({detected} players)")
        } else {
            label
        };

        FormationMatch { label, lines }
    }

    /// Clustering-derived label when no template is within tolerance.
    fn fallback(&self, positions: &PositionMap) -> Option<(String, LineAssignment)> {
        let detected = positions.len();

        for &n_lines in &self.config.fallback_line_counts {
            if detected < n_lines {
                continue;
            }
            let lines = cluster_lines(positions, n_lines);
            if lines.is_empty() {
                continue;
            }

            let counts = lines.counts();
            let label = if counts.len() > 1 {
                counts[1..]
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("-")
            } else {
                format!("{detected} players")
            };
            debug!(n_lines, %label, "no template accepted, using clustering label");
            return Some((label, lines));
        }

        None
    }
}

/// Convenience wrapper around [`FormationMatcher::detect`].
pub fn detect_formation(positions: &PositionMap, config: &AnalyzerConfig) -> FormationMatch {
    FormationMatcher::from_config(config).detect(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, Point, NO_PLAYERS_LABEL};

    /// One group per `(x, count)` entry, spread evenly in Y.
    fn shaped(groups: &[(f64, usize)]) -> PositionMap {
        let mut positions = PositionMap::new();
        let mut id = 1;
        for &(x, count) in groups {
            for i in 0..count {
                let y = 100.0 * (i as f64 + 1.0) / (count as f64 + 1.0);
                // small depth jitter so players are not collinear
                let jitter = (i % 2) as f64 * 0.8;
                positions.insert(PlayerId(id), Point::new(x + jitter, y));
                id += 1;
            }
        }
        positions
    }

    #[test]
    fn test_detects_four_four_two() {
        let positions = shaped(&[(5.0, 1), (20.0, 4), (50.0, 4), (80.0, 2)]);
        let result = detect_formation(&positions, &AnalyzerConfig::default());
        assert_eq!(result.label, "4-4-2");
        assert_eq!(result.lines.counts(), vec![1, 4, 4, 2]);
        assert_eq!(result.lines.line(0), &[PlayerId(1)]);
    }

    #[test]
    fn test_detects_four_two_three_one() {
        let positions = shaped(&[(5.0, 1), (20.0, 4), (38.0, 2), (58.0, 3), (85.0, 1)]);
        let result = detect_formation(&positions, &AnalyzerConfig::default());
        assert_eq!(result.label, "4-2-3-1");
    }

    #[test]
    fn test_players_at_same_depth_stay_in_one_line() {
        // keeper, four at X=20, six at X=50, no depth jitter at all
        let mut positions = PositionMap::new();
        positions.insert(PlayerId(1), Point::new(5.0, 50.0));
        for i in 0..4u32 {
            positions.insert(PlayerId(2 + i), Point::new(20.0, 20.0 + 20.0 * i as f64));
        }
        for i in 0..6u32 {
            positions.insert(PlayerId(6 + i), Point::new(50.0, 10.0 + 15.0 * i as f64));
        }

        let result = detect_formation(&positions, &AnalyzerConfig::default());
        // [1, 4, 6] against [1, 4, 5, 1] leaves a gap of 2, the lowest in the catalog
        assert_eq!(result.label, "4-5-1");
        assert_eq!(result.lines.counts(), vec![1, 4, 6]);
    }

    #[test]
    fn test_extra_detections_keep_template_with_suffix() {
        // 14 detections, a crowded back line: 4-3-3 is the first template at
        // the minimum score of 3 + 2 * 3.
        let positions = shaped(&[(5.0, 1), (20.0, 6), (50.0, 3), (80.0, 4)]);
        let config = AnalyzerConfig::default();
        let matcher = FormationMatcher::from_config(&config);

        let ranked = matcher.rank_templates(&positions);
        assert_eq!(ranked.len(), 9);
        let four_three_three = ranked.iter().find(|s| s.name == "4-3-3").unwrap();
        assert_eq!(four_three_three.score, 9);
        assert!(ranked.iter().all(|s| s.score >= 9));

        let result = matcher.detect(&positions);
        assert_eq!(result.label, "4-3-3 (14 players)");
    }

    #[test]
    fn test_fallback_uses_four_lines_first() {
        let positions = shaped(&[(5.0, 1), (20.0, 2), (50.0, 2), (80.0, 1)]);
        let result = detect_formation(&positions, &AnalyzerConfig::default());
        assert_eq!(result.label, "2-2-1 (6 players)");
        assert_eq!(result.lines.counts(), vec![1, 2, 2, 1]);
    }

    #[test]
    fn test_too_few_players_is_unknown() {
        let positions = shaped(&[(5.0, 1), (50.0, 1)]);
        let result = detect_formation(&positions, &AnalyzerConfig::default());
        assert_eq!(result.label, "2 players (unknown formation) (2 players)");
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_single_line_fallback_label() {
        let mut config = AnalyzerConfig::default();
        config.matcher.fallback_line_counts = vec![1];
        let positions = shaped(&[(5.0, 1), (20.0, 2), (50.0, 2)]);
        let result = detect_formation(&positions, &config);
        assert_eq!(result.label, "5 players (5 players)");
        assert_eq!(result.lines.counts(), vec![5]);
    }

    #[test]
    fn test_empty_positions() {
        let result = detect_formation(&PositionMap::new(), &AnalyzerConfig::default());
        assert_eq!(result.label, NO_PLAYERS_LABEL);
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = FormationCatalog::new(vec![
            FormationTemplate::new("2-1", &[1, 2, 1]),
            FormationTemplate::new("1-2", &[1, 1, 2]),
        ]);
        let config = AnalyzerConfig::default().with_catalog(catalog);
        let positions = shaped(&[(5.0, 1), (30.0, 1), (70.0, 2)]);

        let matcher = FormationMatcher::from_config(&config);
        assert_eq!(matcher.detect(&positions).label, "1-2 (4 players)");
    }

    #[test]
    fn test_tolerance_band_excludes_templates() {
        let positions = shaped(&[(5.0, 1), (20.0, 3), (50.0, 3)]);
        let config = AnalyzerConfig::default();
        let matcher = FormationMatcher::from_config(&config);
        // 7 detections: every 11-player template is 4 away
        assert!(matcher.rank_templates(&positions).is_empty());
    }
}
