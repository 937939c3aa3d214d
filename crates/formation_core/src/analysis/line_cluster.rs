//! # Line Clusterer
//!
//! Splits a team into depth lines using the X coordinate only.
//!
//! In one dimension every optimal k-means partition is a run of consecutive
//! values in sorted order, so the within-line sum of squares can be minimized
//! exactly with dynamic programming over the sorted X values. The result is
//! the global optimum, needs no seed, and is identical on every platform.
//!
//! Lines come out ordered by ascending centroid (line 0 = deepest) and each
//! line lists its players by ascending Y.

use std::cmp::Ordering;

use crate::models::{LineAssignment, PlayerId, Point, PositionMap};

/// Partitions `positions` into at most `n_lines` depth lines.
///
/// `n_lines` is clamped to the number of distinct X values, so players at the
/// same depth always share a line. An empty map or `n_lines == 0` yields an
/// empty assignment.
pub fn cluster_lines(positions: &PositionMap, n_lines: usize) -> LineAssignment {
    let mut players: Vec<(PlayerId, Point)> =
        positions.iter().map(|(id, p)| (*id, *p)).collect();
    players.sort_by(|a, b| by_depth(a, b));

    let xs: Vec<f64> = players.iter().map(|(_, p)| p.x).collect();
    let k = n_lines.min(distinct_depths(&xs));
    if k < 1 {
        return LineAssignment::empty();
    }

    let bounds = optimal_breaks(&xs, k);

    let lines = bounds
        .windows(2)
        .map(|w| {
            let mut line = players[w[0]..w[1]].to_vec();
            line.sort_by(|a, b| by_lateral(a, b));
            line.into_iter().map(|(id, _)| id).collect()
        })
        .collect();

    LineAssignment(lines)
}

/// Number of distinct values in sorted `xs`.
fn distinct_depths(xs: &[f64]) -> usize {
    if xs.is_empty() {
        return 0;
    }
    1 + xs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// A line may only start where the depth changes.
fn is_break(xs: &[f64], i: usize) -> bool {
    i == 0 || xs[i - 1] != xs[i]
}

fn by_depth(a: &(PlayerId, Point), b: &(PlayerId, Point)) -> Ordering {
    a.1.x
        .total_cmp(&b.1.x)
        .then(a.1.y.total_cmp(&b.1.y))
        .then(a.0.cmp(&b.0))
}

fn by_lateral(a: &(PlayerId, Point), b: &(PlayerId, Point)) -> Ordering {
    a.1.y.total_cmp(&b.1.y).then(a.0.cmp(&b.0))
}

/// Prefix sums for O(1) within-segment sum of squares.
struct SegmentCost {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl SegmentCost {
    fn new(xs: &[f64]) -> Self {
        let mut sum = Vec::with_capacity(xs.len() + 1);
        let mut sum_sq = Vec::with_capacity(xs.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        for (i, &x) in xs.iter().enumerate() {
            sum.push(sum[i] + x);
            sum_sq.push(sum_sq[i] + x * x);
        }
        Self { sum, sum_sq }
    }

    /// Sum of squared deviations from the mean over `xs[from..to]`.
    fn cost(&self, from: usize, to: usize) -> f64 {
        let n = (to - from) as f64;
        let s = self.sum[to] - self.sum[from];
        let sq = self.sum_sq[to] - self.sum_sq[from];
        (sq - s * s / n).max(0.0)
    }
}

/// Segment boundaries `[0, b1, ..., n]` of the minimum-SSE split of sorted
/// `xs` into exactly `k` non-empty runs. Runs never split equal values and
/// ties keep the earliest split point.
fn optimal_breaks(xs: &[f64], k: usize) -> Vec<usize> {
    let n = xs.len();
    debug_assert!(k >= 1 && k <= distinct_depths(xs));

    let costs = SegmentCost::new(xs);

    // best[m][j]: minimum cost of covering xs[..j] with m segments
    let mut best = vec![vec![f64::INFINITY; n + 1]; k + 1];
    let mut split = vec![vec![0usize; n + 1]; k + 1];
    best[0][0] = 0.0;

    for m in 1..=k {
        for j in m..=n {
            for i in (m - 1)..j {
                if best[m - 1][i].is_infinite() || !is_break(xs, i) {
                    continue;
                }
                let candidate = best[m - 1][i] + costs.cost(i, j);
                if candidate < best[m][j] {
                    best[m][j] = candidate;
                    split[m][j] = i;
                }
            }
        }
    }

    let mut bounds = vec![n];
    let mut j = n;
    for m in (1..=k).rev() {
        j = split[m][j];
        bounds.push(j);
    }
    bounds.reverse();
    bounds
}
