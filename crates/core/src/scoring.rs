//! Scoring module - points for one resolving pass
//!
//! Rules:
//! - Each distinct run scores `length × base`; length 4 is worth ×1.5 and
//!   length 5+ ×2, floored per run.
//! - Every cell shared by a row-run and a column-run (both length ≥ 3) adds
//!   `3 × base` once.
//! - From combo depth 2 on, the pass total is multiplied by `1 + depth × 0.2`
//!   and floored once.
//! - Relaxed passes use half the base unit and get neither the intersection
//!   bonus nor the combo multiplier.
//!
//! All arithmetic is integer: `×1.5` is `×3/2` and `×(1 + d × 0.2)` is
//! `×(5 + d)/5`.

use std::collections::HashSet;

use crate::detector::{MatchGroup, MatchSet};
use crate::types::{COMBO_STEP_FIFTHS, CROSS_BONUS_FACTOR};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    /// Sum of per-run points after length bonuses.
    pub group_points: u32,
    /// Intersection bonus added on top of `group_points`.
    pub cross_bonus: u32,
    /// Whether the combo multiplier was applied to this pass.
    pub combo_multiplier_applied: bool,
    pub total: u32,
}

/// Per-pass scoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub base_unit: u32,
    pub relaxed: bool,
}

impl ScoreRules {
    pub fn standard(base_unit: u32) -> Self {
        Self {
            base_unit,
            relaxed: false,
        }
    }

    pub fn relaxed(base_unit: u32) -> Self {
        Self {
            base_unit,
            relaxed: true,
        }
    }

    fn unit(&self) -> u32 {
        if self.relaxed {
            self.base_unit / 2
        } else {
            self.base_unit
        }
    }
}

/// Points for a single run: `length × unit` with the length bonus, floored.
pub fn group_score(length: usize, unit: u32) -> u32 {
    let base = (length as u32).saturating_mul(unit);
    match length {
        0..=3 => base,
        4 => base.saturating_mul(3) / 2,
        _ => base.saturating_mul(2),
    }
}

/// Apply the combo multiplier `1 + depth × 0.2` (floored); depth ≤ 1 is a no-op.
pub fn apply_combo_multiplier(points: u32, depth: u32) -> u32 {
    if depth <= 1 {
        return points;
    }
    let numerator = 5u64 + depth as u64 * COMBO_STEP_FIFTHS as u64;
    let scaled = points as u64 * numerator / 5;
    scaled.min(u32::MAX as u64) as u32
}

/// Score one detection pass at the given combo depth.
pub fn score_pass(matches: &MatchSet, combo_depth: u32, rules: ScoreRules) -> ScoreBreakdown {
    if matches.is_empty() {
        return ScoreBreakdown::default();
    }

    let unit = rules.unit();
    let mut seen: HashSet<&MatchGroup> = HashSet::with_capacity(matches.len());
    let group_points = matches
        .groups()
        .iter()
        .filter(|g| seen.insert(*g))
        .fold(0u32, |acc, g| acc.saturating_add(group_score(g.length, unit)));

    let cross_bonus = if rules.relaxed {
        0
    } else {
        (matches.intersections().len() as u32)
            .saturating_mul(CROSS_BONUS_FACTOR)
            .saturating_mul(rules.base_unit)
    };

    let subtotal = group_points.saturating_add(cross_bonus);
    let combo_multiplier_applied = !rules.relaxed && combo_depth > 1;
    let total = if combo_multiplier_applied {
        apply_combo_multiplier(subtotal, combo_depth)
    } else {
        subtotal
    };

    ScoreBreakdown {
        group_points,
        cross_bonus,
        combo_multiplier_applied,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Direction, BASE_SCORE};

    fn row(r: usize, c: usize, len: usize) -> MatchGroup {
        MatchGroup::new(Coord::new(r, c), Direction::Row, len)
    }

    fn col(r: usize, c: usize, len: usize) -> MatchGroup {
        MatchGroup::new(Coord::new(r, c), Direction::Column, len)
    }

    #[test]
    fn test_group_scores_by_length() {
        assert_eq!(group_score(3, BASE_SCORE), 30);
        assert_eq!(group_score(4, BASE_SCORE), 60);
        assert_eq!(group_score(5, BASE_SCORE), 100);
        assert_eq!(group_score(7, BASE_SCORE), 140);
        // Relaxed half unit
        assert_eq!(group_score(2, BASE_SCORE / 2), 10);
        // Floor after ×1.5
        assert_eq!(group_score(4, 5), 30);
        assert_eq!(group_score(4, 3), 18);
        assert_eq!(group_score(4, 1), 6);
    }

    #[test]
    fn test_combo_multiplier() {
        assert_eq!(apply_combo_multiplier(100, 0), 100);
        assert_eq!(apply_combo_multiplier(100, 1), 100);
        assert_eq!(apply_combo_multiplier(100, 2), 140);
        assert_eq!(apply_combo_multiplier(100, 3), 160);
        assert_eq!(apply_combo_multiplier(30, 2), 42);
        // Floored once
        assert_eq!(apply_combo_multiplier(33, 2), 46);
        assert_eq!(apply_combo_multiplier(u32::MAX, 10), u32::MAX);
    }

    #[test]
    fn test_single_run() {
        let set = MatchSet::from_groups(vec![row(0, 0, 3)]);
        let result = score_pass(&set, 1, ScoreRules::standard(BASE_SCORE));
        assert_eq!(result.group_points, 30);
        assert_eq!(result.cross_bonus, 0);
        assert!(!result.combo_multiplier_applied);
        assert_eq!(result.total, 30);
    }

    #[test]
    fn test_cross_adds_bonus_once() {
        // Row-run of 3 through (1,0..=2) and column-run of 3 through (0..=2,1)
        let set = MatchSet::from_groups(vec![row(1, 0, 3), col(0, 1, 3)]);
        let result = score_pass(&set, 1, ScoreRules::standard(BASE_SCORE));
        assert_eq!(result.group_points, 60);
        assert_eq!(result.cross_bonus, 30);
        assert_eq!(result.total, 90);
    }

    #[test]
    fn test_cross_is_symmetric_per_cell() {
        // A column-run crossing two row-runs at distinct cells counts twice,
        // regardless of which axis is scanned first.
        let set = MatchSet::from_groups(vec![row(0, 0, 3), row(2, 0, 3), col(0, 0, 3)]);
        let result = score_pass(&set, 1, ScoreRules::standard(BASE_SCORE));
        assert_eq!(result.cross_bonus, 60);
        assert_eq!(result.total, 90 + 60);
    }

    #[test]
    fn test_duplicate_groups_counted_once() {
        let set = MatchSet::from_groups(vec![row(0, 0, 4), row(0, 0, 4)]);
        let result = score_pass(&set, 1, ScoreRules::standard(BASE_SCORE));
        assert_eq!(result.total, 60);
    }

    #[test]
    fn test_combo_applies_to_whole_pass() {
        let set = MatchSet::from_groups(vec![row(1, 0, 3), col(0, 1, 3)]);
        let result = score_pass(&set, 2, ScoreRules::standard(BASE_SCORE));
        assert!(result.combo_multiplier_applied);
        assert_eq!(result.total, 126); // floor(90 × 1.4)
    }

    #[test]
    fn test_relaxed_pass() {
        let set = MatchSet::from_groups(vec![row(1, 0, 3), col(0, 1, 3), row(5, 5, 2)]);
        let result = score_pass(&set, 3, ScoreRules::relaxed(BASE_SCORE));
        assert_eq!(result.group_points, 15 + 15 + 10);
        assert_eq!(result.cross_bonus, 0);
        assert!(!result.combo_multiplier_applied);
        assert_eq!(result.total, 40);
    }

    #[test]
    fn test_empty_pass_scores_zero() {
        let result = score_pass(&MatchSet::default(), 4, ScoreRules::standard(BASE_SCORE));
        assert_eq!(result, ScoreBreakdown::default());
    }
}
