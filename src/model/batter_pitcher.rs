//! Batter-vs-pitcher sub-model (baseball props)
//!
//! Projects a matchup OPS from handedness splits and a fixed platoon lookup,
//! defaulting to the league average when data is missing.

use serde::{Deserialize, Serialize};

use crate::types::Confidence;

/// League-average OPS used when splits are missing
pub const LEAGUE_AVG_OPS: f64 = 0.750;

/// Plate-appearance thresholds for confidence grading
const PA_HIGH: u32 = 200;
const PA_LOW: u32 = 100;

/// Throwing/batting handedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
    Switch,
    Unknown,
}

/// Batter performance split by opposing pitcher hand
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatterSplits {
    pub woba_vs_left: Option<f64>,
    pub woba_vs_right: Option<f64>,
    pub pa_vs_left: u32,
    pub pa_vs_right: u32,
}

/// Pitcher performance allowed, split by batter hand
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PitcherSplits {
    pub woba_allowed_vs_left: Option<f64>,
    pub woba_allowed_vs_right: Option<f64>,
    pub pa_vs_left: u32,
    pub pa_vs_right: u32,
}

/// Projected matchup quality
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchupRating {
    /// Blended OPS projection for the batter in this matchup
    pub projected_ops: f64,
    /// Platoon term applied (fixed lookup)
    pub platoon_term: f64,
    /// Probability-scale value for prop assembly, centered at 0.5
    pub prop_probability: f64,
    pub confidence: Confidence,
}

/// Fixed platoon lookup: same-handed -0.10, opposite-handed +0.10,
/// switch-hitter +0.05, unknown 0.
pub fn platoon_term(batter: Handedness, pitcher: Handedness) -> f64 {
    match (batter, pitcher) {
        (Handedness::Switch, _) => 0.05,
        (Handedness::Unknown, _) | (_, Handedness::Unknown) => 0.0,
        (b, p) if b == p => -0.10,
        _ => 0.10,
    }
}

fn batter_split_vs(splits: &BatterSplits, pitcher: Handedness) -> (Option<f64>, u32) {
    match pitcher {
        Handedness::Left => (splits.woba_vs_left, splits.pa_vs_left),
        Handedness::Right => (splits.woba_vs_right, splits.pa_vs_right),
        // No single relevant side: blend whatever exists.
        Handedness::Switch | Handedness::Unknown => (
            blend(splits.woba_vs_left, splits.woba_vs_right),
            splits.pa_vs_left + splits.pa_vs_right,
        ),
    }
}

fn pitcher_split_vs(splits: &PitcherSplits, batter: Handedness) -> (Option<f64>, u32) {
    match batter {
        Handedness::Left => (splits.woba_allowed_vs_left, splits.pa_vs_left),
        Handedness::Right => (splits.woba_allowed_vs_right, splits.pa_vs_right),
        Handedness::Switch | Handedness::Unknown => (
            blend(splits.woba_allowed_vs_left, splits.woba_allowed_vs_right),
            splits.pa_vs_left + splits.pa_vs_right,
        ),
    }
}

fn blend(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some((x + y) / 2.0),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Project the batter's matchup OPS against a specific pitcher.
pub fn project(
    batter_hand: Handedness,
    batter: &BatterSplits,
    pitcher_hand: Handedness,
    pitcher: &PitcherSplits,
) -> MatchupRating {
    let (batter_woba, batter_pa) = batter_split_vs(batter, pitcher_hand);
    let (pitcher_woba, pitcher_pa) = pitcher_split_vs(pitcher, batter_hand);

    let platoon = platoon_term(batter_hand, pitcher_hand);
    let batter_side = batter_woba.unwrap_or(LEAGUE_AVG_OPS);
    let pitcher_side = pitcher_woba.unwrap_or(LEAGUE_AVG_OPS);
    let projected_ops = (batter_side + pitcher_side) / 2.0 + platoon;

    let confidence = if batter_pa >= PA_HIGH && pitcher_pa >= PA_HIGH {
        Confidence::High
    } else if batter_pa < PA_LOW || pitcher_pa < PA_LOW {
        Confidence::Low
    } else {
        Confidence::Medium
    };

    MatchupRating {
        projected_ops,
        platoon_term: platoon,
        prop_probability: (0.5 + (projected_ops - LEAGUE_AVG_OPS)).clamp(0.05, 0.95),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seasoned_batter() -> BatterSplits {
        BatterSplits {
            woba_vs_left: Some(0.360),
            woba_vs_right: Some(0.330),
            pa_vs_left: 250,
            pa_vs_right: 420,
        }
    }

    fn seasoned_pitcher() -> PitcherSplits {
        PitcherSplits {
            woba_allowed_vs_left: Some(0.310),
            woba_allowed_vs_right: Some(0.290),
            pa_vs_left: 300,
            pa_vs_right: 310,
        }
    }

    #[test]
    fn platoon_lookup_is_fixed() {
        assert_eq!(platoon_term(Handedness::Left, Handedness::Left), -0.10);
        assert_eq!(platoon_term(Handedness::Right, Handedness::Right), -0.10);
        assert_eq!(platoon_term(Handedness::Left, Handedness::Right), 0.10);
        assert_eq!(platoon_term(Handedness::Switch, Handedness::Left), 0.05);
        assert_eq!(platoon_term(Handedness::Unknown, Handedness::Right), 0.0);
    }

    #[test]
    fn opposite_hand_beats_same_hand() {
        let favorable = project(
            Handedness::Left,
            &seasoned_batter(),
            Handedness::Right,
            &seasoned_pitcher(),
        );
        let unfavorable = project(
            Handedness::Left,
            &seasoned_batter(),
            Handedness::Left,
            &seasoned_pitcher(),
        );
        assert!(favorable.projected_ops > unfavorable.projected_ops);
        assert!(favorable.prop_probability > unfavorable.prop_probability);
    }

    #[test]
    fn missing_splits_default_to_league_average() {
        let rating = project(
            Handedness::Unknown,
            &BatterSplits::default(),
            Handedness::Unknown,
            &PitcherSplits::default(),
        );
        assert!((rating.projected_ops - LEAGUE_AVG_OPS).abs() < 1e-12);
        assert!((rating.prop_probability - 0.5).abs() < 1e-12);
        assert_eq!(rating.confidence, Confidence::Low);
    }

    #[test]
    fn confidence_thresholds_on_sample_size() {
        let rating = project(
            Handedness::Left,
            &seasoned_batter(),
            Handedness::Right,
            &seasoned_pitcher(),
        );
        assert_eq!(rating.confidence, Confidence::High);

        let mut thin_pitcher = seasoned_pitcher();
        thin_pitcher.pa_vs_left = 80;
        let rating = project(
            Handedness::Left,
            &seasoned_batter(),
            Handedness::Right,
            &thin_pitcher,
        );
        assert_eq!(rating.confidence, Confidence::Low);

        let mut middling_pitcher = seasoned_pitcher();
        middling_pitcher.pa_vs_left = 150;
        let rating = project(
            Handedness::Left,
            &seasoned_batter(),
            Handedness::Right,
            &middling_pitcher,
        );
        assert_eq!(rating.confidence, Confidence::Medium);
    }

    #[test]
    fn prop_probability_is_clamped() {
        let hot = BatterSplits {
            woba_vs_right: Some(1.400),
            pa_vs_right: 300,
            ..BatterSplits::default()
        };
        let soft = PitcherSplits {
            woba_allowed_vs_left: Some(1.300),
            pa_vs_left: 300,
            ..PitcherSplits::default()
        };
        let rating = project(Handedness::Left, &hot, Handedness::Right, &soft);
        assert_eq!(rating.prop_probability, 0.95);
    }
}
