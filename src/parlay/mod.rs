//! Parlay Combination Engine
//!
//! Enumerate -> Correlation-Filter -> Metric-Compute -> Rank -> Truncate.
//! Every stage returns an empty collection rather than erroring when no
//! valid output exists. The engine is fully deterministic.

pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ParlayConfig;
use crate::model::math::logistic;
use crate::odds::to_decimal;
use crate::types::{CandidateBet, Confidence, Parlay, ParlayStrategy, Sport};
use rules::CorrelationRule;

/// One parlay-generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayRequest {
    /// Legs per parlay (2-10)
    pub leg_count: usize,
    /// Ranked parlays to return
    pub max_parlays: usize,
    pub strategy: ParlayStrategy,
    /// Restrict to one game (single-game mode)
    #[serde(default)]
    pub game_id: Option<String>,
}

pub struct ParlayEngine {
    cfg: ParlayConfig,
    rules: Vec<CorrelationRule>,
}

impl ParlayEngine {
    pub fn new(cfg: ParlayConfig) -> Self {
        Self {
            cfg,
            rules: CorrelationRule::standard(),
        }
    }

    /// Generate, filter, score and rank parlays from a candidate pool.
    ///
    /// Enumeration performs no pruning; callers bound the pool size to keep
    /// C(n, leg_count) tractable.
    pub fn build(&self, candidates: &[CandidateBet], request: &ParlayRequest) -> Vec<Parlay> {
        if request.leg_count < self.cfg.min_leg_count
            || request.leg_count > self.cfg.max_leg_count
        {
            return Vec::new();
        }

        let pool: Vec<&CandidateBet> = match &request.game_id {
            Some(game_id) => candidates.iter().filter(|c| &c.game_id == game_id).collect(),
            None => candidates.iter().collect(),
        };
        if pool.len() < request.leg_count {
            return Vec::new();
        }

        let mut active_rules = self.rules.clone();
        if request.game_id.is_some() {
            active_rules.insert(0, CorrelationRule::SingleGameOnly);
        }

        let mut parlays = Vec::new();
        let mut combo = Vec::with_capacity(request.leg_count);
        self.enumerate(
            &pool,
            request.leg_count,
            0,
            &mut combo,
            &active_rules,
            request.strategy,
            &mut parlays,
        );
        debug!(
            pool = pool.len(),
            leg_count = request.leg_count,
            survivors = parlays.len(),
            "parlay enumeration complete"
        );

        self.rank(&mut parlays, request.strategy);
        parlays.truncate(request.max_parlays);

        // Defensive re-validation of the game filter on the final output.
        if let Some(game_id) = &request.game_id {
            let before = parlays.len();
            parlays.retain(|p| p.legs.iter().all(|leg| &leg.game_id == game_id));
            if parlays.len() != before {
                warn!(
                    game_id,
                    dropped = before - parlays.len(),
                    "parlays with foreign legs dropped after game filter"
                );
            }
        }

        parlays
    }

    /// Backtracking subset enumeration: choose index i, recurse on i+1..n,
    /// producing each subset exactly once.
    #[allow(clippy::too_many_arguments)]
    fn enumerate<'a>(
        &self,
        pool: &[&'a CandidateBet],
        leg_count: usize,
        start: usize,
        combo: &mut Vec<&'a CandidateBet>,
        rules: &[CorrelationRule],
        strategy: ParlayStrategy,
        out: &mut Vec<Parlay>,
    ) {
        if combo.len() == leg_count {
            if !rules.iter().any(|rule| rule.violated(combo)) {
                out.push(self.score(combo, strategy));
            }
            return;
        }
        for i in start..pool.len() {
            combo.push(pool[i]);
            self.enumerate(pool, leg_count, i + 1, combo, rules, strategy, out);
            combo.pop();
        }
    }

    /// Derived metrics for one surviving combination.
    fn score(&self, legs: &[&CandidateBet], strategy: ParlayStrategy) -> Parlay {
        let probability: f64 = legs.iter().map(|leg| leg.probability).product();
        let decimal_odds: f64 = legs.iter().map(|leg| to_decimal(leg.american_odds)).product();
        let implied_probability = 1.0 / decimal_odds;
        let edge = (probability - implied_probability) / implied_probability;
        let expected_value = probability * (decimal_odds - 1.0) - (1.0 - probability);

        let avg_ordinal = legs
            .iter()
            .map(|leg| leg.confidence.ordinal() as f64)
            .sum::<f64>()
            / legs.len() as f64;
        let confidence = if avg_ordinal >= 4.0 {
            Confidence::High
        } else if avg_ordinal >= 3.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        let quality_score = self.cfg.quality_weight_probability * probability
            + self.cfg.quality_weight_edge * logistic(edge)
            + self.cfg.quality_weight_confidence * (avg_ordinal / 5.0);

        let sport = uniform_sport(legs);

        Parlay {
            legs: legs.iter().map(|leg| (*leg).clone()).collect(),
            probability,
            decimal_odds,
            implied_probability,
            edge,
            expected_value,
            confidence,
            quality_score,
            sport,
            strategy,
        }
    }

    /// Strategy-keyed descending sort with a deterministic tie-break chain.
    fn rank(&self, parlays: &mut [Parlay], strategy: ParlayStrategy) {
        parlays.sort_by(|a, b| {
            let key = |p: &Parlay| match strategy {
                ParlayStrategy::Safe => p.probability,
                ParlayStrategy::Balanced => p.quality_score,
                ParlayStrategy::Value => p.edge,
                ParlayStrategy::Homerun => p.decimal_odds,
            };
            key(b)
                .total_cmp(&key(a))
                .then(b.probability.total_cmp(&a.probability))
                .then(b.decimal_odds.total_cmp(&a.decimal_odds))
                .then_with(|| {
                    let names = |p: &Parlay| {
                        p.legs
                            .iter()
                            .map(|l| l.selection.as_str())
                            .collect::<Vec<_>>()
                            .join("|")
                    };
                    names(a).cmp(&names(b))
                })
        });
    }
}

fn uniform_sport(legs: &[&CandidateBet]) -> Option<Sport> {
    let first = legs.first()?.sport;
    if legs.iter().all(|leg| leg.sport == first) {
        Some(first)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BetType;

    fn leg(
        game: &str,
        bet_type: BetType,
        selection: &str,
        odds: i32,
        probability: f64,
        confidence: Confidence,
    ) -> CandidateBet {
        CandidateBet {
            game_id: game.to_string(),
            sport: Sport::Nfl,
            bet_type,
            selection: selection.to_string(),
            team: match bet_type {
                BetType::Total => None,
                _ => Some(selection.split(' ').next().unwrap_or("").to_string()),
            },
            player_id: None,
            american_odds: odds,
            probability,
            edge: 0.04,
            confidence,
        }
    }

    fn pool() -> Vec<CandidateBet> {
        vec![
            leg("g1", BetType::Moneyline, "AA ML", -120, 0.58, Confidence::High),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Medium),
            leg("g3", BetType::Moneyline, "CC ML", -150, 0.62, Confidence::VeryHigh),
            leg("g4", BetType::Total, "OVER 44.5", -110, 0.55, Confidence::Medium),
            leg("g5", BetType::Total, "UNDER 6.5", -105, 0.54, Confidence::Low),
        ]
    }

    fn engine() -> ParlayEngine {
        ParlayEngine::new(ParlayConfig::default())
    }

    fn request(leg_count: usize, strategy: ParlayStrategy) -> ParlayRequest {
        ParlayRequest {
            leg_count,
            max_parlays: 100,
            strategy,
            game_id: None,
        }
    }

    #[test]
    fn enumerates_all_subsets_once() {
        // C(5,3) = 10 independent cross-game candidates, no rule fires.
        let parlays = engine().build(&pool(), &request(3, ParlayStrategy::Safe));
        assert_eq!(parlays.len(), 10);

        let mut seen: Vec<String> = parlays
            .iter()
            .map(|p| {
                let mut ids: Vec<_> = p.legs.iter().map(|l| l.game_id.clone()).collect();
                ids.sort();
                ids.join("+")
            })
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn fewer_candidates_than_legs_is_empty() {
        let parlays = engine().build(&pool()[..2], &request(3, ParlayStrategy::Safe));
        assert!(parlays.is_empty());
    }

    #[test]
    fn leg_count_bounds_enforced() {
        assert!(engine().build(&pool(), &request(1, ParlayStrategy::Safe)).is_empty());
        assert!(engine().build(&pool(), &request(11, ParlayStrategy::Safe)).is_empty());
    }

    #[test]
    fn metrics_match_definitions() {
        let two = vec![
            leg("g1", BetType::Moneyline, "AA ML", 100, 0.55, Confidence::High),
            leg("g2", BetType::Moneyline, "BB ML", -200, 0.70, Confidence::High),
        ];
        let parlays = engine().build(&two, &request(2, ParlayStrategy::Balanced));
        assert_eq!(parlays.len(), 1);
        let p = &parlays[0];

        assert!((p.probability - 0.55 * 0.70).abs() < 1e-12);
        assert!((p.decimal_odds - 2.0 * 1.5).abs() < 1e-12);
        assert!((p.implied_probability - 1.0 / 3.0).abs() < 1e-12);
        let expected_edge = (p.probability - p.implied_probability) / p.implied_probability;
        assert!((p.edge - expected_edge).abs() < 1e-12);
        let expected_ev = p.probability * (p.decimal_odds - 1.0) - (1.0 - p.probability);
        assert!((p.expected_value - expected_ev).abs() < 1e-12);
        assert_eq!(p.confidence, Confidence::High);
        assert_eq!(p.sport, Some(Sport::Nfl));
    }

    #[test]
    fn adding_a_leg_decreases_probability() {
        let parlays2 = engine().build(&pool(), &request(2, ParlayStrategy::Safe));
        let parlays3 = engine().build(&pool(), &request(3, ParlayStrategy::Safe));
        let best2 = parlays2[0].probability;
        let best3 = parlays3[0].probability;
        assert!(best3 < best2);
    }

    #[test]
    fn strategies_sort_by_their_keys() {
        let e = engine();
        let safe = e.build(&pool(), &request(2, ParlayStrategy::Safe));
        for pair in safe.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        let homerun = e.build(&pool(), &request(2, ParlayStrategy::Homerun));
        for pair in homerun.windows(2) {
            assert!(pair[0].decimal_odds >= pair[1].decimal_odds);
        }
        let value = e.build(&pool(), &request(2, ParlayStrategy::Value));
        for pair in value.windows(2) {
            assert!(pair[0].edge >= pair[1].edge);
        }
        let balanced = e.build(&pool(), &request(2, ParlayStrategy::Balanced));
        for pair in balanced.windows(2) {
            assert!(pair[0].quality_score >= pair[1].quality_score);
        }
    }

    #[test]
    fn identical_inputs_produce_identical_output() {
        let e = engine();
        let a = e.build(&pool(), &request(3, ParlayStrategy::Balanced));
        let b = e.build(&pool(), &request(3, ParlayStrategy::Balanced));
        let render = |ps: &[Parlay]| {
            ps.iter()
                .map(|p| {
                    p.legs
                        .iter()
                        .map(|l| l.selection.clone())
                        .collect::<Vec<_>>()
                        .join("|")
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(render(&a), render(&b));
    }

    #[test]
    fn truncates_to_max_parlays() {
        let mut req = request(2, ParlayStrategy::Safe);
        req.max_parlays = 3;
        assert_eq!(engine().build(&pool(), &req).len(), 3);
    }

    #[test]
    fn same_player_pair_yields_no_parlay() {
        let mut a = leg("g1", BetType::PlayerProp, "Soto o1.5 TB", 120, 0.55, Confidence::High);
        a.player_id = Some("soto".to_string());
        a.team = None;
        let mut b = leg("g2", BetType::PlayerProp, "Soto o0.5 HR", 300, 0.3, Confidence::Medium);
        b.player_id = Some("soto".to_string());
        b.team = None;
        let parlays = engine().build(&[a, b], &request(2, ParlayStrategy::Safe));
        assert!(parlays.is_empty());
    }

    #[test]
    fn moneyline_total_same_game_filtered() {
        let legs = vec![
            leg("g1", BetType::Moneyline, "AA ML", -120, 0.58, Confidence::High),
            leg("g1", BetType::Total, "OVER 44.5", -110, 0.55, Confidence::Medium),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Medium),
        ];
        let parlays = engine().build(&legs, &request(2, ParlayStrategy::Safe));
        // Only g1ML+g2ML and g1T+g2ML survive.
        assert_eq!(parlays.len(), 2);
        for p in &parlays {
            assert!(!(p.legs.iter().any(|l| l.bet_type == BetType::Moneyline
                && l.game_id == "g1")
                && p.legs.iter().any(|l| l.bet_type == BetType::Total && l.game_id == "g1")));
        }
    }

    #[test]
    fn single_game_mode_restricts_pool() {
        let legs = vec![
            leg("g1", BetType::Spread, "AA -3.5", -110, 0.55, Confidence::Medium),
            leg("g1", BetType::Total, "OVER 44.5", -110, 0.55, Confidence::Medium),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Medium),
        ];
        let mut req = request(2, ParlayStrategy::Safe);
        req.game_id = Some("g1".to_string());
        let parlays = engine().build(&legs, &req);
        assert_eq!(parlays.len(), 1);
        assert!(parlays[0].legs.iter().all(|l| l.game_id == "g1"));
    }

    #[test]
    fn unknown_game_filter_is_empty() {
        let mut req = request(2, ParlayStrategy::Safe);
        req.game_id = Some("nope".to_string());
        assert!(engine().build(&pool(), &req).is_empty());
    }

    #[test]
    fn mixed_sport_parlay_has_no_sport_tag() {
        let mut a = leg("g1", BetType::Moneyline, "AA ML", -120, 0.58, Confidence::High);
        a.sport = Sport::Nfl;
        let mut b = leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Medium);
        b.sport = Sport::Mlb;
        let parlays = engine().build(&[a, b], &request(2, ParlayStrategy::Safe));
        assert_eq!(parlays[0].sport, None);
    }

    #[test]
    fn quality_score_monotone_in_probability() {
        let e = engine();
        let low = vec![
            leg("g1", BetType::Moneyline, "AA ML", -120, 0.50, Confidence::High),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Medium),
        ];
        let high = vec![
            leg("g1", BetType::Moneyline, "AA ML", -120, 0.60, Confidence::High),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Medium),
        ];
        let q_low = e.build(&low, &request(2, ParlayStrategy::Balanced))[0].quality_score;
        let q_high = e.build(&high, &request(2, ParlayStrategy::Balanced))[0].quality_score;
        assert!(q_high > q_low);
    }

    #[test]
    fn quality_score_monotone_in_confidence() {
        let e = engine();
        let meek = vec![
            leg("g1", BetType::Moneyline, "AA ML", -120, 0.58, Confidence::Low),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::Low),
        ];
        let bold = vec![
            leg("g1", BetType::Moneyline, "AA ML", -120, 0.58, Confidence::VeryHigh),
            leg("g2", BetType::Moneyline, "BB ML", 110, 0.52, Confidence::VeryHigh),
        ];
        let q_meek = e.build(&meek, &request(2, ParlayStrategy::Balanced))[0].quality_score;
        let q_bold = e.build(&bold, &request(2, ParlayStrategy::Balanced))[0].quality_score;
        assert!(q_bold > q_meek);
    }
}
