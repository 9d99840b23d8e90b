//! Declarative correlation rules for parlay legs
//!
//! Each rule is a tagged predicate over a candidate combination; the engine
//! evaluates an ordered list uniformly, so new rules compose without
//! touching the enumeration loop.

use crate::types::{BetType, CandidateBet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationRule {
    /// All legs must share one game
    SingleGameOnly,
    /// Within one game, moneyline+spread and moneyline+total are mutually
    /// informative pairs
    SameGameExclusivePair,
    /// Two legs may not reference the same player
    SamePlayerExclusive,
    /// Non-player legs from one game may not repeat the same team selection
    SameTeamRepeat,
}

impl CorrelationRule {
    /// Rules applied to every parlay regardless of mode.
    pub fn standard() -> Vec<CorrelationRule> {
        vec![
            CorrelationRule::SameGameExclusivePair,
            CorrelationRule::SamePlayerExclusive,
            CorrelationRule::SameTeamRepeat,
        ]
    }

    /// True when the combination violates this rule.
    pub fn violated(&self, legs: &[&CandidateBet]) -> bool {
        match self {
            CorrelationRule::SingleGameOnly => legs
                .windows(2)
                .any(|pair| pair[0].game_id != pair[1].game_id),
            CorrelationRule::SameGameExclusivePair => {
                pairs(legs, |a, b| {
                    a.game_id == b.game_id && exclusive_pair(a.bet_type, b.bet_type)
                })
            }
            CorrelationRule::SamePlayerExclusive => pairs(legs, |a, b| {
                matches!((&a.player_id, &b.player_id), (Some(x), Some(y)) if x == y)
            }),
            CorrelationRule::SameTeamRepeat => pairs(legs, |a, b| {
                a.bet_type != BetType::PlayerProp
                    && b.bet_type != BetType::PlayerProp
                    && a.game_id == b.game_id
                    && matches!((&a.team, &b.team), (Some(x), Some(y)) if x == y)
            }),
        }
    }
}

fn exclusive_pair(a: BetType, b: BetType) -> bool {
    matches!(
        (a, b),
        (BetType::Moneyline, BetType::Spread)
            | (BetType::Spread, BetType::Moneyline)
            | (BetType::Moneyline, BetType::Total)
            | (BetType::Total, BetType::Moneyline)
    )
}

fn pairs<F>(legs: &[&CandidateBet], mut pred: F) -> bool
where
    F: FnMut(&CandidateBet, &CandidateBet) -> bool,
{
    for (i, a) in legs.iter().enumerate() {
        for b in &legs[i + 1..] {
            if pred(a, b) {
                return true;
            }
        }
    }
    false
}
