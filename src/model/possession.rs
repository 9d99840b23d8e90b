//! Matchup model for possession/score sports (football, hockey)
//!
//! Team strength blends up to four optional weighted factors; each missing
//! factor contributes nothing. Strength centers at 0.5 and clamps to
//! [0.2, 0.8]; the win probability maps the strength differential through a
//! logistic curve with a small home-field shift.

use tracing::debug;

use super::math::logistic;
use super::{GameEstimate, MatchupModel};
use crate::config::PossessionParams;
use crate::market::select_quote;
use crate::odds::remove_vig;
use crate::types::{Game, MarketKind, MarketQuote, TeamSignal};

/// Strength factor weights
const WEIGHT_RECORD: f64 = 0.4;
const WEIGHT_FORM: f64 = 0.3;
const WEIGHT_VENUE: f64 = 0.2;
const WEIGHT_ADVANCED: f64 = 0.1;

/// Strength and win-probability clamp bounds
const STRENGTH_MIN: f64 = 0.2;
const STRENGTH_MAX: f64 = 0.8;
const LOGISTIC_SCALE: f64 = 8.0;

pub struct PossessionModel {
    params: PossessionParams,
}

impl PossessionModel {
    pub fn new(params: PossessionParams) -> Self {
        Self { params }
    }

    /// Blended team strength centered at 0.5.
    fn strength(&self, signal: &TeamSignal) -> f64 {
        let mut strength = 0.5;

        if let Some(record) = &signal.record {
            strength += WEIGHT_RECORD * (record.win_pct() - 0.5);
        }
        if let Some(pf) = signal.points_for_avg {
            if pf > 0.0 {
                let form = pf / (pf + self.params.league_avg_points);
                strength += WEIGHT_FORM * (form - 0.5);
            }
        }
        if let Some(venue) = &signal.venue_record {
            strength += WEIGHT_VENUE * (venue.win_pct() - 0.5);
        }
        // Advanced-rating slot: upstream never populates it today, so the
        // weight is inert and redistributes implicitly.
        if let Some(rating) = signal.advanced_rating {
            strength += WEIGHT_ADVANCED * (rating.clamp(0.0, 1.0) - 0.5);
        }

        strength.clamp(STRENGTH_MIN, STRENGTH_MAX)
    }

    /// Vig-free market home probability, when a moneyline quote exists.
    fn market_baseline(quotes: &[MarketQuote]) -> Option<f64> {
        let quote = select_quote(quotes, MarketKind::Moneyline)?;
        let fair = remove_vig(quote.price_home, quote.price_away);
        if fair.fair_prob_a > 0.0 {
            Some(fair.fair_prob_a)
        } else {
            None
        }
    }
}

impl MatchupModel for PossessionModel {
    fn estimate(&self, game: &Game, quotes: &[MarketQuote]) -> GameEstimate {
        let home_signal = &game.home.signal;
        let away_signal = &game.away.signal;

        let raw_home_win = if home_signal.is_empty() && away_signal.is_empty() {
            // No team signal at all: degrade to the vig-free market
            // baseline, then to neutral.
            let baseline = Self::market_baseline(quotes).unwrap_or(0.5);
            debug!(game = %game.id, baseline, "no team signals, using market baseline");
            baseline
        } else {
            let home_strength = self.strength(home_signal);
            let away_strength = self.strength(away_signal);
            logistic(
                LOGISTIC_SCALE
                    * (home_strength - away_strength + self.params.home_field_advantage),
            )
        };
        let home_win = raw_home_win.clamp(STRENGTH_MIN, STRENGTH_MAX);

        let predicted_total = if home_signal.has_rolling_averages()
            && away_signal.has_rolling_averages()
        {
            let home_off = home_signal.points_for_avg.unwrap_or(0.0);
            let home_def = home_signal.points_against_avg.unwrap_or(0.0);
            let away_off = away_signal.points_for_avg.unwrap_or(0.0);
            let away_def = away_signal.points_against_avg.unwrap_or(0.0);

            let home_expected = (home_off + away_def) / 2.0;
            let away_expected = (away_off + home_def) / 2.0;
            Some(home_expected + away_expected + self.params.home_scoring_boost)
        } else {
            None
        };

        GameEstimate {
            home_win,
            away_win: 1.0 - home_win,
            predicted_total,
        }
    }
}
