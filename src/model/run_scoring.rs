//! Matchup model for run-scoring sports with per-matchup starters (baseball)
//!
//! Expected runs per team are a product of multipliers over the league base
//! rate, each degrading to 1.0 when its input is absent. Win probability is
//! the Pythagorean expectation over the two run totals.

use tracing::debug;

use super::{GameEstimate, MatchupModel};
use crate::config::RunScoringParams;
use crate::types::{Game, MarketQuote, TeamSide};

pub struct RunScoringModel {
    params: RunScoringParams,
}

impl RunScoringModel {
    pub fn new(params: RunScoringParams) -> Self {
        Self { params }
    }

    /// Expected runs for `team` against `opponent`.
    ///
    /// The park factor is the home venue's, applied to both teams and
    /// dampened 50% toward neutral.
    fn expected_runs(
        &self,
        team: &TeamSide,
        opponent: &TeamSide,
        venue: &TeamSide,
        is_home: bool,
    ) -> f64 {
        let p = &self.params;
        let league = p.league_base_run_rate;

        let home_mult = if is_home { p.home_field_multiplier } else { 1.0 };
        let park_mult = 1.0 + (venue.park_factor.unwrap_or(1.0) - 1.0) * 0.5;
        let offense_mult = team
            .signal
            .points_for_avg
            .map(|runs| runs / league)
            .unwrap_or(1.0);
        let defense_mult = opponent
            .signal
            .points_against_avg
            .map(|runs| runs / league)
            .unwrap_or(1.0);
        let starter_mult = opponent.starter_quality.unwrap_or(1.0);
        let form_mult = team
            .signal
            .last_n
            .map(|r| 0.9 + 0.2 * r.win_pct())
            .unwrap_or(1.0);

        (league * home_mult * park_mult * offense_mult * defense_mult * starter_mult * form_mult)
            .max(p.run_floor)
    }
}

impl MatchupModel for RunScoringModel {
    fn estimate(&self, game: &Game, _quotes: &[MarketQuote]) -> GameEstimate {
        let home_runs = self.expected_runs(&game.home, &game.away, &game.home, true);
        let away_runs = self.expected_runs(&game.away, &game.home, &game.home, false);

        let exp = self.params.pythagorean_exponent;
        let home_pow = home_runs.powf(exp);
        let away_pow = away_runs.powf(exp);
        let home_win = home_pow / (home_pow + away_pow);

        debug!(
            game = %game.id,
            home_runs,
            away_runs,
            home_win,
            "run-scoring estimate"
        );

        GameEstimate {
            home_win,
            away_win: 1.0 - home_win,
            predicted_total: Some(home_runs + away_runs),
        }
    }
}
