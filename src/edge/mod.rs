//! Edge Calculator - model probability vs vig-free market probability
//!
//! Edges are capped to fixed bounds and anything below the noise floor is
//! reported as `None` ("not actionable"), never as a near-zero number.
//! Capping is silent.

use std::collections::HashMap;

use crate::config::CoreConfig;
use crate::market::select_quote;
use crate::model::GameEstimate;
use crate::odds::{american_to_implied, remove_vig};
use crate::types::{Edge, MarketKind, MarketQuote, Sport};

pub struct EdgeCalculator {
    game_cap: f64,
    prop_cap: f64,
    ml_noise_floor: f64,
    total_noise_floor: f64,
    total_sensitivity: f64,
    min_total_gap: HashMap<Sport, f64>,
}

impl EdgeCalculator {
    pub fn new(cfg: &CoreConfig) -> Self {
        let mut min_total_gap = HashMap::new();
        min_total_gap.insert(Sport::Nfl, cfg.model.football.min_total_gap);
        min_total_gap.insert(Sport::Nhl, cfg.model.hockey.min_total_gap);
        min_total_gap.insert(Sport::Mlb, cfg.model.baseball.min_total_gap);

        Self {
            game_cap: cfg.edge.game_edge_cap,
            prop_cap: cfg.edge.prop_edge_cap,
            ml_noise_floor: cfg.edge.moneyline_noise_floor,
            total_noise_floor: cfg.edge.total_noise_floor,
            total_sensitivity: cfg.edge.total_sensitivity,
            min_total_gap,
        }
    }

    /// Per-game edges from a model estimate and the game's market quotes.
    pub fn compute_edges(
        &self,
        estimate: &GameEstimate,
        quotes: &[MarketQuote],
        sport: Sport,
    ) -> Edge {
        let (edge_ml_home, edge_ml_away) = self.moneyline_edges(estimate, quotes);
        let (edge_total_over, edge_total_under) = self.total_edges(estimate, quotes, sport);

        Edge {
            edge_ml_home,
            edge_ml_away,
            edge_total_over,
            edge_total_under,
        }
    }

    fn moneyline_edges(
        &self,
        estimate: &GameEstimate,
        quotes: &[MarketQuote],
    ) -> (Option<f64>, Option<f64>) {
        let Some(quote) = select_quote(quotes, MarketKind::Moneyline) else {
            return (None, None);
        };
        let fair = remove_vig(quote.price_home, quote.price_away);

        let home = self.game_edge(estimate.home_win, fair.fair_prob_a, self.ml_noise_floor);
        let away = self.game_edge(estimate.away_win, fair.fair_prob_b, self.ml_noise_floor);
        (home, away)
    }

    /// Capped, noise-floored game-level edge; None when either probability
    /// is the 0 sentinel or the edge is below the floor.
    fn game_edge(&self, our_prob: f64, market_prob: f64, floor: f64) -> Option<f64> {
        if our_prob <= 0.0 || market_prob <= 0.0 {
            return None;
        }
        let edge = (our_prob - market_prob).clamp(-self.game_cap, self.game_cap);
        if edge.abs() < floor {
            return None;
        }
        Some(edge)
    }

    /// Zero-sum over/under pair from the model-vs-line gap.
    fn total_edges(
        &self,
        estimate: &GameEstimate,
        quotes: &[MarketQuote],
        sport: Sport,
    ) -> (Option<f64>, Option<f64>) {
        let Some(predicted) = estimate.predicted_total else {
            return (None, None);
        };
        let Some(line) = select_quote(quotes, MarketKind::Total).and_then(|q| q.total_line) else {
            return (None, None);
        };

        let gap = predicted - line;
        let min_gap = self.min_total_gap.get(&sport).copied().unwrap_or(0.5);
        if gap.abs() <= min_gap {
            return (None, None);
        }

        let magnitude = (gap.abs() * self.total_sensitivity).min(self.game_cap);
        if magnitude < self.total_noise_floor {
            return (None, None);
        }

        let over = if gap > 0.0 { magnitude } else { -magnitude };
        (Some(over), Some(-over))
    }

    /// Matchup-level (player prop) edge against a single quoted price.
    pub fn prop_edge(&self, our_prob: f64, price: i32) -> Option<f64> {
        let implied = american_to_implied(price);
        if our_prob <= 0.0 || implied <= 0.0 {
            return None;
        }
        let edge = (our_prob - implied).clamp(-self.prop_cap, self.prop_cap);
        if edge.abs() < self.ml_noise_floor {
            return None;
        }
        Some(edge)
    }
}
