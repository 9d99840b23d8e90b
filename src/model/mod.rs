//! Matchup Strength Model
//!
//! Per-sport win/total estimation behind one `MatchupModel` interface,
//! selected through a `ModelRegistry` keyed by sport.

pub mod batter_pitcher;
pub mod math;
pub mod possession;
pub mod run_scoring;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::ModelConfig;
use crate::types::{Game, MarketQuote, Sport};

/// Model output for one game
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameEstimate {
    /// Probability the home team wins
    pub home_win: f64,
    /// Probability the away team wins (complement of home_win)
    pub away_win: f64,
    /// Predicted combined score, when the inputs support one
    pub predicted_total: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no matchup model registered for {0}")]
    UnsupportedSport(Sport),
}

/// Win/total estimation for one sport family.
pub trait MatchupModel: Send + Sync {
    /// Estimate win probabilities and a predicted total for a game.
    ///
    /// Quotes supply the vig-free market baseline the model falls back to
    /// when team signals are absent.
    fn estimate(&self, game: &Game, quotes: &[MarketQuote]) -> GameEstimate;
}

/// Registry of per-sport models. Dispatch is by `Sport`, never by string.
pub struct ModelRegistry {
    models: HashMap<Sport, Box<dyn MatchupModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Registry with the built-in models for every supported sport.
    pub fn with_defaults(cfg: &ModelConfig) -> Self {
        let mut registry = Self::new();
        registry.register(
            Sport::Nfl,
            Box::new(possession::PossessionModel::new(cfg.football.clone())),
        );
        registry.register(
            Sport::Nhl,
            Box::new(possession::PossessionModel::new(cfg.hockey.clone())),
        );
        registry.register(
            Sport::Mlb,
            Box::new(run_scoring::RunScoringModel::new(cfg.baseball.clone())),
        );
        registry
    }

    pub fn register(&mut self, sport: Sport, model: Box<dyn MatchupModel>) {
        self.models.insert(sport, model);
    }

    pub fn get(&self, sport: Sport) -> Option<&dyn MatchupModel> {
        self.models.get(&sport).map(|m| m.as_ref())
    }

    /// Estimate a game with the model registered for its sport.
    pub fn estimate(&self, game: &Game, quotes: &[MarketQuote]) -> Result<GameEstimate, ModelError> {
        let model = self
            .get(game.sport)
            .ok_or(ModelError::UnsupportedSport(game.sport))?;
        Ok(model.estimate(game, quotes))
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::with_defaults(&ModelConfig::default())
    }
}
