//! Configuration for the odds analytics core
//!
//! Every tunable (league constants, caps, noise floors, quality weights)
//! lives here with a documented default. `CoreConfig::load` layers a YAML
//! file with `ODDSCORE_`-prefixed environment overrides.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration tree
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub model: ModelConfig,
    pub edge: EdgeConfig,
    pub parlay: ParlayConfig,
}

/// Per-sport model parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub football: PossessionParams,
    pub hockey: PossessionParams,
    pub baseball: RunScoringParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            football: PossessionParams {
                league_avg_points: 22.0,
                home_field_advantage: 0.025,
                home_scoring_boost: 1.0,
                min_total_gap: 1.0,
            },
            hockey: PossessionParams {
                league_avg_points: 3.0,
                home_field_advantage: 0.020,
                home_scoring_boost: 0.15,
                min_total_gap: 0.3,
            },
            baseball: RunScoringParams::default(),
        }
    }
}

/// Parameters for possession/score sports (football, hockey)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PossessionParams {
    /// League-average points scored per team per game
    pub league_avg_points: f64,
    /// Home-field advantage added to the strength differential
    pub home_field_advantage: f64,
    /// Points added to the predicted total for home scoring lift
    pub home_scoring_boost: f64,
    /// Minimum model-vs-line gap before a totals edge is considered
    pub min_total_gap: f64,
}

impl Default for PossessionParams {
    fn default() -> Self {
        Self {
            league_avg_points: 22.0,
            home_field_advantage: 0.025,
            home_scoring_boost: 1.0,
            min_total_gap: 1.0,
        }
    }
}

/// Parameters for the run-scoring (baseball) model
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunScoringParams {
    /// League base runs per team per game
    pub league_base_run_rate: f64,
    /// Multiplier applied to the home team's expected runs
    pub home_field_multiplier: f64,
    /// Pythagorean expectation exponent
    pub pythagorean_exponent: f64,
    /// Expected runs never fall below this floor
    pub run_floor: f64,
    /// Minimum model-vs-line gap before a totals edge is considered
    pub min_total_gap: f64,
}

impl Default for RunScoringParams {
    fn default() -> Self {
        Self {
            league_base_run_rate: 4.5,
            home_field_multiplier: 1.04,
            pythagorean_exponent: 1.83,
            run_floor: 0.5,
            min_total_gap: 0.3,
        }
    }
}

/// Edge capping and noise-floor parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Team/game-level edges clamp to +/- this bound
    pub game_edge_cap: f64,
    /// Matchup-level (player) edges clamp to +/- this bound
    pub prop_edge_cap: f64,
    /// Moneyline edges below this magnitude report as null
    pub moneyline_noise_floor: f64,
    /// Totals edges below this magnitude report as null
    pub total_noise_floor: f64,
    /// Totals edge magnitude per point of model-vs-line gap
    pub total_sensitivity: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            game_edge_cap: 0.10,
            prop_edge_cap: 0.25,
            moneyline_noise_floor: 0.02,
            total_noise_floor: 0.01,
            total_sensitivity: 0.04,
        }
    }
}

/// Parlay engine parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParlayConfig {
    /// Minimum legs per parlay
    pub min_leg_count: usize,
    /// Maximum legs per parlay
    pub max_leg_count: usize,
    /// Quality-score weight on combined probability
    pub quality_weight_probability: f64,
    /// Quality-score weight on (squashed) edge
    pub quality_weight_edge: f64,
    /// Quality-score weight on average leg confidence
    pub quality_weight_confidence: f64,
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self {
            min_leg_count: 2,
            max_leg_count: 10,
            quality_weight_probability: 0.35,
            quality_weight_edge: 0.40,
            quality_weight_confidence: 0.25,
        }
    }
}

impl CoreConfig {
    /// Load configuration from a YAML file plus `ODDSCORE_`-prefixed
    /// environment overrides (e.g. `ODDSCORE_EDGE__GAME_EDGE_CAP=0.08`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let cfg = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ODDSCORE").separator("__"))
            .build()
            .context("failed to build configuration")?;

        let cfg: CoreConfig = cfg
            .try_deserialize()
            .with_context(|| format!("failed to parse configuration from {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject parameter combinations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.parlay.min_leg_count < 2 {
            bail!("parlay.min_leg_count must be at least 2");
        }
        if self.parlay.max_leg_count > 10 {
            bail!("parlay.max_leg_count must be at most 10");
        }
        if self.parlay.min_leg_count > self.parlay.max_leg_count {
            bail!("parlay.min_leg_count exceeds parlay.max_leg_count");
        }
        if self.edge.game_edge_cap <= 0.0 || self.edge.prop_edge_cap <= 0.0 {
            bail!("edge caps must be positive");
        }
        let w = &self.parlay;
        if w.quality_weight_probability < 0.0
            || w.quality_weight_edge < 0.0
            || w.quality_weight_confidence < 0.0
        {
            bail!("quality weights must be non-negative");
        }
        if self.model.baseball.pythagorean_exponent <= 0.0 {
            bail!("baseball.pythagorean_exponent must be positive");
        }
        Ok(())
    }
}
