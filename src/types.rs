//! Core types used throughout the odds analytics core
//!
//! Defines common data structures for sports, market quotes, team signals,
//! candidate bets and assembled parlays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported sports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Nfl,
    Nhl,
    Mlb,
}

impl Sport {
    /// Parse from string (vendor keys come in several casings)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NFL" => Some(Sport::Nfl),
            "NHL" => Some(Sport::Nhl),
            "MLB" => Some(Sport::Mlb),
            _ => None,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Nfl => write!(f, "NFL"),
            Sport::Nhl => write!(f, "NHL"),
            Sport::Mlb => write!(f, "MLB"),
        }
    }
}

/// Market family of a bookmaker quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    Moneyline,
    Total,
    Spread,
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketKind::Moneyline => write!(f, "MONEYLINE"),
            MarketKind::Total => write!(f, "TOTAL"),
            MarketKind::Spread => write!(f, "SPREAD"),
        }
    }
}

/// Normalized bookmaker quote for one market of one game.
///
/// American odds use 0 as the "unknown" sentinel — a real quote is never 0.
/// Moneyline/spread quotes fill the home/away prices; totals fill over/under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Market family
    pub market: MarketKind,
    /// Home-side American price (0 = unknown)
    #[serde(default)]
    pub price_home: i32,
    /// Away-side American price (0 = unknown)
    #[serde(default)]
    pub price_away: i32,
    /// Over American price (0 = unknown)
    #[serde(default)]
    pub price_over: i32,
    /// Under American price (0 = unknown)
    #[serde(default)]
    pub price_under: i32,
    /// Posted total line (totals markets)
    #[serde(default)]
    pub total_line: Option<f64>,
    /// Posted spread line, home-relative (spread markets)
    #[serde(default)]
    pub spread_line: Option<f64>,
    /// Bookmaker key
    pub book: String,
    /// When the quote was captured
    pub timestamp: DateTime<Utc>,
}

/// Win/loss record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    /// Win percentage; 0.5 when no games played (neutral fallback)
    pub fn win_pct(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            return 0.5;
        }
        self.wins as f64 / games as f64
    }
}

/// Performance signals for one team. Every field is optional; consumers fall
/// back to documented league-average constants when a field is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSignal {
    /// Overall win/loss record
    pub record: Option<TeamRecord>,
    /// Record at the relevant venue (home team: home record, away team: away record)
    pub venue_record: Option<TeamRecord>,
    /// Record over the last N games (recent form)
    pub last_n: Option<TeamRecord>,
    /// Rolling average points/runs scored per game
    pub points_for_avg: Option<f64>,
    /// Rolling average points/runs allowed per game
    pub points_against_avg: Option<f64>,
    /// Advanced rating placeholder (currently never populated upstream)
    pub advanced_rating: Option<f64>,
}

impl TeamSignal {
    /// True when no signal at all is present
    pub fn is_empty(&self) -> bool {
        self.record.is_none()
            && self.venue_record.is_none()
            && self.last_n.is_none()
            && self.points_for_avg.is_none()
            && self.points_against_avg.is_none()
            && self.advanced_rating.is_none()
    }

    /// True when both rolling averages are present
    pub fn has_rolling_averages(&self) -> bool {
        self.points_for_avg.is_some() && self.points_against_avg.is_some()
    }
}

/// One side of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSide {
    /// Team abbreviation (e.g. "NYY")
    pub abbr: String,
    /// Park/venue scoring factor, 1.0 = neutral (baseball)
    #[serde(default)]
    pub park_factor: Option<f64>,
    /// Opposing-starter quality multiplier supplied upstream, 1.0 = unknown/neutral
    #[serde(default)]
    pub starter_quality: Option<f64>,
    /// Performance signals
    #[serde(default)]
    pub signal: TeamSignal,
}

/// Game lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Scheduled,
    Live,
    Final,
}

/// Game/team record consumed from schedule collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub sport: Sport,
    pub home: TeamSide,
    pub away: TeamSide,
    pub status: GameStatus,
}

/// Ordinal confidence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Confidence {
    /// Ordinal on a 1-5 scale
    pub fn ordinal(&self) -> u8 {
        match self {
            Confidence::VeryLow => 1,
            Confidence::Low => 2,
            Confidence::Medium => 3,
            Confidence::High => 4,
            Confidence::VeryHigh => 5,
        }
    }

    pub fn from_ordinal(ord: u8) -> Self {
        match ord {
            0 | 1 => Confidence::VeryLow,
            2 => Confidence::Low,
            3 => Confidence::Medium,
            4 => Confidence::High,
            _ => Confidence::VeryHigh,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::VeryLow => write!(f, "very_low"),
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
            Confidence::VeryHigh => write!(f, "very_high"),
        }
    }
}

/// Kind of wager a candidate leg represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Moneyline,
    Total,
    Spread,
    PlayerProp,
}

impl BetType {
    /// Correlation class used when grouping legs within one game
    pub fn correlation_class(&self) -> &'static str {
        match self {
            BetType::Moneyline => "ml",
            BetType::Total => "total",
            BetType::Spread => "spread",
            BetType::PlayerProp => "prop",
        }
    }
}

/// Grouping key used to detect mutually dependent legs within one parlay
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationKey {
    pub game_id: String,
    pub class: String,
    pub player_id: Option<String>,
}

/// Uniform bet candidate flattened from game edges or player props
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateBet {
    pub game_id: String,
    pub sport: Sport,
    pub bet_type: BetType,
    /// Human-readable selection (e.g. "NYY ML", "OVER 8.5")
    pub selection: String,
    /// Team the selection backs, when the leg is team-specific
    #[serde(default)]
    pub team: Option<String>,
    /// Player the leg references, for prop bets
    #[serde(default)]
    pub player_id: Option<String>,
    /// Quoted American odds for the selection
    pub american_odds: i32,
    /// Model probability that the leg wins
    pub probability: f64,
    /// Model edge over the vig-free market probability
    pub edge: f64,
    pub confidence: Confidence,
}

impl CandidateBet {
    pub fn correlation_key(&self) -> CorrelationKey {
        CorrelationKey {
            game_id: self.game_id.clone(),
            class: self.bet_type.correlation_class().to_string(),
            player_id: self.player_id.clone(),
        }
    }
}

/// Per-game edge report. `None` means "not computed / below noise floor",
/// never zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Edge {
    pub edge_ml_home: Option<f64>,
    pub edge_ml_away: Option<f64>,
    pub edge_total_over: Option<f64>,
    pub edge_total_under: Option<f64>,
}

impl Edge {
    /// True when no side carries an actionable edge
    pub fn is_empty(&self) -> bool {
        self.edge_ml_home.is_none()
            && self.edge_ml_away.is_none()
            && self.edge_total_over.is_none()
            && self.edge_total_under.is_none()
    }
}

/// Parlay ranking objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParlayStrategy {
    /// Highest combined probability first
    Safe,
    /// Highest quality score first
    Balanced,
    /// Highest edge first
    Value,
    /// Highest decimal odds first
    Homerun,
}

impl ParlayStrategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "safe" => Some(ParlayStrategy::Safe),
            "balanced" => Some(ParlayStrategy::Balanced),
            "value" => Some(ParlayStrategy::Value),
            "homerun" => Some(ParlayStrategy::Homerun),
            _ => None,
        }
    }
}

impl fmt::Display for ParlayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParlayStrategy::Safe => write!(f, "safe"),
            ParlayStrategy::Balanced => write!(f, "balanced"),
            ParlayStrategy::Value => write!(f, "value"),
            ParlayStrategy::Homerun => write!(f, "homerun"),
        }
    }
}

/// Assembled multi-leg wager with derived metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parlay {
    /// Ordered legs (2-10)
    pub legs: Vec<CandidateBet>,
    /// Product of leg probabilities
    pub probability: f64,
    /// Product of leg decimal odds
    pub decimal_odds: f64,
    /// 1 / decimal_odds
    pub implied_probability: f64,
    /// (probability - implied) / implied
    pub edge: f64,
    /// probability * (decimal_odds - 1) - (1 - probability)
    pub expected_value: f64,
    /// Aggregate leg confidence
    pub confidence: Confidence,
    /// Composite ranking metric (probability, edge magnitude, confidence)
    pub quality_score: f64,
    /// Set when every leg shares one sport
    pub sport: Option<Sport>,
    /// Objective the parlay was ranked under
    pub strategy: ParlayStrategy,
}
