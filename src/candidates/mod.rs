//! Bet Candidate Assembler
//!
//! Flattens game-level edges and player-prop probabilities into uniform
//! `CandidateBet` records and filters them against caller-supplied bounds.
//! Pure mapping/filtering: probabilities arrive pre-computed.

use serde::{Deserialize, Serialize};

use crate::edge::EdgeCalculator;
use crate::market::select_quote;
use crate::model::GameEstimate;
use crate::types::{BetType, CandidateBet, Confidence, Edge, Game, MarketKind, MarketQuote};

/// Caller-supplied candidate bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CandidateFilter {
    /// Minimum (signed) edge a candidate must carry
    pub min_edge: f64,
    /// Minimum ordinal confidence
    pub min_confidence: Confidence,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            min_edge: 0.02,
            min_confidence: Confidence::Low,
        }
    }
}

/// Player-prop probability supplied by the batter/pitcher sub-model or an
/// external projection source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropProjection {
    pub game_id: String,
    pub player_id: String,
    /// Human-readable selection (e.g. "J. Soto over 1.5 total bases")
    pub selection: String,
    #[serde(default)]
    pub team: Option<String>,
    pub american_odds: i32,
    pub probability: f64,
    pub confidence: Confidence,
}

/// Over/under probabilities pre-computed by the model layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TotalProbabilities {
    pub over: f64,
    pub under: f64,
}

/// Game-leg confidence from edge magnitude (threshold buckets).
fn confidence_from_edge(edge: f64) -> Confidence {
    let magnitude = edge.abs();
    if magnitude >= 0.08 {
        Confidence::VeryHigh
    } else if magnitude >= 0.06 {
        Confidence::High
    } else if magnitude >= 0.04 {
        Confidence::Medium
    } else if magnitude >= 0.02 {
        Confidence::Low
    } else {
        Confidence::VeryLow
    }
}

/// Flatten one game's edges plus its prop projections into candidates.
#[allow(clippy::too_many_arguments)]
pub fn assemble(
    game: &Game,
    estimate: &GameEstimate,
    total_probs: Option<TotalProbabilities>,
    edge: &Edge,
    quotes: &[MarketQuote],
    props: &[PropProjection],
    edge_calc: &EdgeCalculator,
    filter: &CandidateFilter,
) -> Vec<CandidateBet> {
    let mut out = Vec::new();

    let ml_quote = select_quote(quotes, MarketKind::Moneyline);
    let total_quote = select_quote(quotes, MarketKind::Total);

    if let (Some(e), Some(quote)) = (edge.edge_ml_home, ml_quote) {
        if quote.price_home != 0 {
            out.push(CandidateBet {
                game_id: game.id.clone(),
                sport: game.sport,
                bet_type: BetType::Moneyline,
                selection: format!("{} ML", game.home.abbr),
                team: Some(game.home.abbr.clone()),
                player_id: None,
                american_odds: quote.price_home,
                probability: estimate.home_win,
                edge: e,
                confidence: confidence_from_edge(e),
            });
        }
    }
    if let (Some(e), Some(quote)) = (edge.edge_ml_away, ml_quote) {
        if quote.price_away != 0 {
            out.push(CandidateBet {
                game_id: game.id.clone(),
                sport: game.sport,
                bet_type: BetType::Moneyline,
                selection: format!("{} ML", game.away.abbr),
                team: Some(game.away.abbr.clone()),
                player_id: None,
                american_odds: quote.price_away,
                probability: estimate.away_win,
                edge: e,
                confidence: confidence_from_edge(e),
            });
        }
    }

    if let (Some(e), Some(quote), Some(probs)) = (edge.edge_total_over, total_quote, total_probs) {
        if quote.price_over != 0 {
            if let Some(line) = quote.total_line {
                out.push(CandidateBet {
                    game_id: game.id.clone(),
                    sport: game.sport,
                    bet_type: BetType::Total,
                    selection: format!("OVER {line}"),
                    team: None,
                    player_id: None,
                    american_odds: quote.price_over,
                    probability: probs.over,
                    edge: e,
                    confidence: confidence_from_edge(e),
                });
            }
        }
    }
    if let (Some(e), Some(quote), Some(probs)) = (edge.edge_total_under, total_quote, total_probs) {
        if quote.price_under != 0 {
            if let Some(line) = quote.total_line {
                out.push(CandidateBet {
                    game_id: game.id.clone(),
                    sport: game.sport,
                    bet_type: BetType::Total,
                    selection: format!("UNDER {line}"),
                    team: None,
                    player_id: None,
                    american_odds: quote.price_under,
                    probability: probs.under,
                    edge: e,
                    confidence: confidence_from_edge(e),
                });
            }
        }
    }

    for prop in props {
        let Some(e) = edge_calc.prop_edge(prop.probability, prop.american_odds) else {
            continue;
        };
        out.push(CandidateBet {
            game_id: prop.game_id.clone(),
            sport: game.sport,
            bet_type: BetType::PlayerProp,
            selection: prop.selection.clone(),
            team: prop.team.clone(),
            player_id: Some(prop.player_id.clone()),
            american_odds: prop.american_odds,
            probability: prop.probability,
            edge: e,
            confidence: prop.confidence,
        });
    }

    out.retain(|c| c.edge >= filter.min_edge && c.confidence >= filter.min_confidence);
    out
}
