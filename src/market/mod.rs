//! Market quote selection and the caller-owned opening-line store
//!
//! The core never averages across books: for each market family it consumes
//! the first quote supplied. Opening lines live in a store owned by the
//! caller and passed into calls, keeping the core a pure function of its
//! inputs.

use std::collections::HashMap;

use crate::types::{MarketKind, MarketQuote};

/// First supplied quote for a market family, or None.
pub fn select_quote<'a>(quotes: &'a [MarketQuote], kind: MarketKind) -> Option<&'a MarketQuote> {
    quotes.iter().find(|q| q.market == kind)
}

/// Externally-owned store of the first quote seen per (game, market).
pub trait OpeningLines {
    /// Record a quote as the opening line unless one is already stored.
    fn record(&mut self, game_id: &str, quote: &MarketQuote);

    /// Opening quote for a game/market, if one was recorded.
    fn opening(&self, game_id: &str, kind: MarketKind) -> Option<&MarketQuote>;
}

/// HashMap-backed opening-line store for hosts without their own persistence.
#[derive(Debug, Default)]
pub struct InMemoryOpeningLines {
    lines: HashMap<(String, MarketKind), MarketQuote>,
}

impl InMemoryOpeningLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl OpeningLines for InMemoryOpeningLines {
    fn record(&mut self, game_id: &str, quote: &MarketQuote) {
        self.lines
            .entry((game_id.to_string(), quote.market))
            .or_insert_with(|| quote.clone());
    }

    fn opening(&self, game_id: &str, kind: MarketKind) -> Option<&MarketQuote> {
        self.lines.get(&(game_id.to_string(), kind))
    }
}

/// Movement of the posted total since open (current minus opening line).
pub fn total_line_movement(opening: &MarketQuote, current: &MarketQuote) -> Option<f64> {
    match (opening.total_line, current.total_line) {
        (Some(open), Some(now)) => Some(now - open),
        _ => None,
    }
}
