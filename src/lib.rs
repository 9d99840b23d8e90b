//! Oddscore Library
//!
//! Quantitative core for sports-odds analytics: converts bookmaker prices
//! into fair probabilities, estimates win/total probabilities from team and
//! player signals, computes betting edges, and assembles ranked multi-leg
//! parlays under correlation constraints. Pure computation: no network,
//! storage, or presentation concerns.

pub mod candidates;
pub mod config;
pub mod edge;
pub mod market;
pub mod model;
pub mod odds;
pub mod parlay;
pub mod types;
