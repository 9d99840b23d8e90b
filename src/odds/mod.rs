//! Probability Converter - price/probability conversion and vig removal
//!
//! Every function here is total: invalid numeric domains yield the documented
//! sentinel (0 price, 0.0 probability, zeroed quote) instead of panicking, so
//! callers branch on values rather than catching errors.

use serde::{Deserialize, Serialize};

/// Vig-free two-sided market
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FairMarket {
    pub fair_prob_a: f64,
    pub fair_prob_b: f64,
    /// Bookmaker overround as a percentage (0 when the market carries no vig)
    pub vig_percent: f64,
}

/// Expected-value breakdown for a single bet
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValueQuote {
    /// Profit on a winning bet at the given stake
    pub payout: f64,
    /// Expected profit: p * payout - (1 - p) * stake
    pub ev: f64,
    /// EV as a percentage of stake
    pub ev_percent: f64,
    /// True probability minus implied probability, in percentage points
    pub edge_percent: f64,
}

/// Convert American odds to implied probability.
///
/// A 0 price is the "unknown" sentinel and maps to 0.0, which is distinct
/// from a genuine 0% event at this boundary.
pub fn american_to_implied(price: i32) -> f64 {
    if price > 0 {
        100.0 / (price as f64 + 100.0)
    } else if price < 0 {
        let abs = price.abs() as f64;
        abs / (abs + 100.0)
    } else {
        0.0
    }
}

/// Convert a probability in (0, 1) to American odds.
///
/// Probabilities at or outside the open interval yield the 0 sentinel.
/// p >= 0.5 produces negative (favorite) odds.
pub fn implied_to_american(prob: f64) -> i32 {
    if !(prob > 0.0 && prob < 1.0) {
        return 0;
    }
    if prob >= 0.5 {
        -((prob / (1.0 - prob) * 100.0).round() as i32)
    } else {
        ((1.0 - prob) / prob * 100.0).round() as i32
    }
}

/// Convert American odds to decimal odds (0 sentinel maps to 1.0, a push).
pub fn to_decimal(price: i32) -> f64 {
    if price > 0 {
        price as f64 / 100.0 + 1.0
    } else if price < 0 {
        100.0 / price.abs() as f64 + 1.0
    } else {
        1.0
    }
}

/// Strip the bookmaker margin from a two-sided market.
///
/// Both sides are converted to implied probability and summed. A sum at or
/// below 1.0 (including 0-sentinel inputs) passes through unchanged with
/// vig 0; otherwise each side is renormalized proportionally. The same
/// formula serves two-sided moneylines and two-sided totals.
pub fn remove_vig(price_a: i32, price_b: i32) -> FairMarket {
    let implied_a = american_to_implied(price_a);
    let implied_b = american_to_implied(price_b);
    let sum = implied_a + implied_b;

    if sum <= 1.0 {
        return FairMarket {
            fair_prob_a: implied_a,
            fair_prob_b: implied_b,
            vig_percent: 0.0,
        };
    }

    FairMarket {
        fair_prob_a: implied_a / sum,
        fair_prob_b: implied_b / sum,
        vig_percent: (sum - 1.0) * 100.0,
    }
}

/// Expected value of staking `stake` at `price` with win probability
/// `true_prob`. A 0 price yields an all-zero sentinel quote.
pub fn expected_value(true_prob: f64, price: i32, stake: f64) -> ValueQuote {
    if price == 0 || stake <= 0.0 {
        return ValueQuote {
            payout: 0.0,
            ev: 0.0,
            ev_percent: 0.0,
            edge_percent: 0.0,
        };
    }

    let p = true_prob.clamp(0.0, 1.0);
    let payout = if price > 0 {
        stake * price as f64 / 100.0
    } else {
        stake * 100.0 / price.abs() as f64
    };
    let ev = p * payout - (1.0 - p) * stake;

    ValueQuote {
        payout,
        ev,
        ev_percent: ev / stake * 100.0,
        edge_percent: (p - american_to_implied(price)) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-4;

    #[test]
    fn implied_from_standard_prices() {
        assert!((american_to_implied(-110) - 0.5238).abs() < TOL);
        assert!((american_to_implied(150) - 0.4).abs() < TOL);
        assert!((american_to_implied(100) - 0.5).abs() < TOL);
        assert_eq!(american_to_implied(0), 0.0);
    }

    #[test]
    fn american_from_probabilities() {
        assert_eq!(implied_to_american(0.6), -150);
        assert_eq!(implied_to_american(0.4), 150);
        assert_eq!(implied_to_american(0.0), 0);
        assert_eq!(implied_to_american(1.0), 0);
        assert_eq!(implied_to_american(-0.2), 0);
    }

    #[test]
    fn round_trip_within_rounding_tolerance() {
        for p in [0.05, 0.2, 0.35, 0.45, 0.55, 0.7, 0.85, 0.95] {
            let back = american_to_implied(implied_to_american(p));
            assert!(
                (back - p).abs() < 0.005,
                "round trip drift for p={p}: got {back}"
            );
        }
    }

    #[test]
    fn standard_juiced_market() {
        let fair = remove_vig(-110, -110);
        assert!((fair.vig_percent - 4.76).abs() < 0.01);
        assert!((fair.fair_prob_a - 0.5).abs() < TOL);
        assert!((fair.fair_prob_b - 0.5).abs() < TOL);
        assert!((fair.fair_prob_a + fair.fair_prob_b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vig_free_market_passes_through() {
        let fair = remove_vig(100, 100);
        assert_eq!(fair.vig_percent, 0.0);
        assert!((fair.fair_prob_a - 0.5).abs() < TOL);
    }

    #[test]
    fn vig_never_negative() {
        for (a, b) in [(-110, -110), (150, -170), (100, 100), (0, -120), (250, -300)] {
            let fair = remove_vig(a, b);
            assert!(fair.vig_percent >= 0.0, "negative vig for ({a},{b})");
        }
    }

    #[test]
    fn sentinel_side_passes_through() {
        let fair = remove_vig(0, -120);
        assert_eq!(fair.vig_percent, 0.0);
        assert_eq!(fair.fair_prob_a, 0.0);
        assert!((fair.fair_prob_b - american_to_implied(-120)).abs() < 1e-12);
    }

    #[test]
    fn ev_sign_follows_probability() {
        let good = expected_value(0.6, 100, 100.0);
        assert!(good.ev_percent > 0.0);
        assert!(good.edge_percent > 0.0);

        let bad = expected_value(0.4, 100, 100.0);
        assert!(bad.ev_percent < 0.0);
    }

    #[test]
    fn ev_sentinel_for_unknown_price() {
        let q = expected_value(0.6, 0, 100.0);
        assert_eq!(q.payout, 0.0);
        assert_eq!(q.ev, 0.0);
    }

    #[test]
    fn decimal_odds_conversion() {
        assert!((to_decimal(100) - 2.0).abs() < 1e-12);
        assert!((to_decimal(-200) - 1.5).abs() < 1e-12);
        assert!((to_decimal(150) - 2.5).abs() < 1e-12);
        assert_eq!(to_decimal(0), 1.0);
    }
}
