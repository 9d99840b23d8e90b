//! Shared numeric helpers for the matchup models

/// Logistic function
#[inline]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Poisson PMF for k = 0..=max_k computed by recurrence.
pub fn poisson_pmf(lambda: f64, max_k: usize) -> Vec<f64> {
    let lambda = lambda.max(0.0);
    let mut out = vec![0.0; max_k + 1];
    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}

/// P(X <= k) for X ~ Poisson(lambda).
pub fn poisson_cdf(lambda: f64, k: usize) -> f64 {
    poisson_pmf(lambda, k).iter().sum::<f64>().min(1.0)
}

/// Standard normal CDF approximation (Abramowitz and Stegun)
pub fn norm_cdf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / 2.0_f64.sqrt();

    let t = 1.0 / (1.0 + p * z);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-z * z).exp();

    0.5 * (1.0 + sign * y)
}

/// Over/under probabilities for a market total line given a predicted game
/// total. Direct Poisson summation for lambda <= 10, normal approximation
/// above; both sides clamped to [0.10, 0.90].
pub fn total_probabilities(predicted_total: f64, line: f64) -> (f64, f64) {
    let lambda = predicted_total.max(0.0);
    if lambda == 0.0 {
        return (0.10, 0.90);
    }

    let p_over_raw = if lambda <= 10.0 {
        1.0 - poisson_cdf(lambda, line.floor().max(0.0) as usize)
    } else {
        let z = (line - lambda) / lambda.sqrt();
        1.0 - norm_cdf(z)
    };

    (
        p_over_raw.clamp(0.10, 0.90),
        (1.0 - p_over_raw).clamp(0.10, 0.90),
    )
}
